use serde::Deserialize;
use std::time::Duration;

/// Client settings, read from `STICKY_NOTES_*` environment variables.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(config::Environment::with_prefix("STICKY_NOTES"))
    }

    fn from_source<S>(source: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder().add_source(source).build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_toast_duration_ms() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::with_prefix("STICKY_NOTES").source(Some(map))
    }

    #[test]
    fn can_load_defaults() {
        let config = ClientConfig::from_source(environment(&[])).unwrap();

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
    }

    #[test]
    fn can_load_overrides() {
        let config = ClientConfig::from_source(environment(&[
            ("STICKY_NOTES_API_BASE_URL", "https://notes.example.com"),
            ("STICKY_NOTES_TOAST_DURATION_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://notes.example.com");
        assert_eq!(config.toast_duration_ms, 1500);
    }

    #[test]
    fn can_ignore_unprefixed_variables() {
        let config =
            ClientConfig::from_source(environment(&[("API_BASE_URL", "http://elsewhere")])).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn can_reject_non_numeric_toast_duration() {
        let result =
            ClientConfig::from_source(environment(&[("STICKY_NOTES_TOAST_DURATION_MS", "soon")]));
        assert!(result.is_err());
    }
}
