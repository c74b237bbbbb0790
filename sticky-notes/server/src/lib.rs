pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        pub database_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
        /// The single origin allowed to make cross-origin requests.
        #[serde(default = "default_allowed_origin")]
        pub allowed_origin: String,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_source(config::Environment::default())
        }

        fn from_source<S>(source: S) -> anyhow::Result<Self>
        where
            S: config::Source + Send + Sync + 'static,
        {
            let settings = config::Config::builder().add_source(source).build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_allowed_origin() -> String {
        "http://localhost:5173".to_string()
    }

}
pub mod entities;
pub mod task;
pub mod web;
