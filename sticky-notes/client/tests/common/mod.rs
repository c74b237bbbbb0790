use std::sync::Arc;
use sticky_notes_server::config::Config;
use sticky_notes_server::task::{InMemoryTaskStore, TaskService};
use sticky_notes_server::web::create_app;
use tokio::net::TcpListener;

/// Serves the task API over an in-memory store on an ephemeral port and
/// returns its base URL.
pub async fn spawn_server() -> anyhow::Result<String> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        allowed_origin: "http://localhost:5173".to_string(),
    };
    let service = TaskService::new(Arc::new(InMemoryTaskStore::new()));
    let app = create_app(service, &config)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("Test server stopped: {}", err);
        }
    });

    Ok(format!("http://{}", address))
}
