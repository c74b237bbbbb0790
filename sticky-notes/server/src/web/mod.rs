use axum::Router;
use axum::http::{HeaderValue, Method, header};
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::api::TaskState;
use crate::task::{SeaOrmTaskStore, TaskService};

pub mod api;

/// Builds the full application router around an already constructed service.
///
/// Cross-origin requests are only allowed from `config.allowed_origin`.
pub fn create_app(service: TaskService, config: &Config) -> anyhow::Result<Router> {
    let allowed_origin = HeaderValue::from_str(&config.allowed_origin)?;
    let cors = CorsLayer::new()
        .allow_origin([allowed_origin])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api::create_api_router(TaskState::new(service)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );
    Ok(app)
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let store = SeaOrmTaskStore::new(Arc::new(db));
    let service = TaskService::new(Arc::new(store));
    let app = create_app(service, &config)?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
