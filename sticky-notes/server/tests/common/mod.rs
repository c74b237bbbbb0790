use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use sticky_notes_server::task::{InMemoryTaskStore, SeaOrmTaskStore, TaskService};

/// Connects to a fresh in-memory SQLite database with all migrations applied.
///
/// The pool is pinned to a single connection because every SQLite memory
/// connection is its own database.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[allow(dead_code)]
pub async fn database_service() -> anyhow::Result<(TaskService, Arc<DatabaseConnection>)> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let db = Arc::new(setup_db().await?);
    let store = SeaOrmTaskStore::new(db.clone());
    Ok((TaskService::new(Arc::new(store)), db))
}

#[allow(dead_code)]
pub fn in_memory_service() -> (TaskService, Arc<InMemoryTaskStore>) {
    let _ = tracing_subscriber::fmt().try_init();
    let store = Arc::new(InMemoryTaskStore::new());
    (TaskService::new(store.clone()), store)
}
