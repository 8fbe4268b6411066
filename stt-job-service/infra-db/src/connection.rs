use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use stt_domain::DomainError;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub sqlx_logging: bool,
}

pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection, DomainError> {
    let mut options = ConnectOptions::new(settings.url.clone());

    // Each pooled connection to an in-memory SQLite database sees its own empty
    // database, so the pool is pinned to one long-lived connection.
    if is_in_memory_sqlite(&settings.url) {
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(settings.max_connections.max(1))
            .min_connections(settings.min_connections.min(settings.max_connections));
    }
    options
        .connect_timeout(settings.connect_timeout)
        .sqlx_logging(settings.sqlx_logging);

    tracing::debug!(
        backend = settings.url.split(':').next().unwrap_or("unknown"),
        max_connections = settings.max_connections,
        "connecting to database"
    );

    Database::connect(options).await.map_err(DomainError::storage)
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite") && url.contains(":memory:")
}
