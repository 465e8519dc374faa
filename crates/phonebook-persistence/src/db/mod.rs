use super::Result;
use log::info;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
};

pub mod contact;

#[derive(Debug, Clone)]
pub struct SurrealDbConfig {
    pub connection_string: String,
    pub namespace: String,
    pub database: String,
}

impl SurrealDbConfig {
    pub fn new(connection_string: &str, namespace: &str, database: &str) -> Self {
        Self {
            connection_string: connection_string.to_owned(),
            namespace: namespace.to_owned(),
            database: database.to_owned(),
        }
    }
}

/// Connects to the database behind the configured connection string, e.g. `mem://` for an
/// in-memory instance, `rocksdb://data/surrealdb` or `ws://localhost:8000`
pub async fn get_surreal_db(config: &SurrealDbConfig) -> Result<Surreal<Any>> {
    let db = connect(config.connection_string.as_str()).await?;
    db.use_ns(&config.namespace)
        .use_db(&config.database)
        .await?;
    info!(
        "Connected to SurrealDB at {} ({}/{})",
        config.connection_string, config.namespace, config.database
    );
    Ok(db)
}

#[cfg(test)]
pub async fn get_memory_db(namespace: &str, database: &str) -> Result<Surreal<Any>> {
    get_surreal_db(&SurrealDbConfig::new("mem://", namespace, database)).await
}
