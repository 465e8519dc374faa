pub mod constants;
pub mod contact;
pub mod db;

use thiserror::Error;

/// Generic persistence result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic persistence error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("SurrealDB connection error {0}")]
    SurrealConnection(#[from] surrealdb::Error),

    #[error("Failed to insert into database: {0}")]
    InsertFailed(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraint(String),

    #[error("no such {0} entity {1}")]
    NoSuchEntity(String, String),
}

pub use contact::ContactStoreApi;
pub use db::{SurrealDbConfig, contact::SurrealContactStore, get_surreal_db};
