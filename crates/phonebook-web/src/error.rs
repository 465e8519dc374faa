use phonebook_api::service;
use thiserror::Error;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from the phonebook service layer
    #[error("Service error: {0}")]
    Service(#[from] service::Error),
}
