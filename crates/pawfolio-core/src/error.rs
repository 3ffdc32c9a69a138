//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] pawfolio_storage::StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] pawfolio_auth::AuthError),

    #[error("API error: {0}")]
    Api(#[from] pawfolio_api::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
