//! Auth error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request was not authorized")]
    Unauthorized,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Request already retried once after a token refresh")]
    RetryExhausted,

    #[error("No refresh token stored")]
    NotAuthenticated,

    #[error("Login state mismatch")]
    StateMismatch,

    #[error("No login attempt in progress")]
    NoLoginInProgress,

    #[error("Storage error: {0}")]
    Storage(#[from] pawfolio_storage::StorageError),
}
