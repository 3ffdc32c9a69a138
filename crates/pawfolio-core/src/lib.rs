//! Pawfolio Core
//!
//! Assembly layer for the pet-care client: configuration, the aggregated
//! error type, and the `App` container that wires storage, session and
//! API client together for the embedding shell.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export the member crates' public surface
pub use pawfolio_api::{ApiClient, ApiError, Provider, UploadFile};
pub use pawfolio_auth::{
    AuthError, PkceParams, SessionManager, SessionStatus, TokenPair, TokenStore,
};
pub use pawfolio_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
