//! Pawfolio Storage Layer
//!
//! SQLite-based keyed store for client-side state that must survive a
//! process restart: the session token pair and in-flight OAuth parameters.
//! The contract is intentionally small: settable, gettable, clearable
//! string values under string keys.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
