//! Pawfolio API Client
//!
//! Typed REST client for the pet-care backend. Every request goes through
//! the session manager: the current access token is attached on the way
//! out, and a 401 response triggers a single coalesced refresh followed by
//! one replay of the original request.

mod client;
mod error;
mod services;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use services::auth::Provider;
pub use services::media::UploadFile;
pub use types::*;

pub type Result<T> = std::result::Result<T, ApiError>;
