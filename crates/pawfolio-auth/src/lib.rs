//! Pawfolio Session Management
//!
//! Owns the bearer-token lifecycle for the whole client:
//! - the token pair (access + refresh) persisted in the keyed store
//! - transparent recovery from unauthorized responses
//! - at most one refresh call in flight; concurrent callers queue on it
//! - session-expiry notification so the shell can navigate to login
//!
//! PKCE helpers for the OAuth login flow live here as well, since the
//! verifier and state have to survive the round trip through the
//! identity provider in the same store the tokens live in.

mod error;
mod manager;
mod pkce;
mod store;
mod tokens;

pub use error::AuthError;
pub use manager::{SessionManager, SessionStatus};
pub use pkce::{generate_code_challenge, generate_code_verifier, generate_state, PkceParams};
pub use store::TokenStore;
pub use tokens::{TokenPair, TokenResponse};

pub type Result<T> = std::result::Result<T, AuthError>;
