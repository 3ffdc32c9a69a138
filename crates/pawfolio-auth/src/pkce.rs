//! PKCE (Proof Key for Code Exchange) helpers
//!
//! The login flow is a public-client OAuth flow: the code challenge goes
//! into the authorization URL, the verifier stays local until the token
//! exchange in the callback.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure code verifier
///
/// 32 random bytes, base64url-encoded without padding: 43 characters,
/// within the 43-128 range RFC 7636 requires.
pub fn generate_code_verifier() -> String {
    use rand::Rng;
    let random_bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Derive the S256 code challenge from a verifier
pub fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let hash = hasher.finalize();
    URL_SAFE_NO_PAD.encode(hash)
}

/// Generate a random state parameter for CSRF protection
pub fn generate_state() -> String {
    use rand::Rng;
    let random_bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// PKCE parameters for one login attempt
#[derive(Debug, Clone)]
pub struct PkceParams {
    /// Kept local; used during the token exchange
    pub verifier: String,
    /// Included in the authorization URL
    pub challenge: String,
    /// Included in the authorization URL, verified in the callback
    pub state: String,
}

impl PkceParams {
    pub fn generate() -> Self {
        let verifier = generate_code_verifier();
        let challenge = generate_code_challenge(&verifier);
        let state = generate_state();

        Self {
            verifier,
            challenge,
            state,
        }
    }
}
