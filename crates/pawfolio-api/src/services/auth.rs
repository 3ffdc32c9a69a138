//! Login flow: authorization URL, callback exchange, logout
//!
//! The flow is OAuth with PKCE through the backend: the client asks for a
//! provider-specific authorization URL (carrying the code challenge and
//! state), the identity provider redirects back with a code, and the
//! callback exchange turns code + verifier into a token pair.

use reqwest::Method;
use serde::Deserialize;

use pawfolio_auth::TokenPair;

use crate::client::ApiClient;
use crate::Result;

/// Supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Apple => "apple",
        }
    }
}

/// The backend wraps the provider URL in a message envelope
#[derive(Debug, Deserialize)]
struct AuthUrlResponse {
    message: String,
}

impl ApiClient {
    /// Start a login: generates and stashes PKCE parameters, returns the
    /// identity provider URL the shell should open
    pub async fn social_auth_url(&self, provider: Provider, redirect_uri: &str) -> Result<String> {
        let params = self.session().begin_login()?;

        let request = self
            .request(
                Method::GET,
                &format!("/auth/social/{}", provider.as_str()),
            )
            .query(&[
                ("code_challenge", params.challenge.as_str()),
                ("code_challenge_method", "S256"),
                ("state", params.state.as_str()),
                ("redirect_uri", redirect_uri),
            ]);

        let response: AuthUrlResponse = self.execute(request).await?;
        Ok(response.message)
    }

    /// Finish a login from the provider callback: verify state, exchange
    /// code + verifier for tokens, and store them
    pub async fn complete_login(&self, code: &str, state: &str) -> Result<TokenPair> {
        self.session().verify_login_state(state)?;
        let verifier = self.session().take_login_verifier()?;

        let request = self
            .request(Method::GET, "/auth/callback")
            .query(&[("code", code), ("code_verifier", verifier.as_str())]);

        let pair: TokenPair = self.execute(request).await?;
        self.session().set_tokens(&pair)?;

        tracing::info!("Login completed");
        Ok(pair)
    }

    /// Log out: revoke the refresh token server-side when possible, then
    /// always drop the local session
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh_token) = self.session().refresh_token() {
            let request = self
                .request(Method::POST, "/auth/logout")
                .json(&serde_json::json!({ "refreshToken": refresh_token }));

            if let Err(e) = self.execute_empty(request).await {
                tracing::warn!(error = %e, "Logout call failed; clearing local session anyway");
            }
        }

        self.session().clear_tokens()?;
        Ok(())
    }
}
