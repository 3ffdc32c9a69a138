//! Session Manager
//!
//! Single owner of the refresh state: callers never talk to the refresh
//! endpoint themselves. On an unauthorized response they call
//! [`SessionManager::handle_unauthorized`], which either starts the one
//! allowed refresh or queues the caller on the refresh already in flight.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

use crate::error::AuthError;
use crate::pkce::PkceParams;
use crate::store::TokenStore;
use crate::tokens::{RefreshRequest, TokenPair, TokenResponse};
use crate::Result;

const REFRESH_TIMEOUT_SECS: u64 = 30;

/// Session state published to the embedding shell
///
/// The shell subscribes and navigates to `redirect_to` whenever the
/// session expires; no authenticated state survives an `Expired`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Expired { redirect_to: String },
}

/// Refresh cycle state: IDLE -> REFRESHING -> IDLE
///
/// Encoding the flag and the queue as one enum makes it impossible for
/// them to disagree: waiters exist only while a refresh is in flight.
enum RefreshState {
    Idle,
    Refreshing {
        waiters: Vec<oneshot::Sender<Result<String>>>,
    },
}

struct Inner {
    store: TokenStore,
    /// Bare client for the refresh call itself; it must not go through
    /// the attach/retry path or a failing refresh would recurse
    http: reqwest::Client,
    refresh_url: String,
    login_path: String,
    refresh_timeout: Duration,
    refresh: Mutex<RefreshState>,
    status_tx: watch::Sender<SessionStatus>,
}

pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    pub fn new(
        store: TokenStore,
        refresh_url: impl Into<String>,
        login_path: impl Into<String>,
    ) -> Self {
        Self::with_timeout(
            store,
            refresh_url,
            login_path,
            Duration::from_secs(REFRESH_TIMEOUT_SECS),
        )
    }

    /// Like [`SessionManager::new`] with an explicit refresh timeout
    pub fn with_timeout(
        store: TokenStore,
        refresh_url: impl Into<String>,
        login_path: impl Into<String>,
        refresh_timeout: Duration,
    ) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Active);

        Self {
            inner: Arc::new(Inner {
                store,
                http: reqwest::Client::new(),
                refresh_url: refresh_url.into(),
                login_path: login_path.into(),
                refresh_timeout,
                refresh: Mutex::new(RefreshState::Idle),
                status_tx,
            }),
        }
    }

    /// Attach the current access token to an outgoing request
    ///
    /// Always proceeds: with no stored token (or an unreadable store) the
    /// builder is returned untouched and the request goes out anonymous.
    pub fn attach_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.inner.store.access_token() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read access token; sending without");
                builder
            }
        }
    }

    /// Obtain a fresh access token after an unauthorized response
    ///
    /// If a refresh is already in flight the caller queues on it and
    /// settles when it does. Otherwise this caller becomes the refresher.
    /// On refresh failure the session is cleared, every queued caller is
    /// rejected, and [`SessionStatus::Expired`] is published.
    pub async fn handle_unauthorized(&self) -> Result<String> {
        let rx = {
            let mut state = self.inner.refresh.lock();
            match &mut *state {
                RefreshState::Refreshing { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                RefreshState::Idle => {
                    *state = RefreshState::Refreshing {
                        waiters: Vec::new(),
                    };
                    None
                }
            }
        };

        if let Some(rx) = rx {
            tracing::debug!("Refresh already in flight; queueing");
            return match rx.await {
                Ok(result) => result,
                // The refresher settles the queue in all paths; a dropped
                // sender means its task was cancelled mid-refresh
                Err(_) => Err(AuthError::RefreshFailed(
                    "refresh was cancelled".to_string(),
                )),
            };
        }

        let outcome = self.run_refresh().await;
        self.settle(outcome)
    }

    /// Perform the actual refresh call; the caller owns the REFRESHING state
    async fn run_refresh(&self) -> Result<String> {
        let refresh_token = self
            .inner
            .store
            .refresh_token()?
            .ok_or(AuthError::NotAuthenticated)?;

        tracing::debug!("Refreshing access token");

        let response = self
            .inner
            .http
            .post(&self.inner.refresh_url)
            .timeout(self.inner.refresh_timeout)
            .json(&RefreshRequest {
                refresh_token: refresh_token.clone(),
            })
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("refresh request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::RefreshFailed(format!(
                "refresh rejected ({status}): {body}"
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("invalid refresh response: {e}")))?;

        // The backend may rotate the refresh token; keep the old one if not
        let pair = TokenPair {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token.unwrap_or(refresh_token),
            token_type: tokens.token_type.unwrap_or_else(|| "Bearer".to_string()),
        };
        self.inner.store.save(&pair)?;

        tracing::info!("Access token refreshed");

        Ok(pair.access_token)
    }

    /// Settle the refresh cycle: back to IDLE, queue drained exactly once
    fn settle(&self, outcome: Result<String>) -> Result<String> {
        let waiters = {
            let mut state = self.inner.refresh.lock();
            match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::Refreshing { waiters } => waiters,
                RefreshState::Idle => Vec::new(),
            }
        };

        match &outcome {
            Ok(token) => {
                for waiter in waiters {
                    let _ = waiter.send(Ok(token.clone()));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, queued = waiters.len(), "Refresh failed; expiring session");
                let message = e.to_string();
                self.expire_session();
                for waiter in waiters {
                    let _ = waiter.send(Err(AuthError::RefreshFailed(message.clone())));
                }
            }
        }

        outcome
    }

    /// Clear all session state and tell the shell to navigate to login
    fn expire_session(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::error!(error = %e, "Failed to clear tokens");
        }
        self.inner.status_tx.send_replace(SessionStatus::Expired {
            redirect_to: self.inner.login_path.clone(),
        });
    }

    /// Store a freshly issued pair (login or explicit re-auth)
    pub fn set_tokens(&self, pair: &TokenPair) -> Result<()> {
        self.inner.store.save(pair)?;
        self.inner.status_tx.send_replace(SessionStatus::Active);
        Ok(())
    }

    /// Drop the stored pair without forcing a redirect (user logout)
    pub fn clear_tokens(&self) -> Result<()> {
        self.inner.store.clear()?;
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.store.access_token().ok().flatten()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.store.refresh_token().ok().flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_authenticated()
    }

    /// Watch session transitions; current value is observable immediately
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status_tx.subscribe()
    }

    pub fn login_path(&self) -> &str {
        &self.inner.login_path
    }

    /// Start a login attempt: generate PKCE parameters and stash the
    /// verifier and state until the callback completes the exchange
    pub fn begin_login(&self) -> Result<PkceParams> {
        let params = PkceParams::generate();
        self.inner.store.stash_login(&params)?;
        Ok(params)
    }

    /// Verify the state echoed back by the identity provider
    pub fn verify_login_state(&self, returned: &str) -> Result<()> {
        match self.inner.store.login_state()? {
            Some(expected) if expected == returned => Ok(()),
            Some(_) => Err(AuthError::StateMismatch),
            None => Err(AuthError::NoLoginInProgress),
        }
    }

    /// Take the stashed verifier for the token exchange (single use)
    pub fn take_login_verifier(&self) -> Result<String> {
        self.inner
            .store
            .take_login_verifier()?
            .ok_or(AuthError::NoLoginInProgress)
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
