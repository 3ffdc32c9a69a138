//! Application container
//!
//! Rust owns all client state; the shell (whatever renders the UI) is a
//! stateless consumer of this container.

use pawfolio_api::ApiClient;
use pawfolio_auth::{SessionManager, TokenStore};
use pawfolio_storage::Database;

use crate::config::Config;
use crate::Result;

/// Wired-up client: storage, session manager and API client
pub struct App {
    config: Config,
    db: Database,
    session: SessionManager,
    api: ApiClient,
}

impl App {
    /// Open (or create) the local database and wire everything up
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Wire against an existing database (in-memory in tests)
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(config.request_timeout_secs);
        let store = TokenStore::new(db.clone());
        let session = SessionManager::with_timeout(
            store,
            config.refresh_url(),
            config.login_path.clone(),
            timeout,
        );
        let api = ApiClient::with_timeout(&config.api_base_url, session.clone(), timeout)?;

        tracing::info!(
            api_base_url = %config.api_base_url,
            "Initialized client"
        );

        Ok(Self {
            config,
            db,
            session,
            api,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfolio_auth::{SessionStatus, TokenPair};
    use std::path::PathBuf;

    fn app() -> App {
        let config = Config::new(PathBuf::from("/tmp/pawfolio-test"));
        App::with_database(config, Database::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_wiring() {
        let app = app();
        assert!(!app.session().is_authenticated());
        assert_eq!(app.api().base_url(), "http://localhost:8080");
        assert_eq!(*app.session().subscribe().borrow(), SessionStatus::Active);
    }

    #[test]
    fn test_session_shared_between_api_and_app() {
        let app = app();
        app.session()
            .set_tokens(&TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
                token_type: "Bearer".to_string(),
            })
            .unwrap();

        // The API client sees the same session
        assert!(app.api().session().is_authenticated());
    }
}
