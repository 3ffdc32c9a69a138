//! Persisted token slot
//!
//! One process-wide slot for the token pair, plus scratch keys for the
//! PKCE verifier and state while a login round trip is in progress.

use pawfolio_storage::Database;

use crate::pkce::PkceParams;
use crate::tokens::TokenPair;
use crate::Result;

const ACCESS_TOKEN_KEY: &str = "auth.access_token";
const REFRESH_TOKEN_KEY: &str = "auth.refresh_token";
const TOKEN_TYPE_KEY: &str = "auth.token_type";
const PKCE_VERIFIER_KEY: &str = "auth.pkce_verifier";
const LOGIN_STATE_KEY: &str = "auth.login_state";

pub struct TokenStore {
    db: Database,
}

impl TokenStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Overwrite the stored pair atomically from the caller's view:
    /// readers go through the same connection lock
    pub fn save(&self, pair: &TokenPair) -> Result<()> {
        self.db.set_value(ACCESS_TOKEN_KEY, &pair.access_token)?;
        self.db.set_value(REFRESH_TOKEN_KEY, &pair.refresh_token)?;
        self.db.set_value(TOKEN_TYPE_KEY, &pair.token_type)?;
        Ok(())
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        Ok(self.db.get_value(ACCESS_TOKEN_KEY)?)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.db.get_value(REFRESH_TOKEN_KEY)?)
    }

    /// Remove both tokens; absent keys are not an error
    pub fn clear(&self) -> Result<()> {
        self.db.remove_value(ACCESS_TOKEN_KEY)?;
        self.db.remove_value(REFRESH_TOKEN_KEY)?;
        self.db.remove_value(TOKEN_TYPE_KEY)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.access_token(), Ok(Some(_)))
    }

    /// Stash the verifier and state for the duration of a login attempt
    pub fn stash_login(&self, params: &PkceParams) -> Result<()> {
        self.db.set_value(PKCE_VERIFIER_KEY, &params.verifier)?;
        self.db.set_value(LOGIN_STATE_KEY, &params.state)?;
        Ok(())
    }

    pub fn login_state(&self) -> Result<Option<String>> {
        Ok(self.db.get_value(LOGIN_STATE_KEY)?)
    }

    /// Read and remove the stashed verifier; the state goes with it
    pub fn take_login_verifier(&self) -> Result<Option<String>> {
        let verifier = self.db.get_value(PKCE_VERIFIER_KEY)?;
        self.db.remove_value(PKCE_VERIFIER_KEY)?;
        self.db.remove_value(LOGIN_STATE_KEY)?;
        Ok(verifier)
    }
}

impl Clone for TokenStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn test_save_and_clear() {
        let store = TokenStore::new(Database::open_in_memory().unwrap());

        assert!(!store.is_authenticated());

        store.save(&pair()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().unwrap().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().unwrap().as_deref(), Some("refresh-1"));

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.refresh_token().unwrap(), None);
    }

    #[test]
    fn test_login_stash_is_single_use() {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let params = PkceParams::generate();

        store.stash_login(&params).unwrap();
        assert_eq!(store.login_state().unwrap(), Some(params.state.clone()));

        let verifier = store.take_login_verifier().unwrap();
        assert_eq!(verifier, Some(params.verifier.clone()));

        // Second take finds nothing
        assert_eq!(store.take_login_verifier().unwrap(), None);
        assert_eq!(store.login_state().unwrap(), None);
    }
}
