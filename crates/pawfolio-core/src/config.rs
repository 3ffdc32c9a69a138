//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the pet-care backend
    pub api_base_url: String,
    /// Path to the local session database
    pub database_path: PathBuf,
    /// Where the shell navigates when the session expires
    pub login_path: String,
    /// Timeout applied to every backend call, refresh included
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            database_path: data_dir.join("pawfolio.db"),
            login_path: "/login".to_string(),
            request_timeout_secs: default_timeout_secs(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Pawfolio"))
            .unwrap_or_else(|| PathBuf::from(".pawfolio"))
    }

    /// Refresh endpoint derived from the base URL
    pub fn refresh_url(&self) -> String {
        format!(
            "{}/api/auth/refresh",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
