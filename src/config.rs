//! Configuration handling for the TUI

use crate::api::DEFAULT_BASE_URL;
use crate::state::Mode;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the API address
pub const API_URL_ENV: &str = "FORMS_API_URL";
/// Environment variable overriding the session cookie
pub const SESSION_COOKIE_ENV: &str = "FORMS_SESSION_COOKIE";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// API base URL
    pub api_url: Option<String>,
    /// Cookie header value of a logged-in session
    pub session_cookie: Option<String>,
    /// Controller to start in
    pub mode: Option<Mode>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "forms", "forms-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply overrides from the environment
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; blank values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_blank(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(cookie) = non_blank(SESSION_COOKIE_ENV) {
            self.session_cookie = Some(cookie);
        }
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}
