//! Optional TOML configuration.
//!
//! Loaded once at startup from `~/.veneer/config.toml`; a missing or broken
//! file falls back to defaults with a logged warning, never an error.

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use veneer_client::DEFAULT_BASE_URL;

/// Environment variable overriding the configured backend base URL.
pub const BACKEND_URL_ENV: &str = "VENEER_BACKEND_URL";

#[derive(Debug, Default, Deserialize)]
pub struct VeneerConfig {
    pub backend: Option<BackendSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BackendSection {
    pub base_url: Option<String>,
}

impl VeneerConfig {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// The backend base URL: environment override first, then config file,
    /// then the built-in default.
    #[must_use]
    pub fn resolve_base_url(&self) -> String {
        if let Ok(url) = env::var(BACKEND_URL_ENV)
            && !url.trim().is_empty()
        {
            return url;
        }

        self.backend
            .as_ref()
            .and_then(|backend| backend.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".veneer").join("config.toml"))
}
