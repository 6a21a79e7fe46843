//! Durable storage for the current session identifier.
//!
//! Exactly one value survives a process restart: the session id, stored as a
//! small versioned JSON document in the data directory. No expiry is managed
//! here; a stale id is detected by the backend's not-found answer during
//! restore. Persistence failures are logged and swallowed - losing the id
//! costs a restore, never the session itself.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use veneer_types::SessionId;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    session_id: String,
    version: u32,
}

/// File-backed store for the persisted session identifier.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Filename for the persisted session document.
    pub const FILENAME: &'static str = "session.json";

    /// Current schema version. Documents with another version are ignored.
    const CURRENT_VERSION: u32 = 1;

    /// Store backed by an explicit path (tests use a temp directory).
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform data directory, falling back to a dotdir in the
    /// working directory when no data dir is known.
    #[must_use]
    pub fn at_default_location() -> Self {
        let dir = dirs::data_dir()
            .map(|dir| dir.join("veneer"))
            .unwrap_or_else(|| PathBuf::from(".veneer"));
        Self::at(dir.join(Self::FILENAME))
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The persisted identifier, if one exists and parses.
    #[must_use]
    pub fn load(&self) -> Option<SessionId> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read session store: {e}");
                return None;
            }
        };

        let persisted: PersistedSession = match serde_json::from_str(&content) {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to parse session store: {e}");
                return None;
            }
        };

        if persisted.version != Self::CURRENT_VERSION {
            tracing::warn!(
                version = persisted.version,
                "Ignoring session store with unknown schema version"
            );
            return None;
        }

        SessionId::new(persisted.session_id).ok()
    }

    /// Persist the identifier, replacing any previous one.
    pub fn save(&self, id: &SessionId) {
        let persisted = PersistedSession {
            session_id: id.as_str().to_string(),
            version: Self::CURRENT_VERSION,
        };

        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %parent.display(), "Failed to create session store dir: {e}");
            return;
        }

        match serde_json::to_string_pretty(&persisted) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), "Failed to persist session: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session store: {e}"),
        }
    }

    /// Remove the persisted identifier. A missing file is already clear.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), "Failed to clear session store: {e}");
        }
    }
}
