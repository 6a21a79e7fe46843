//! Session identity and uploaded-file descriptors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque, server-issued session identifier.
///
/// The client never mints these; they only enter the system through an
/// upload response or the persisted copy of a previous one. Guaranteed
/// non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

#[derive(Debug, Error)]
#[error("session identifier must not be empty")]
pub struct EmptySessionIdError;

impl SessionId {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptySessionIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptySessionIdError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = EmptySessionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for one uploaded file, as reported by the backend.
///
/// Immutable once received. The descriptor set is replaced wholesale on every
/// upload; there is no incremental add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Any additional server-filled metadata returned at upload time.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FileDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            extra: BTreeMap::new(),
        }
    }
}

/// A local file staged for upload: the picker reads it, the upload call
/// streams it out as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// File kinds the backend knows how to analyze: markup, stylesheets, scripts
/// and their typed variants, markup-data, a handful of general-purpose source
/// extensions, and archive bundles.
///
/// Enforced at the file-selection boundary only; the upload path trusts the
/// picker and does not re-validate.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "scss", "js", "jsx", "ts", "tsx", "xml", "vue", "py", "java", "php",
    "zip",
];

/// Whether a file name carries an extension from [`ALLOWED_EXTENSIONS`].
#[must_use]
pub fn is_allowed_file(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(ext))
}
