//! Preference store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when the preference store cannot be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("failed to access preference store {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The backing file exists but does not hold a JSON object of strings.
    #[error("preference store {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The host refused access (storage disabled, quota exceeded).
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}
