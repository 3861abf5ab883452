use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why page acquisition gave up. Every variant is reported once; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AcquisitionError {
    /// Browser or driver could not start (or its first tab could not be prepared).
    #[error("failed to launch browser session: {message}")]
    SessionLaunch { message: String },

    /// The content marker never appeared.
    #[error(
        "timed out after {timeout_ms}ms waiting for an element with class containing \
         '{marker}'; the page layout may have changed or a consent dialog was not dismissed"
    )]
    WaitTimeout { marker: String, timeout_ms: u64 },

    /// Any other browser fault during navigation or waiting, passed through verbatim.
    #[error("{message}")]
    Navigation { message: String },
}

/// Why extraction could not produce standings.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExtractionError {
    #[error("standings table not found")]
    TableNotFound,

    #[error("table found but no rows")]
    NoRows,

    #[error("no team data scraped")]
    NoTeamData,

    #[error("failed to parse standings page: {message}")]
    Parse { message: String },
}

impl ExtractionError {
    /// Layout mismatches mean the selector set no longer matches the live site.
    pub fn is_layout_mismatch(&self) -> bool {
        !matches!(self, ExtractionError::Parse { .. })
    }
}

/// Error raised by a browser session backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SessionError(pub String);

impl SessionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<chromiumoxide::error::CdpError> for SessionError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        SessionError(e.to_string())
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
