//! Config publication errors.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering or writing the mcrouter config.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PublishError {
    /// Config could not be serialized
    #[error("Config serialize error: {message}")]
    Serialize {
        /// Description of the serializer failure
        message: String,
    },

    /// Config could not be written (permission denied, disk full, etc)
    #[error("Config write error for {path}: {message}")]
    Write {
        /// Destination path
        path: String,
        /// Description of the write failure
        message: String,
    },
}

impl PublishError {
    /// Create a serialize error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::Serialize { message: e.to_string() }
    }

    /// Create a write error from an IO error.
    pub fn from_io_error(path: &Path, e: &std::io::Error) -> Self {
        Self::Write { path: path.display().to_string(), message: e.to_string() }
    }
}
