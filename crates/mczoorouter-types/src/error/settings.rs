//! Startup settings errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating startup settings.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SettingsError {
    /// One or more fields failed validation
    #[error("Invalid settings: {message}")]
    Invalid {
        /// Validator report
        message: String,
    },

    /// A specific field holds an unusable value
    #[error("Invalid value for {field}: {message}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Description of the problem
        message: String,
    },
}
