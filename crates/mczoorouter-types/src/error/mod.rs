//! Typed error definitions for mczoorouter.
//!
//! Every error here is serializable (serde), displayable for logs, and
//! matchable by variant.

mod publish;
mod settings;
mod watch;

pub use publish::PublishError;
pub use settings::SettingsError;
pub use watch::WatchError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum SyncError {
    /// Rendering or writing the config failed
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Membership watch failed
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Invalid startup settings
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Standard Result type using SyncError.
pub type Result<T> = std::result::Result<T, SyncError>;
