//! Membership watch errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a membership watch.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum WatchError {
    /// Could not reach the coordination service
    #[error("Cannot connect to {hosts}: {message}")]
    Connect {
        /// Connect string that was tried
        hosts: String,
        /// Description of the connection failure
        message: String,
    },

    /// Listing or watching the member directory failed
    #[error("Watch on {path} failed: {message}")]
    Session {
        /// ZooKeeper path being watched
        path: String,
        /// Description of the failure
        message: String,
    },

    /// A member znode holds data that is not a ServerSet entry
    #[error("Malformed member {path}: {message}")]
    MalformedMember {
        /// Member znode path
        path: String,
        /// Parser message
        message: String,
    },

    /// The watch stopped delivering change notifications
    #[error("Membership watch closed")]
    Closed,
}
