//! # mczoorouter Types
//!
//! Core types, models, and error definitions for mczoorouter.
//!
//! - **`error`** - Typed error hierarchy for publication, membership watches and settings
//! - **`models`** - Domain models (Endpoint, Snapshot, RenderedConfig, SyncSettings)
//!
//! ## Architecture Role
//!
//! ```text
//!          mczoorouter-types (this crate)
//!                    │
//!                    ▼
//!            mczoorouter-core
//!                    │
//!                    ▼
//!           mczoorouter-server
//! ```

pub mod error;
pub mod models;

pub use error::{PublishError, Result, SettingsError, SyncError, WatchError};

pub use models::{
    Endpoint, Pool, RenderedConfig, Snapshot, SyncSettings, PRIMARY_POOL, SERVERSET_BASE_PATH,
};
