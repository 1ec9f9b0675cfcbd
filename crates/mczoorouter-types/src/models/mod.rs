//! Core domain models for mczoorouter.

mod endpoint;
mod rendered;
mod settings;

pub use endpoint::{Endpoint, Snapshot};
pub use rendered::{pool_route, Pool, RenderedConfig, PRIMARY_POOL};
pub use settings::{SyncSettings, SERVERSET_BASE_PATH};
