//! # mczoorouter Core
//!
//! Keeps an mcrouter routing config in step with a ServerSet.
//!
//! ```text
//! watch/       # MembershipWatch trait, ZooKeeper ServerSet watcher, in-memory watch
//! ordering.rs  # Snapshot -> shard-ordered host:port list
//! render.rs    # host:port list -> RenderedConfig
//! publish.rs   # RenderedConfig -> pretty JSON -> atomic file replace
//! sync.rs      # bootstrap render + one render per change notification
//! ```

#![cfg_attr(
    test,
    allow(clippy::panic, clippy::print_stdout, clippy::assertions_on_result_states)
)]

pub mod ordering;
pub mod publish;
pub mod render;
pub mod sync;
pub mod watch;

pub use ordering::order_addresses;
pub use publish::{to_pretty_json, FilePublisher, Publisher};
pub use render::render;
pub use sync::{CycleOutcome, SyncStats, Synchronizer};
pub use watch::{MembershipWatch, ServerSetWatch, StaticWatch, StaticWatchHandle};
