//! Membership sources feeding the synchronizer.

mod member;
mod serverset;
mod static_watch;

pub use member::ServerSetMember;
pub use serverset::ServerSetWatch;
pub use static_watch::{StaticWatch, StaticWatchHandle};

use async_trait::async_trait;
use mczoorouter_types::{Snapshot, WatchError};

/// A push-style view of cluster membership.
#[async_trait]
pub trait MembershipWatch: Send {
    /// Latest known membership.
    fn current_snapshot(&self) -> Snapshot;

    /// Wait for the next membership change.
    ///
    /// Each call consumes exactly one notification. Returns
    /// [`WatchError::Closed`] once no more notifications can arrive.
    async fn changed(&mut self) -> Result<(), WatchError>;
}
