//! In-memory membership watch, driven by hand.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

use mczoorouter_types::{Snapshot, WatchError};

use super::MembershipWatch;

/// Watch whose membership is set through a [`StaticWatchHandle`].
pub struct StaticWatch {
    snapshot: Arc<RwLock<Snapshot>>,
    events: mpsc::UnboundedReceiver<()>,
}

/// Control side of a [`StaticWatch`]. Dropping every handle closes the watch.
#[derive(Clone)]
pub struct StaticWatchHandle {
    snapshot: Arc<RwLock<Snapshot>>,
    events: mpsc::UnboundedSender<()>,
}

impl StaticWatch {
    pub fn new(initial: Snapshot) -> (Self, StaticWatchHandle) {
        let snapshot = Arc::new(RwLock::new(initial));
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { snapshot: Arc::clone(&snapshot), events: rx },
            StaticWatchHandle { snapshot, events: tx },
        )
    }
}

impl StaticWatchHandle {
    /// Replace the membership and fire one change notification.
    pub fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write() = snapshot;
        self.notify();
    }

    /// Replace the membership without notifying.
    pub fn set_quietly(&self, snapshot: Snapshot) {
        *self.snapshot.write() = snapshot;
    }

    /// Fire a change notification without touching the membership.
    pub fn notify(&self) {
        if self.events.send(()).is_err() {
            tracing::debug!("Static watch receiver dropped, notification lost");
        }
    }
}

#[async_trait]
impl MembershipWatch for StaticWatch {
    fn current_snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    async fn changed(&mut self) -> Result<(), WatchError> {
        self.events.recv().await.ok_or(WatchError::Closed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mczoorouter_types::Endpoint;

    #[tokio::test]
    async fn test_replace_notifies_once() {
        let (mut watch, handle) = StaticWatch::new(Snapshot::empty());
        handle.replace(Snapshot::new(vec![Endpoint::new("cache1", 11211, 0)]));

        watch.changed().await.unwrap();
        assert_eq!(watch.current_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_when_handles_dropped() {
        let (mut watch, handle) = StaticWatch::new(Snapshot::empty());
        handle.notify();
        drop(handle);

        assert!(watch.changed().await.is_ok());
        assert_eq!(watch.changed().await, Err(WatchError::Closed));
    }
}
