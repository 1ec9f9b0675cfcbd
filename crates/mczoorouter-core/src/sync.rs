//! Membership -> mcrouter config synchronization loop.
//!
//! One task, one render at a time. On start the current snapshot is rendered
//! unconditionally; afterwards every change notification triggers exactly one
//! render of whatever the watch holds at that moment. Render failures are
//! logged and confined to their cycle.

use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::ordering::order_addresses;
use crate::publish::{to_pretty_json, Publisher};
use crate::render::render;
use crate::watch::MembershipWatch;

/// Result of a single render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Config written with this many servers
    Published { servers: usize },
    /// Config could not be serialized; nothing written
    SerializeFailed,
    /// Config could not be written; previous file left in place
    WriteFailed,
}

/// Counters over the lifetime of a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub cycles: u64,
    pub published: u64,
    pub failed: u64,
}

impl SyncStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Published { .. } => self.published += 1,
            CycleOutcome::SerializeFailed | CycleOutcome::WriteFailed => self.failed += 1,
        }
    }
}

/// Drives renders from a membership watch into a publisher.
pub struct Synchronizer<W, P> {
    watch: W,
    publisher: Arc<P>,
}

impl<W, P> Synchronizer<W, P>
where
    W: MembershipWatch,
    P: Publisher + 'static,
{
    pub fn new(watch: W, publisher: P) -> Self {
        Self { watch, publisher: Arc::new(publisher) }
    }

    /// Render and publish the watch's current snapshot once.
    ///
    /// The snapshot is read when this is called. The returned future runs the
    /// file write on the blocking pool and does not borrow `self`.
    pub fn render_cycle(&self) -> impl Future<Output = CycleOutcome> + Send + 'static {
        let snapshot = self.watch.current_snapshot();
        let config = render(order_addresses(&snapshot));
        let servers = config.server_count();
        let text = to_pretty_json(&config);
        let publisher = Arc::clone(&self.publisher);

        async move {
            let text = match text {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("❌ {}; keeping previous config", e);
                    return CycleOutcome::SerializeFailed;
                }
            };
            tracing::info!("mcrouter config:\n{}", text);

            let result = tokio::task::spawn_blocking(move || publisher.publish(&text)).await;
            match result {
                Ok(Ok(())) => {
                    tracing::info!("✅ Published mcrouter config with {} servers", servers);
                    CycleOutcome::Published { servers }
                }
                Ok(Err(e)) => {
                    tracing::error!("❌ {}; will retry on next membership change", e);
                    CycleOutcome::WriteFailed
                }
                Err(e) => {
                    tracing::error!("❌ Publish task failed: {}", e);
                    CycleOutcome::WriteFailed
                }
            }
        }
    }

    /// Bootstrap render, then one render per change until cancelled or the
    /// watch closes. Cancellation is only observed between renders.
    pub async fn run(mut self, cancel: CancellationToken) -> SyncStats {
        let mut stats = SyncStats::default();
        stats.record(&self.render_cycle().await);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::info!("Synchronizer cancelled");
                    break;
                }
                changed = self.watch.changed() => match changed {
                    Ok(()) => {
                        tracing::debug!("Membership changed, rendering");
                        stats.record(&self.render_cycle().await);
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ {}; synchronizer stopping", e);
                        break;
                    }
                },
            }
        }

        tracing::info!(
            "📊 Synchronizer finished: {} cycles, {} published, {} failed",
            stats.cycles,
            stats.published,
            stats.failed
        );
        stats
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::watch::StaticWatch;
    use mczoorouter_types::{Endpoint, PublishError, Snapshot};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MemoryPublisher {
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl Publisher for MemoryPublisher {
        fn publish(&self, text: &str) -> Result<(), PublishError> {
            self.writes.lock().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenPublisher;

    impl Publisher for BrokenPublisher {
        fn publish(&self, _text: &str) -> Result<(), PublishError> {
            Err(PublishError::Write { path: "nowhere".to_string(), message: "disk full".to_string() })
        }
    }

    #[tokio::test]
    async fn test_render_cycle_counts_servers() {
        let snapshot = Snapshot::new(vec![
            Endpoint::new("cache2", 11211, 2),
            Endpoint::new("cache1", 11211, 1),
        ]);
        let (watch, _handle) = StaticWatch::new(snapshot);
        let publisher = MemoryPublisher::default();
        let sync = Synchronizer::new(watch, publisher.clone());

        assert_eq!(sync.render_cycle().await, CycleOutcome::Published { servers: 2 });
        let writes = publisher.writes.lock();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].find("cache1").unwrap() < writes[0].find("cache2").unwrap());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let (watch, _handle) = StaticWatch::new(Snapshot::empty());
        let sync = Synchronizer::new(watch, BrokenPublisher);
        assert_eq!(sync.render_cycle().await, CycleOutcome::WriteFailed);
    }

    struct ThreadRecorder {
        seen: Arc<Mutex<Option<std::thread::ThreadId>>>,
    }

    impl Publisher for ThreadRecorder {
        fn publish(&self, _text: &str) -> Result<(), PublishError> {
            *self.seen.lock() = Some(std::thread::current().id());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_publish_runs_off_the_runtime_thread() {
        let seen = Arc::new(Mutex::new(None));
        let (watch, _handle) = StaticWatch::new(Snapshot::empty());
        let sync = Synchronizer::new(watch, ThreadRecorder { seen: Arc::clone(&seen) });

        assert_eq!(sync.render_cycle().await, CycleOutcome::Published { servers: 0 });

        let publish_thread = (*seen.lock()).expect("publisher was not called");
        assert_ne!(publish_thread, std::thread::current().id());
    }

    #[tokio::test]
    async fn test_render_cycle_reads_snapshot_when_called() {
        let (watch, handle) =
            StaticWatch::new(Snapshot::new(vec![Endpoint::new("cache1", 11211, 1)]));
        let publisher = MemoryPublisher::default();
        let sync = Synchronizer::new(watch, publisher.clone());

        let cycle = sync.render_cycle();
        handle.set_quietly(Snapshot::empty());
        assert_eq!(cycle.await, CycleOutcome::Published { servers: 1 });
        assert!(publisher.writes.lock()[0].contains("cache1:11211"));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = SyncStats::default();
        stats.record(&CycleOutcome::Published { servers: 0 });
        stats.record(&CycleOutcome::WriteFailed);
        stats.record(&CycleOutcome::SerializeFailed);
        assert_eq!(stats, SyncStats { cycles: 3, published: 1, failed: 2 });
    }

    #[tokio::test]
    async fn test_run_stops_when_watch_closes() {
        let (watch, handle) = StaticWatch::new(Snapshot::empty());
        handle.notify();
        handle.notify();
        drop(handle);

        let publisher = MemoryPublisher::default();
        let stats = Synchronizer::new(watch, publisher.clone()).run(CancellationToken::new()).await;

        assert_eq!(stats, SyncStats { cycles: 3, published: 3, failed: 0 });
        assert_eq!(publisher.writes.lock().len(), 3);
    }
}
