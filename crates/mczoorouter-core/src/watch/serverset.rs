//! ZooKeeper ServerSet watcher.
//!
//! Lists the `member_*` children of `/aurora/jobs/{role}/{env}/{job}`, keeps
//! the resulting snapshot in memory, and sends one notification per observed
//! membership change. A background task re-arms the children watch after
//! every firing and reconnects with exponential backoff when the session is
//! lost. Only the initial connection is fatal.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use zookeeper_client as zk;

use mczoorouter_types::{Snapshot, SyncSettings, WatchError};

use super::member::{is_member_node, ServerSetMember};
use super::MembershipWatch;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);
const EVENT_BUFFER: usize = 64;

/// Membership watch backed by a ZooKeeper ServerSet.
pub struct ServerSetWatch {
    snapshot: Arc<RwLock<Snapshot>>,
    events: mpsc::Receiver<()>,
}

impl ServerSetWatch {
    /// Connect, load the current members and start watching.
    ///
    /// Fails if ZooKeeper cannot be reached or the ServerSet cannot be listed.
    pub async fn connect(
        settings: &SyncSettings,
        cancel: CancellationToken,
    ) -> Result<Self, WatchError> {
        let cluster = settings.zookeeper_cluster();
        let path = settings.serverset_path();

        let client = connect(&cluster).await?;
        let (snapshot, watcher) = load_members(&client, &path).await?;
        tracing::info!("📡 Watching ServerSet {} ({} members)", path, snapshot.len());

        let shared = Arc::new(RwLock::new(snapshot));
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let state =
            WatchTask { cluster, path, snapshot: Arc::clone(&shared), events: tx, cancel };
        tokio::spawn(state.run(client, watcher));

        Ok(Self { snapshot: shared, events: rx })
    }
}

#[async_trait]
impl MembershipWatch for ServerSetWatch {
    fn current_snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    async fn changed(&mut self) -> Result<(), WatchError> {
        self.events.recv().await.ok_or(WatchError::Closed)
    }
}

struct WatchTask {
    cluster: String,
    path: String,
    snapshot: Arc<RwLock<Snapshot>>,
    events: mpsc::Sender<()>,
    cancel: CancellationToken,
}

impl WatchTask {
    async fn run(self, mut client: zk::Client, mut watcher: zk::OneshotWatcher) {
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                event = watcher.changed() => {
                    tracing::debug!(
                        "ServerSet watch fired: {:?} on {}",
                        event.event_type,
                        event.path
                    );
                }
            }

            let Some((next_client, snapshot, next_watcher)) = self.reload(client).await else {
                break;
            };
            client = next_client;
            watcher = next_watcher;

            if !replace_if_changed(&self.snapshot, snapshot) {
                tracing::debug!("ServerSet {} unchanged after watch", self.path);
                continue;
            }

            if self.events.send(()).await.is_err() {
                tracing::debug!("Membership receiver dropped, stopping ServerSet watch");
                break;
            }
        }
        tracing::info!("ServerSet watch on {} stopped", self.path);
    }

    /// Re-list members, reconnecting with backoff until it succeeds.
    /// Returns `None` when cancelled.
    async fn reload(
        &self,
        mut client: zk::Client,
    ) -> Option<(zk::Client, Snapshot, zk::OneshotWatcher)> {
        let mut delay = INITIAL_BACKOFF;
        loop {
            match load_members(&client, &self.path).await {
                Ok((snapshot, watcher)) => return Some((client, snapshot, watcher)),
                Err(e) => tracing::warn!("⚠️ {}; retrying in {:?}", e, delay),
            }

            tokio::select! {
                () = self.cancel.cancelled() => return None,
                () = tokio::time::sleep(delay) => {}
            }
            delay = (delay * 2).min(MAX_BACKOFF);

            match connect(&self.cluster).await {
                Ok(fresh) => client = fresh,
                Err(e) => tracing::warn!("⚠️ {}", e),
            }
        }
    }
}

async fn connect(cluster: &str) -> Result<zk::Client, WatchError> {
    let connect_err =
        |message: String| WatchError::Connect { hosts: cluster.to_string(), message };

    match tokio::time::timeout(CONNECT_TIMEOUT, zk::Client::connect(cluster)).await {
        Ok(Ok(client)) => Ok(client),
        Ok(Err(e)) => Err(connect_err(e.to_string())),
        Err(_) => Err(connect_err(format!("timed out after {:?}", CONNECT_TIMEOUT))),
    }
}

/// List members under `path` and arm a children watch.
async fn load_members(
    client: &zk::Client,
    path: &str,
) -> Result<(Snapshot, zk::OneshotWatcher), WatchError> {
    let session_err =
        |e: zk::Error| WatchError::Session { path: path.to_string(), message: e.to_string() };

    let (names, watcher) = client.list_and_watch_children(path).await.map_err(session_err)?;

    let mut children = Vec::with_capacity(names.len());
    for name in names {
        if !is_member_node(&name) {
            continue;
        }
        let data = match client.get_data(&format!("{}/{}", path, name)).await {
            Ok((data, _stat)) => Some(data),
            Err(zk::Error::NoNode) => None,
            Err(e) => return Err(session_err(e)),
        };
        children.push((name, data));
    }

    Ok((snapshot_from_members(path, children), watcher))
}

/// Build a snapshot from `(child name, data)` pairs read under `path`.
///
/// Non-member children are ignored. A child with no data vanished between
/// listing and reading; it is skipped like a member with malformed data.
fn snapshot_from_members(path: &str, mut children: Vec<(String, Option<Vec<u8>>)>) -> Snapshot {
    children.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut endpoints = Vec::with_capacity(children.len());
    for (name, data) in children {
        if !is_member_node(&name) {
            continue;
        }
        let member_path = format!("{}/{}", path, name);
        let Some(data) = data else {
            tracing::debug!("Member {} left before it could be read", member_path);
            continue;
        };

        match ServerSetMember::parse(&member_path, &data) {
            Ok(member) => endpoints.push(member.endpoint()),
            Err(e) => tracing::warn!("⚠️ Skipping member: {}", e),
        }
    }
    Snapshot::new(endpoints)
}

/// Store `next` unless it equals the current snapshot. Returns whether it changed.
fn replace_if_changed(current: &RwLock<Snapshot>, next: Snapshot) -> bool {
    let mut current = current.write();
    if *current == next {
        return false;
    }
    *current = next;
    true
}
