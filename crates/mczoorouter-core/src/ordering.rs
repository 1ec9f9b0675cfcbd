//! Deterministic ordering of a membership snapshot.

use mczoorouter_types::{Endpoint, Snapshot};

/// Order a snapshot into `host:port` strings.
///
/// Sorted by shard key, with host then port as tie-breakers, so any
/// permutation of the same endpoints yields the same sequence.
pub fn order_addresses(snapshot: &Snapshot) -> Vec<String> {
    let mut endpoints: Vec<&Endpoint> = snapshot.endpoints().iter().collect();
    endpoints.sort_unstable_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
    endpoints.into_iter().map(Endpoint::address).collect()
}
