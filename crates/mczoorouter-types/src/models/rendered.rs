//! mcrouter routing configuration schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the single pool the renderer emits.
pub const PRIMARY_POOL: &str = "A";

/// Routing configuration consumed by mcrouter.
///
/// Field order is the serialized key order: `pools` then `route`. Pools are
/// kept in a `BTreeMap` so multi-pool configs serialize in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedConfig {
    /// Named server pools
    pub pools: BTreeMap<String, Pool>,
    /// Route rule, e.g. `PoolRoute|A`
    pub route: String,
}

/// A list of `host:port` servers, in shard order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pool {
    pub servers: Vec<String>,
}

impl RenderedConfig {
    /// Config with one pool and a `PoolRoute` pointing at it.
    pub fn single_pool(pool_id: &str, servers: Vec<String>) -> Self {
        let mut pools = BTreeMap::new();
        pools.insert(pool_id.to_string(), Pool { servers });
        Self { pools, route: pool_route(pool_id) }
    }

    /// Total number of servers across all pools.
    pub fn server_count(&self) -> usize {
        self.pools.values().map(|p| p.servers.len()).sum()
    }
}

/// Route rule sending all traffic to `pool_id`.
pub fn pool_route(pool_id: &str) -> String {
    format!("PoolRoute|{pool_id}")
}
