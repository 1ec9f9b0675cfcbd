//! Ordered server list -> mcrouter config.

use mczoorouter_types::{RenderedConfig, PRIMARY_POOL};

/// Build the routing config for an already ordered server list.
///
/// Always one pool named [`PRIMARY_POOL`] with a `PoolRoute` to it.
pub fn render(servers: Vec<String>) -> RenderedConfig {
    RenderedConfig::single_pool(PRIMARY_POOL, servers)
}
