//! Service endpoints and membership snapshots.

use serde::{Deserialize, Serialize};

/// One service instance published by the membership source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Hostname or IP, rendered verbatim
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Ordering key; carries no meaning for the proxy
    #[serde(default)]
    pub shard_key: i64,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, shard_key: i64) -> Self {
        Self { host: host.into(), port, shard_key }
    }

    /// Address string in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Total order used when rendering: shard key, then host, then port.
    pub fn ordering_key(&self) -> (i64, &str, u16) {
        (self.shard_key, self.host.as_str(), self.port)
    }
}

/// Complete membership at a point in time.
///
/// Always whole-state; the order endpoints were delivered in is not significant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    endpoints: Vec<Endpoint>,
}

impl Snapshot {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl FromIterator<Endpoint> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Endpoint>>(iter: I) -> Self {
        Self { endpoints: iter.into_iter().collect() }
    }
}
