//! Finagle ServerSet member records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use mczoorouter_types::{Endpoint, WatchError};

/// Prefix of member znode names inside a ServerSet directory.
pub const MEMBER_PREFIX: &str = "member_";

/// Host and port of one advertised endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
}

/// JSON document stored in each `member_*` znode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerSetMember {
    pub service_endpoint: ServiceEndpoint,
    #[serde(default)]
    pub additional_endpoints: HashMap<String, ServiceEndpoint>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub shard: Option<i64>,
}

impl ServerSetMember {
    pub fn parse(path: &str, data: &[u8]) -> Result<Self, WatchError> {
        serde_json::from_slice(data).map_err(|e| WatchError::MalformedMember {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// The primary endpoint, keyed by shard (0 when unsharded).
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            self.service_endpoint.host.clone(),
            self.service_endpoint.port,
            self.shard.unwrap_or_default(),
        )
    }
}

pub fn is_member_node(name: &str) -> bool {
    name.starts_with(MEMBER_PREFIX)
}
