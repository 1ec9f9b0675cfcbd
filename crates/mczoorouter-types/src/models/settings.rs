//! Process settings, built once at startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::error::SettingsError;

/// Root of the Aurora ServerSet namespace in ZooKeeper.
pub const SERVERSET_BASE_PATH: &str = "/aurora/jobs";

/// Everything the synchronizer and the ServerSet watcher need to run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SyncSettings {
    /// ZooKeeper ensemble, `host:port` each
    #[validate(length(min = 1_u64))]
    pub zookeeper_hosts: Vec<String>,
    /// Aurora role owning the job
    #[validate(length(min = 1_u64))]
    pub role: String,
    /// Aurora environment (prod, devel, ...)
    #[validate(length(min = 1_u64))]
    pub env: String,
    /// Aurora job name
    #[validate(length(min = 1_u64))]
    pub job: String,
    /// Where the mcrouter config is written
    pub output_path: PathBuf,
}

impl SyncSettings {
    /// Build and validate settings.
    pub fn new(
        zookeeper_hosts: Vec<String>,
        role: impl Into<String>,
        env: impl Into<String>,
        job: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            zookeeper_hosts: zookeeper_hosts
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
            role: role.into(),
            env: env.into(),
            job: job.into(),
            output_path: output_path.into(),
        };
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), SettingsError> {
        self.validate().map_err(|e| SettingsError::Invalid { message: e.to_string() })?;

        for (field, value) in [("role", &self.role), ("env", &self.env), ("job", &self.job)] {
            if value.contains('/') {
                return Err(SettingsError::InvalidField {
                    field: field.to_string(),
                    message: format!("'{value}' must not contain '/'"),
                });
            }
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidField {
                field: "mcrouter-config-file".to_string(),
                message: "path is empty".to_string(),
            });
        }
        Ok(())
    }

    /// ZooKeeper path holding the job's members.
    pub fn serverset_path(&self) -> String {
        format!("{}/{}/{}/{}", SERVERSET_BASE_PATH, self.role, self.env, self.job)
    }

    /// Connect string for the ZooKeeper client (`h1:2181,h2:2181`).
    pub fn zookeeper_cluster(&self) -> String {
        self.zookeeper_hosts.join(",")
    }
}
