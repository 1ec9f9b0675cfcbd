//! Serializing and writing the mcrouter config.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use mczoorouter_types::{PublishError, RenderedConfig};

const INDENT: &[u8] = b"    ";

/// Destination for rendered config text.
pub trait Publisher: Send + Sync {
    /// Replace the published config with `text`.
    fn publish(&self, text: &str) -> Result<(), PublishError>;
}

/// Serialize with 4-space indentation, keys in schema order.
pub fn to_pretty_json(config: &RenderedConfig) -> Result<String, PublishError> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    config.serialize(&mut ser).map_err(|e| PublishError::from_json_error(&e))?;
    String::from_utf8(buf).map_err(|e| PublishError::Serialize { message: e.to_string() })
}

/// Writes the config to a file, replacing it atomically.
///
/// Text goes to a temp file in the destination directory which is renamed
/// over the destination, so readers see either the old or the new file.
#[derive(Debug, Clone)]
pub struct FilePublisher {
    path: PathBuf,
}

impl FilePublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomic(&self, text: &str) -> std::io::Result<()> {
        // Dropping `tmp` on any early return removes the temp file.
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Keep the mode of the file being replaced; new files get 0644.
        let permissions = match std::fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(permissions) = permissions {
            std::fs::set_permissions(tmp.path(), permissions)?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

impl Publisher for FilePublisher {
    fn publish(&self, text: &str) -> Result<(), PublishError> {
        self.write_atomic(text).map_err(|e| PublishError::from_io_error(&self.path, &e))
    }
}
