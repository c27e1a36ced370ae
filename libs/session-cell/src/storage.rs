use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use shared_models::error::ClientError;
use shared_models::identity::Identity;

/// The one durable piece of client state: the serialized identity.
///
/// Single-writer contract: only the session store touches this file. Every
/// other component observes identity through the store's published state.
/// Corrupt contents are treated as absence and purged, never surfaced as a
/// user-facing error.
#[derive(Debug)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<Identity> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("Discarding corrupt session file {}: {}", self.path.display(), e);
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, identity: &Identity) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| ClientError::Storage(format!("Cannot create {}: {}", parent.display(), e)))?;
            }
        }

        let serialized = serde_json::to_string(identity)
            .map_err(|e| ClientError::Storage(format!("Cannot serialize identity: {}", e)))?;

        fs::write(&self.path, serialized)
            .map_err(|e| ClientError::Storage(format!("Cannot write {}: {}", self.path.display(), e)))
    }

    /// Removing an already-absent file is not an error; logout is
    /// unconditional.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove session file {}: {}", self.path.display(), e);
            }
        }
    }
}
