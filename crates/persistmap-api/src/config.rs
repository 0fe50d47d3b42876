//! Map configuration.

use serde::{Deserialize, Serialize};

/// How hard a snapshot is pushed to stable storage before a mutation returns.
///
/// Both modes fsync the temporary file before it is renamed over the
/// backing file, so the backing file is never observed half-written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncMode {
    /// fsync the snapshot and then the parent directory, so the rename
    /// itself survives power loss (strongest durability)
    #[default]
    Full,
    /// fsync the snapshot only; after a power cut the directory entry may
    /// still point at the previous complete snapshot
    Data,
}

/// Options for [`crate::PersistentMap::open_with_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Durability level for every persisted snapshot
    pub sync_mode: SyncMode,
    /// Create the backing file's parent directory at open if it is missing
    pub create_dirs: bool,
}

impl MapConfig {
    /// Default configuration: full sync, parent directory must exist
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sync mode
    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Create missing parent directories at open
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}
