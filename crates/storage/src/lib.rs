use directories::ProjectDirs;
use icon_model::ItemId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Fixed namespace key per-item records are stored under.
pub const META_KEY: &str = "_menu_item_wpsmi";

const META_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key/value metadata store addressed by menu-item id.
///
/// Records are kept as raw JSON values; typing and merging with defaults
/// happen on read, in the caller. Writes replace the whole envelope, so
/// concurrent writers are last-writer-wins per the host store's semantics.
#[derive(Debug, Clone)]
pub struct MetaStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MetaEnvelope {
    version: u32,
    items: BTreeMap<ItemId, Value>,
}

impl MetaEnvelope {
    fn empty() -> Self {
        Self { version: META_SCHEMA_VERSION, items: BTreeMap::new() }
    }
}

impl MetaStore {
    pub fn from_default_project() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("dev", "MenuIcons", "MenuIcons")
            .ok_or(StorageError::NoDataDirectory)?;

        Ok(Self { root: dirs.data_local_dir().to_path_buf() })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the raw stored record for an item, or `None` when absent.
    pub fn get(&self, item: ItemId) -> Result<Option<Value>, StorageError> {
        let mut envelope = self.load()?;
        Ok(envelope.items.remove(&item))
    }

    /// Stores a record wholesale, replacing any previous value.
    pub fn set(&self, item: ItemId, value: Value) -> Result<(), StorageError> {
        let mut envelope = self.load()?;
        envelope.items.insert(item, value);
        self.save(&envelope)
    }

    /// Removes the record for an item. Deleting an absent record is a no-op.
    pub fn delete(&self, item: ItemId) -> Result<(), StorageError> {
        let mut envelope = self.load()?;
        if envelope.items.remove(&item).is_some() {
            self.save(&envelope)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<MetaEnvelope, StorageError> {
        let bytes = match fs::read(self.meta_path()) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(MetaEnvelope::empty());
            }
            Err(error) => return Err(error.into()),
        };

        // A corrupted envelope must never take the page render down with
        // it; readers see an empty store instead.
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|_| MetaEnvelope::empty()))
    }

    fn save(&self, envelope: &MetaEnvelope) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;

        let bytes = serde_json::to_vec_pretty(envelope)?;
        fs::write(self.meta_path(), bytes)?;
        Ok(())
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join(format!("{META_KEY}.json"))
    }
}
