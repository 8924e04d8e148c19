use cosmos_core::{CosmosError, GenerationConfig, LocationId};
use cosmos_sim::{Cosmos, LocationRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::Error),

    #[error("snapshot does not rebuild: {0}")]
    Restore(#[from] CosmosError),
}

/// A captured branch of the hierarchy, ready for disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmosSnapshot {
    pub config: GenerationConfig,
    pub root: LocationId,
    /// Parents before children
    pub records: Vec<LocationRecord>,
}

impl CosmosSnapshot {
    pub fn capture(cosmos: &Cosmos, root: LocationId) -> Result<Self, CosmosError> {
        Ok(Self {
            config: cosmos.config().clone(),
            root,
            records: cosmos.capture_tree(root)?,
        })
    }

    /// Rebuild the captured branch in a fresh `Cosmos`
    pub fn restore(&self) -> Result<Cosmos, CosmosError> {
        let mut cosmos = Cosmos::new(self.config.clone());
        for record in &self.records {
            cosmos.rehydrate(record.clone())?;
        }
        Ok(cosmos)
    }
}

/// Save a snapshot to disk as bincode
pub fn save_snapshot(snapshot: &CosmosSnapshot, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = bincode::serialize(snapshot)?;
    fs::write(path, data)?;
    info!(
        "Saved {} locations to {}",
        snapshot.records.len(),
        path.display()
    );
    Ok(())
}

/// Load a snapshot from disk
pub fn load_snapshot(path: &Path) -> Result<CosmosSnapshot, StorageError> {
    let data = fs::read(path)?;
    let snapshot: CosmosSnapshot = bincode::deserialize(&data)?;
    info!(
        "Loaded {} locations from {}",
        snapshot.records.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Capture `root` and save it in one step
pub fn save_cosmos(cosmos: &Cosmos, root: LocationId, path: &Path) -> Result<(), StorageError> {
    let snapshot = CosmosSnapshot::capture(cosmos, root)?;
    save_snapshot(&snapshot, path)
}

/// Load a snapshot and rebuild it
pub fn load_cosmos(path: &Path) -> Result<Cosmos, StorageError> {
    Ok(load_snapshot(path)?.restore()?)
}
