//! Flat-file block storage.
//!
//! One JSON file per block, named by zero-padded height, under a single
//! root directory. Good enough for a node's committed block log; the
//! directory listing is the index.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use shared_types::SignedBlock;

use crate::error::SimulatorError;
use crate::ports::{BlockQuery, BlockQueryFactory};

/// Failures raised by the flat-file store.
#[derive(Debug, Error)]
pub enum BlockStoreError {
    /// Filesystem access failed.
    #[error("block storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A stored block could not be encoded or decoded.
    #[error("block serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Signed-block storage with one JSON file per height.
pub struct FlatFileBlockStore {
    root: PathBuf,
}

impl FlatFileBlockStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BlockStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, height: u64) -> PathBuf {
        self.root.join(format!("{height:016}.json"))
    }

    /// Persist a block under its height.
    pub fn insert(&self, block: &SignedBlock) -> Result<(), BlockStoreError> {
        let serialized = serde_json::to_vec(block).inspect_err(|err| {
            warn!(height = block.height(), %err, "failed to serialize block");
        })?;
        fs::write(self.path_for(block.height()), serialized)?;
        debug!(height = block.height(), "block stored");
        Ok(())
    }

    /// Load the block stored at `height`, if any.
    pub fn fetch(&self, height: u64) -> Result<Option<SignedBlock>, BlockStoreError> {
        let path = self.path_for(height);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let block = serde_json::from_slice(&raw).inspect_err(|err| {
            warn!(height, %err, "failed to deserialize stored block");
        })?;
        Ok(Some(block))
    }

    /// Heights currently present, unordered.
    fn heights(&self) -> Result<Vec<u64>, BlockStoreError> {
        let mut heights = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Ok(height) = stem.parse::<u64>() {
                heights.push(height);
            }
        }
        Ok(heights)
    }

    /// Height of the newest stored block.
    pub fn top_height(&self) -> Result<Option<u64>, BlockStoreError> {
        Ok(self.heights()?.into_iter().max())
    }

    /// Number of stored blocks.
    pub fn total_blocks(&self) -> Result<usize, BlockStoreError> {
        Ok(self.heights()?.len())
    }

    /// Remove every stored block.
    pub fn clear(&self) -> Result<(), BlockStoreError> {
        for height in self.heights()? {
            fs::remove_file(self.path_for(height))?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlockQuery for FlatFileBlockStore {
    async fn top_block(&self) -> crate::error::Result<SignedBlock> {
        let top = self
            .top_height()
            .map_err(|err| SimulatorError::TopBlock(err.to_string()))?
            .ok_or_else(|| SimulatorError::TopBlock("block storage is empty".to_owned()))?;
        self.fetch(top)
            .map_err(|err| SimulatorError::TopBlock(err.to_string()))?
            .ok_or_else(|| SimulatorError::TopBlock(format!("block {top} vanished during read")))
    }
}

/// Hands out the shared store as a block query.
pub struct FlatFileBlockStoreFactory {
    store: Arc<FlatFileBlockStore>,
}

impl FlatFileBlockStoreFactory {
    /// Wrap a shared store.
    #[must_use]
    pub fn new(store: Arc<FlatFileBlockStore>) -> Self {
        Self { store }
    }
}

impl BlockQueryFactory for FlatFileBlockStoreFactory {
    fn create_block_query(&self) -> Option<Arc<dyn BlockQuery>> {
        Some(self.store.clone())
    }
}
