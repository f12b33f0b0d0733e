//! In-memory repository implementations for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use saga_core::state::{AssetId, SaveRecord};

use super::error::{RepositoryError, Result};
use super::traits::{AssetRepository, SaveMetadata, SaveRepository};

/// In-memory implementation of [`SaveRepository`].
#[derive(Default)]
pub struct InMemorySaveRepo {
    slots: RwLock<HashMap<String, SaveRecord>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn put(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_owned(), record.clone());
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn list(&self) -> Result<Vec<SaveMetadata>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut entries: Vec<SaveMetadata> = slots
            .iter()
            .map(|(slot, record)| SaveMetadata::of(slot.clone(), record))
            .collect();
        entries.sort_by(|a, b| a.slot.cmp(&b.slot));
        Ok(entries)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }
}

/// In-memory implementation of [`AssetRepository`].
#[derive(Default)]
pub struct InMemoryAssetRepo {
    blobs: RwLock<HashMap<AssetId, Vec<u8>>>,
}

impl InMemoryAssetRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetRepository for InMemoryAssetRepo {
    fn put(&self, id: &AssetId, bytes: Vec<u8>) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        blobs.insert(id.clone(), bytes);
        Ok(())
    }

    fn get(&self, id: &AssetId) -> Result<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blobs.get(id).cloned())
    }

    fn delete(&self, id: &AssetId) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        blobs.remove(id);
        Ok(())
    }
}
