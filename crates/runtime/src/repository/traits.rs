//! Repository contracts for persisted session data.

use saga_core::state::{AssetId, SaveRecord};

use super::error::Result;

/// Lightweight description of one occupied save slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveMetadata {
    pub slot: String,
    pub id: String,
    /// Unix milliseconds at capture time.
    pub timestamp: i64,
    pub version: u32,
}

impl SaveMetadata {
    pub fn of(slot: impl Into<String>, record: &SaveRecord) -> Self {
        Self {
            slot: slot.into(),
            id: record.id.clone(),
            timestamp: record.timestamp,
            version: record.version,
        }
    }
}

/// Keyed storage for save records.
///
/// The core emits save payloads and validates loaded ones; implementations
/// only move bytes. A failed operation is surfaced to the caller and never
/// corrupts the running session.
pub trait SaveRepository: Send + Sync {
    /// Store a record in a slot, replacing any previous occupant.
    fn put(&self, slot: &str, record: &SaveRecord) -> Result<()>;

    /// Fetch the record in a slot, or `None` when the slot is empty.
    fn get(&self, slot: &str) -> Result<Option<SaveRecord>>;

    /// Metadata for every occupied slot, ordered by slot name.
    fn list(&self) -> Result<Vec<SaveMetadata>>;

    /// Empty a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;
}

/// Opaque id ↔ binary blob storage for portraits and maps.
///
/// The session never inspects blob contents; it only forwards ids.
pub trait AssetRepository: Send + Sync {
    fn put(&self, id: &AssetId, bytes: Vec<u8>) -> Result<()>;

    fn get(&self, id: &AssetId) -> Result<Option<Vec<u8>>>;

    fn delete(&self, id: &AssetId) -> Result<()>;
}
