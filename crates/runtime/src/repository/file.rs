//! File-backed save repository: one JSON file per slot.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use saga_core::state::SaveRecord;

use super::error::{RepositoryError, Result};
use super::traits::{SaveMetadata, SaveRepository};

/// Stores each slot as `<dir>/<slot>.json`.
pub struct FileSaveRepo {
    dir: PathBuf,
}

impl FileSaveRepo {
    /// Opens (and creates if needed) a repository rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the platform-default save directory.
    pub fn default_dir() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "saga").ok_or(RepositoryError::NoDataDir)?;
        Self::new(dirs.data_dir().join("saves"))
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SaveRepository for FileSaveRepo {
    fn put(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record)?;
        // write-then-rename keeps a crash from leaving a half-written slot
        let tmp = self.dir.join(format!("{slot}.json.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.slot_path(slot))?;
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let bytes = match fs::read(self.slot_path(slot)) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    fn list(&self) -> Result<Vec<SaveMetadata>> {
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(slot) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match self.get(slot) {
                Ok(Some(record)) => entries.push(SaveMetadata::of(slot, &record)),
                Ok(None) => {}
                Err(error) => {
                    // a corrupt slot should not hide the healthy ones
                    warn!(slot, %error, "skipping unreadable save slot");
                }
            }
        }
        entries.sort_by(|a, b| a.slot.cmp(&b.slot));
        Ok(entries)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
