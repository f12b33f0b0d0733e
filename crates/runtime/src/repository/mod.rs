//! Save and asset store adapters.
//!
//! The session core only emits and consumes [`saga_core::state::SaveRecord`]
//! payloads; everything about where they live is behind the traits here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepo;
pub use memory::{InMemoryAssetRepo, InMemorySaveRepo};
pub use traits::{AssetRepository, SaveMetadata, SaveRepository};
