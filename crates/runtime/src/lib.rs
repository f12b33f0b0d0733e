//! Runtime orchestration for the saga session engine.
//!
//! This crate wires the pure reducer in saga-core to the outside world:
//! async content providers with deterministic fallbacks, save/asset
//! repositories, a topic-based event bus, and the worker task that owns the
//! canonical session state. Consumers embed [`Session`] to drive play,
//! subscribe to events, and persist progress through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] provides save and asset store adapters
//! - `workers` keeps the background task internal to the crate

pub mod api;
pub mod events;
pub mod repository;
pub mod session;

mod workers;

pub use api::{
    ContentProvider, FallbackContent, OfflineContent, Result, SessionError, SessionHandle,
};
pub use events::{BusEvent, EventBus, Topic};
pub use repository::{
    AssetRepository, FileSaveRepo, InMemoryAssetRepo, InMemorySaveRepo, RepositoryError,
    SaveMetadata, SaveRepository,
};
pub use session::{Session, SessionBuilder, SessionConfig};
