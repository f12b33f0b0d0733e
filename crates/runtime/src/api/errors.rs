//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and content
//! providers so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("content generation failed: {0}")]
    Content(String),

    #[error("no save found in slot {0}")]
    EmptySlot(String),
}
