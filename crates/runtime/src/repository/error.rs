//! Repository error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save store I/O failure")]
    Io(#[from] std::io::Error),

    #[error("malformed save record")]
    Malformed(#[from] serde_json::Error),

    #[error("repository lock poisoned")]
    LockPoisoned,

    #[error("no usable data directory for saves")]
    NoDataDir,
}
