//! Unified error type surfaced by the runtime API.
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load content: {0:#}")]
    Content(#[source] anyhow::Error),

    #[error("no save in slot {0:?}")]
    SlotNotFound(String),

    #[error("invalid game setup: {0}")]
    InvalidSetup(String),
}
