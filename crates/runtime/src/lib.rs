//! Runtime plumbing around the deterministic armies rules.
//!
//! This crate wires the core [`armies_core::Logic`] to content loading,
//! save-slot persistence and logging. Consumers embed [`Session`] to queue
//! commands, run passes and save or restore games.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the game session
//! - [`repository`] provides persistence adapters
//! - [`config`] and [`logging`] cover process-level setup
pub mod config;
pub mod error;
pub mod logging;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use logging::init_tracing;
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, StateFormat, StateRepository,
};
pub use session::{DrainReport, Session};
