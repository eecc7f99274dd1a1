//! Persistence adapters for game states.
//!
//! [`StateRepository`] is the seam; [`FileStateRepository`] writes saves to
//! disk and [`InMemoryStateRepo`] keeps them in a map for tests.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, StateFormat};
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
