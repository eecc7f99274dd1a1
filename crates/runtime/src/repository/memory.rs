//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use armies_core::GameState;

use crate::repository::error::validate_slot;
use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepo {
    states: RwLock<BTreeMap<String, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            states: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        validate_slot(slot)?;
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(slot.to_string(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        validate_slot(slot)?;
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().cloned().collect())
    }
}
