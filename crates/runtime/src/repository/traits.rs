//! Repository contract for saving and loading game states.

use armies_core::GameState;

use crate::repository::Result;

/// Repository for game state persistence, keyed by save slot name.
///
/// Slot names are non-empty and limited to ASCII letters, digits, `-` and `_`.
pub trait StateRepository: Send + Sync {
    /// Save a game state under `slot`, replacing any previous save.
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Load the state saved under `slot`, if any.
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    /// Check if a slot holds a save
    fn exists(&self, slot: &str) -> bool;

    /// Delete a save; deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
