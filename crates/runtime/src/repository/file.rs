//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use armies_core::GameState;

use crate::repository::error::validate_slot;
use crate::repository::{RepositoryError, Result, StateRepository};

/// On-disk encoding of a save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StateFormat {
    /// Pretty-printed JSON, `{slot}.json`. Readable and diffable.
    #[default]
    Json,
    /// bincode, `{slot}.bin`. Compact.
    Bincode,
}

impl StateFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            StateFormat::Json => "json",
            StateFormat::Bincode => "bin",
        }
    }

    fn encode(self, state: &GameState) -> Result<Vec<u8>> {
        match self {
            StateFormat::Json => Ok(serde_json::to_vec_pretty(state)?),
            StateFormat::Bincode => bincode::serialize(state)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<GameState> {
        match self {
            StateFormat::Json => Ok(serde_json::from_slice(bytes)?),
            StateFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }
}

impl FromStr for StateFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(StateFormat::Json),
            "bin" | "bincode" => Ok(StateFormat::Bincode),
            other => Err(format!("unknown state format {other:?}")),
        }
    }
}

/// File-based implementation of StateRepository.
///
/// Each slot is one file in `base_dir`, named `{slot}.{json|bin}` after the
/// repository's [`StateFormat`]. Writes go to a temp file first and are
/// renamed into place, so a crash never leaves a half-written save.
pub struct FileStateRepository {
    base_dir: PathBuf,
    format: StateFormat,
}

impl FileStateRepository {
    /// Create a new file-based state repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, format: StateFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> StateFormat {
        self.format
    }

    fn state_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.{}", self.format.extension()))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        validate_slot(slot)?;
        let path = self.state_path(slot);
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.format.encode(state)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved state[{}] to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        validate_slot(slot)?;
        let path = self.state_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state = self.format.decode(&bytes)?;

        tracing::debug!("Loaded state[{}] from {}", slot, path.display());
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.state_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.state_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted state[{}]", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.format.extension());
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(suffix.as_str())
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
