//! A running game: engine, content and persistence wired together.
use std::sync::Arc;

use armies_content::{ContentFactory, StandardContent};
use armies_core::{
    CellValue, Command, CommandError, ContentOracle, ExecutionReport, GameConfig, GameState,
    LayerKind, Logic, Player, PlayerId, StateListener, World, WorldType,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{FileStateRepository, StateRepository};

/// Totals over the passes of one [`Session::drain`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub passes: usize,
    pub executed: usize,
    pub rejected: Vec<(u64, CommandError)>,
    /// Commands still queued because the pass bound was reached.
    pub pending: usize,
}

/// Owns a [`Logic`] and the repository its saves go to.
pub struct Session {
    logic: Logic,
    repository: Arc<dyn StateRepository>,
    max_passes: usize,
}

impl Session {
    pub fn new(logic: Logic, repository: Arc<dyn StateRepository>) -> Self {
        Self {
            logic,
            repository,
            max_passes: RuntimeConfig::DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Builds a session from runtime configuration: content and game config
    /// come from `content_dir` (built-in tables when unset), saves go to a
    /// [`FileStateRepository`] in `save_dir`. The game starts on a blank
    /// single-player earth world; call [`Session::new_game`] or
    /// [`Session::load`] next.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let (content, game_config) = match &config.content_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let content = factory.load_content().map_err(RuntimeError::Content)?;
                let game_config = factory
                    .load_config_or_default()
                    .map_err(RuntimeError::Content)?;
                (content, game_config)
            }
            None => (StandardContent::standard(), GameConfig::default()),
        };
        let repository = FileStateRepository::new(&config.save_dir, config.save_format)?;
        tracing::debug!(save_dir = %config.save_dir.display(), "session configured");

        let state = GameState::new(earth_world(1, 1, WorldType::Strategic));
        let logic = Logic::new(state, Arc::new(content)).with_config(game_config);
        Ok(Self::new(logic, Arc::new(repository)).with_max_passes(config.max_passes))
    }

    /// Replaces the game with a fresh earth world. The first listed player
    /// moves first.
    pub fn new_game(
        &mut self,
        width: i32,
        height: i32,
        world_type: WorldType,
        player_ids: &[PlayerId],
    ) -> Result<()> {
        let max_width = GameConfig::WORLD_MAX_WIDTH as i32;
        if width <= 0 || height <= 0 || width > max_width {
            return Err(RuntimeError::InvalidSetup(format!(
                "world size {width}x{height} outside 1..={max_width}"
            )));
        }
        if player_ids.is_empty() {
            return Err(RuntimeError::InvalidSetup("a game needs players".into()));
        }
        if let Some(id) = player_ids.iter().find(|id| !id.is_valid()) {
            return Err(RuntimeError::InvalidSetup(format!("invalid player id {id}")));
        }
        for (index, id) in player_ids.iter().enumerate() {
            if player_ids[..index].contains(id) {
                return Err(RuntimeError::InvalidSetup(format!("duplicate player id {id}")));
            }
        }

        let players = player_ids.iter().copied().map(Player::new).collect();
        let state = GameState::with_players(earth_world(width, height, world_type), players);
        self.logic.replace_state(state);
        tracing::info!(width, height, players = player_ids.len(), "new game");
        Ok(())
    }

    /// Queues a command for the next pass.
    pub fn submit(&mut self, command: impl Into<Command>) {
        self.logic.add_command(command);
    }

    /// Runs one pass over the queue.
    pub fn tick(&mut self) -> ExecutionReport {
        let report = self.logic.execute_commands();
        tracing::debug!(
            executed = report.executed,
            rejected = report.rejected.len(),
            pending = self.logic.pending(),
            "tick"
        );
        report
    }

    /// Runs passes until the queue is empty or the pass bound is reached.
    pub fn drain(&mut self) -> DrainReport {
        let mut drained = DrainReport::default();
        while self.logic.has_pending() && drained.passes < self.max_passes {
            let report = self.tick();
            drained.passes += 1;
            drained.executed += report.executed;
            drained.rejected.extend(report.rejected);
        }
        drained.pending = self.logic.pending();
        if drained.pending > 0 {
            tracing::warn!(
                passes = drained.passes,
                pending = drained.pending,
                "drain stopped at the pass bound"
            );
        }
        drained
    }

    pub fn save(&self, slot: &str) -> Result<()> {
        self.repository.save(slot, self.logic.state())?;
        Ok(())
    }

    /// Restores the state saved under `slot`. Pending commands are dropped.
    pub fn load(&mut self, slot: &str) -> Result<()> {
        let state = self
            .repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SlotNotFound(slot.to_string()))?;
        self.logic.replace_state(state);
        Ok(())
    }

    pub fn add_listener(&mut self, listener: Arc<dyn StateListener>) {
        self.logic.add_listener(listener);
    }

    pub fn state(&self) -> &GameState {
        self.logic.state()
    }

    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    pub fn content(&self) -> &dyn ContentOracle {
        self.logic.content()
    }

    pub fn repository(&self) -> &dyn StateRepository {
        self.repository.as_ref()
    }
}

fn earth_world(width: i32, height: i32, world_type: WorldType) -> World {
    let mut world = World::new(width, height, world_type);
    world.layer_mut(LayerKind::Ground).fill(CellValue::Earth);
    world
}
