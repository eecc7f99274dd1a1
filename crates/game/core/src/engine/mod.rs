//! Command queue and execution pipeline.
//!
//! [`Logic`] is the only owner allowed to mutate a [`GameState`]. Commands
//! are queued by priority, and each call to [`Logic::execute_commands`]
//! drains exactly one generation: commands enqueued while a pass runs are
//! kept for the next pass. Every command goes through `check` before
//! `execute`, so a rejected command leaves the state untouched.
mod effects;
mod errors;

pub use errors::CommandError;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::command::Command;
use crate::config::GameConfig;
use crate::constants::LayerKind;
use crate::env::ContentOracle;
use crate::error::GameError;
use crate::rules::Rules;
use crate::state::{GameState, StateListener, World};

/// Outcome of one pass over the queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Commands whose check passed and which were executed.
    pub executed: usize,

    /// Priority and reason of every command whose check failed.
    pub rejected: Vec<(u64, CommandError)>,
}

impl ExecutionReport {
    pub fn is_empty(&self) -> bool {
        self.executed == 0 && self.rejected.is_empty()
    }
}

/// Game state, its content, and the pending commands.
pub struct Logic {
    state: GameState,
    content: Arc<dyn ContentOracle>,
    config: GameConfig,
    queue: BTreeMap<u64, Command>,
    listeners: Vec<Arc<dyn StateListener>>,
}

impl Logic {
    pub fn new(state: GameState, content: Arc<dyn ContentOracle>) -> Self {
        Self {
            state,
            content,
            config: GameConfig::default(),
            queue: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.state.world
    }

    pub fn content(&self) -> &dyn ContentOracle {
        self.content.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> Rules<'_> {
        Rules::new(&self.state, self.content.as_ref(), &self.config)
    }

    /// Swaps in a restored state. Pending commands are dropped and
    /// observers are told everything changed.
    pub fn replace_state(&mut self, state: GameState) -> GameState {
        self.queue.clear();
        let previous = std::mem::replace(&mut self.state, state);
        self.notify(|listener, state| {
            for layer in LayerKind::ALL {
                listener.layer_content_changed(state, layer);
            }
            listener.resources_changed(state);
            listener.turn_changed(state);
        });
        previous
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    // ===== queue =====

    /// Queues a command. A later command with the same priority replaces it.
    pub fn add_command(&mut self, command: impl Into<Command>) {
        let command = command.into();
        self.queue.insert(command.priority(), command);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Runs every queued command once, in ascending priority.
    pub fn execute_commands(&mut self) -> ExecutionReport {
        let commands = std::mem::take(&mut self.queue);
        let mut report = ExecutionReport::default();
        for (priority, command) in commands {
            match command.run(self) {
                Ok(()) => report.executed += 1,
                Err(error) => {
                    tracing::debug!(
                        priority,
                        code = error.error_code(),
                        "command rejected: {error}"
                    );
                    report.rejected.push((priority, error));
                }
            }
        }
        if !self.queue.is_empty() {
            tracing::debug!(pending = self.queue.len(), "follow-up commands scheduled");
        }
        report
    }

    /// Repeats passes until the queue is empty or `max_passes` ran.
    /// Returns the number of passes executed.
    pub fn run_until_idle(&mut self, max_passes: usize) -> usize {
        let mut passes = 0;
        while self.has_pending() && passes < max_passes {
            self.execute_commands();
            passes += 1;
        }
        passes
    }

    // ===== observers =====

    pub fn add_listener(&mut self, listener: Arc<dyn StateListener>) {
        self.listeners.push(listener);
    }

    pub(crate) fn notify(&self, event: impl Fn(&dyn StateListener, &GameState)) {
        for listener in &self.listeners {
            event(listener.as_ref(), &self.state);
        }
    }
}

impl std::fmt::Debug for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logic")
            .field("player", &self.state.player_id())
            .field("turn", &self.state.turn)
            .field("pending", &self.queue.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
