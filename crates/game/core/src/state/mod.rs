//! Authoritative game state representation.
//!
//! This module owns the world grid, its items, and the player roster. Runtime
//! layers clone or query this state but mutate it exclusively through the
//! command engine.
pub mod error;
pub mod listener;
pub mod types;

pub use error::StateError;
pub use listener::StateListener;
pub use types::{
    Army, Assignments, City, CityProperties, Item, ItemCells, ItemId, ItemTable, Layer,
    LayerArea, Player, PlayerId, Position, RecruitCounters, Rect, TrainingCamp, Unit,
    UnitProperties, UnitStack, WeaponStats, World, default_name,
};

/// Canonical snapshot of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Player whose turn it is.
    player_id: PlayerId,

    /// Full rounds played, starting at 1.
    pub turn: u32,

    /// Players in turn order.
    players: Vec<Player>,

    pub world: World,
}

impl GameState {
    /// State with a single player (id 1) on its first turn.
    pub fn new(world: World) -> Self {
        Self::with_players(world, vec![Player::new(PlayerId(1))])
    }

    /// State whose first listed player starts.
    pub fn with_players(world: World, players: Vec<Player>) -> Self {
        assert!(!players.is_empty(), "a game needs at least one player");
        Self {
            player_id: players[0].id,
            turn: 1,
            players,
            world,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Panics when `player_id` is not part of the game.
    pub fn set_player_id(&mut self, player_id: PlayerId) {
        assert!(
            self.player(player_id).is_some(),
            "no player {player_id} in this game"
        );
        self.player_id = player_id;
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|player| player.id).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.player_id)
    }

    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.player_mut(self.player_id)
    }

    /// Checks world cross-references and the current player.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.current_player().is_none() {
            return Err(StateError::UnknownPlayer(self.player_id));
        }
        if let Some(player) = self.players.iter().find(|player| !player.id.is_valid()) {
            return Err(StateError::InvalidPlayer(player.id));
        }
        self.world.validate()
    }
}
