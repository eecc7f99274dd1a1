use std::collections::BTreeMap;

use crate::constants::{ResourceBag, UnitClass, WeaponKind};
use crate::state::PlayerId;

/// Attack, defense and range of one combat channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponStats {
    pub attack: i32,
    pub defense: i32,
    pub range: i32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            attack: 0,
            defense: 0,
            range: 1,
        }
    }
}

/// Typed property set of a unit. Also used as the template a class spawns from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitProperties {
    pub life_points: i32,
    pub max_life_points: i32,
    pub move_points: i32,
    pub max_move_points: i32,
    pub action_points: i32,
    pub max_action_points: i32,
    pub weapons: BTreeMap<WeaponKind, WeaponStats>,
    pub cost: ResourceBag,
    pub upkeep: ResourceBag,
}

impl UnitProperties {
    /// Stats of a combat channel; missing channels have no attack or defense and range 1.
    pub fn weapon(&self, kind: WeaponKind) -> WeaponStats {
        self.weapons.get(&kind).copied().unwrap_or_default()
    }

    /// Refills move and action points.
    pub fn reset_points(&mut self) {
        self.move_points = self.max_move_points;
        self.action_points = self.max_action_points;
    }

    /// Starts every meter at its maximum.
    pub fn at_max(mut self) -> Self {
        self.life_points = self.max_life_points;
        self.reset_points();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub class: UnitClass,
    pub player: PlayerId,
    pub properties: UnitProperties,
}

impl Unit {
    pub fn new(class: UnitClass, player: PlayerId, properties: UnitProperties) -> Self {
        debug_assert!(player.is_valid(), "invalid player id {player}");
        Self {
            class,
            player,
            properties,
        }
    }
}
