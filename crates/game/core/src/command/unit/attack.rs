use super::{acting_unit, notify_unit_changed, single_unit, spend_action_point};
use crate::command::{CommandTransition, cell_priority};
use crate::constants::UnitClass;
use crate::engine::{CommandError, Logic};
use crate::state::{Position, Unit};

/// One unit strikes a lone enemy unit with its best weapon in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackUnit {
    pub cell: Position,
    pub target: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackPlan {
    Wound { damage: i32 },
    /// A defeated knight loses its horse.
    Demote { damage: i32, replacement: Unit },
    Kill { damage: i32 },
}

impl AttackPlan {
    pub fn damage(&self) -> i32 {
        match self {
            AttackPlan::Wound { damage }
            | AttackPlan::Demote { damage, .. }
            | AttackPlan::Kill { damage } => *damage,
        }
    }
}

impl AttackUnit {
    pub fn new(cell: Position, target: Position) -> Self {
        Self { cell, target }
    }
}

/// Best damage `attacker` deals to `defender` from `distance` cells away.
///
/// Ranged weapons can't fire at adjacent cells; melee weapons only reach
/// adjacent ones.
pub fn best_damage(attacker: &Unit, defender: &Unit, distance: i32) -> i32 {
    attacker
        .properties
        .weapons
        .iter()
        .filter_map(|(kind, weapon)| {
            if distance > weapon.range || (distance == 1 && weapon.range > 1) {
                return None;
            }
            Some(weapon.attack - defender.properties.weapon(*kind).defense)
        })
        .max()
        .unwrap_or(0)
}

impl CommandTransition for AttackUnit {
    type Plan = AttackPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<AttackPlan, CommandError> {
        if self.cell == self.target {
            return Err(CommandError::SameCell);
        }
        let attacker = acting_unit(logic, self.cell)?;
        let defender = single_unit(logic, self.target)?;
        if defender.player == attacker.player {
            return Err(CommandError::FriendlyTarget);
        }

        let distance = self.cell.rounded_distance(self.target);
        let damage = best_damage(attacker, defender, distance);
        if damage <= 0 {
            return Err(CommandError::NoDamage);
        }
        if damage < defender.properties.life_points {
            return Ok(AttackPlan::Wound { damage });
        }
        if defender.class == UnitClass::Knight {
            let properties = logic.content().require_unit(UnitClass::Swordsman)?;
            let replacement = Unit::new(UnitClass::Swordsman, defender.player, properties);
            return Ok(AttackPlan::Demote {
                damage,
                replacement,
            });
        }
        Ok(AttackPlan::Kill { damage })
    }

    fn execute(&self, plan: AttackPlan, logic: &mut Logic) {
        let target = self.target;
        let damage = plan.damage();
        logic.notify(|listener, state| listener.unit_damaged(state, target, damage));
        match plan {
            AttackPlan::Wound { damage } => {
                if let Some(unit) = logic.world_mut().unit_at_mut(target, 0) {
                    unit.properties.life_points -= damage;
                }
                notify_unit_changed(logic, target);
            }
            AttackPlan::Demote { replacement, .. } => {
                logic.world_mut().place_units(target, vec![replacement]);
                notify_unit_changed(logic, target);
            }
            AttackPlan::Kill { .. } => {
                logic.remove_unit(target, 0);
            }
        }
        spend_action_point(logic, self.cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::drive;
    use crate::constants::{CellValue, WorldType};
    use crate::state::PlayerId;
    use crate::testing::{earth_world, logic, two_players, unit};

    fn duel(attacker: UnitClass, defender: UnitClass, target: Position) -> Logic {
        let mut world = earth_world(6, 6, WorldType::Strategic);
        world.place_units(Position::new(0, 0), vec![unit(attacker, PlayerId(1))]);
        world.place_units(target, vec![unit(defender, PlayerId(2))]);
        logic(two_players(world))
    }

    #[test]
    fn weapons_pick_their_range() {
        let bowman = unit(UnitClass::Bowman, PlayerId(1));
        let pikeman = unit(UnitClass::Pikeman, PlayerId(2));
        // Adjacent: the bow can't fire, melee 1 against defense 3.
        assert_eq!(best_damage(&bowman, &pikeman, 1), -2);
        // Bow 5 against no bow defense.
        assert_eq!(best_damage(&bowman, &pikeman, 2), 5);
        assert_eq!(best_damage(&bowman, &pikeman, 4), 0);

        let knight = unit(UnitClass::Knight, PlayerId(1));
        // Mount 8 against mount defense 6 ties melee 5 against 3.
        assert_eq!(best_damage(&knight, &pikeman, 1), 2);
    }

    #[test]
    fn wounded_units_stay_and_attackers_tire() {
        let target = Position::new(2, 0);
        let mut logic = duel(UnitClass::Bowman, UnitClass::Pikeman, target);
        drive(&AttackUnit::new(Position::new(0, 0), target), &mut logic).unwrap();

        assert_eq!(logic.world().units_at(target)[0].properties.life_points, 5);
        let attacker = &logic.world().units_at(Position::new(0, 0))[0];
        assert_eq!(attacker.properties.action_points, 0);
        assert_eq!(
            drive(&AttackUnit::new(Position::new(0, 0), target), &mut logic),
            Err(CommandError::NoActionPoints)
        );
    }

    #[test]
    fn defeated_knights_become_swordsmen() {
        let target = Position::new(1, 1);
        let mut logic = duel(UnitClass::Swordsman, UnitClass::Knight, target);
        logic.world_mut().unit_at_mut(target, 0).unwrap().properties.life_points = 1;

        drive(&AttackUnit::new(Position::new(0, 0), target), &mut logic).unwrap();
        let survivor = &logic.world().units_at(target)[0];
        assert_eq!(survivor.class, UnitClass::Swordsman);
        assert_eq!(survivor.player, PlayerId(2));
        assert_eq!(survivor.properties.life_points, 12);
    }

    #[test]
    fn other_defeated_units_die() {
        let target = Position::new(1, 0);
        let mut logic = duel(UnitClass::Swordsman, UnitClass::Bowman, target);
        logic.world_mut().unit_at_mut(target, 0).unwrap().properties.life_points = 3;

        drive(&AttackUnit::new(Position::new(0, 0), target), &mut logic).unwrap();
        assert_eq!(logic.world().units().get(target), CellValue::Empty);
    }

    #[test]
    fn targets_must_be_lone_enemies() {
        let target = Position::new(1, 0);
        let mut logic = duel(UnitClass::Pikeman, UnitClass::Pikeman, target);
        logic
            .world_mut()
            .place_units(Position::new(0, 1), vec![unit(UnitClass::Bowman, PlayerId(1))]);
        assert_eq!(
            drive(&AttackUnit::new(Position::new(0, 0), Position::new(0, 1)), &mut logic),
            Err(CommandError::FriendlyTarget)
        );

        let pair = vec![
            unit(UnitClass::Pikeman, PlayerId(2)),
            unit(UnitClass::Pikeman, PlayerId(2)),
        ];
        logic.world_mut().place_units(target, pair);
        assert_eq!(
            drive(&AttackUnit::new(Position::new(0, 0), target), &mut logic),
            Err(CommandError::NotSingleUnit(target))
        );
        assert_eq!(
            drive(&AttackUnit::new(Position::new(0, 0), Position::new(3, 3)), &mut logic),
            Err(CommandError::NoUnit(Position::new(3, 3)))
        );
    }
}
