use super::notify_unit_changed;
use crate::command::{CommandTransition, cell_priority};
use crate::config::GameConfig;
use crate::constants::LayerKind;
use crate::engine::{CommandError, Logic};
use crate::pathfinding::{DistanceMap, INFINITE_COST, MoveRequest, Path};
use crate::state::{Position, Unit};

/// Moves units one hop along a precomputed path.
///
/// `path` is stored target first, as [`DistanceMap::path`] returns it, so
/// the next hop is the last cell. After a hop the rest of the path is queued
/// as a new command from the reached cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveUnit {
    pub from: Position,
    pub path: Vec<Position>,
    /// Stack indices to move; the whole stack when `None`.
    pub selection: Option<Vec<usize>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub to: Position,
    /// Sorted stack indices of the moving units.
    pub moving: Vec<usize>,
    pub cost: u32,
}

impl MoveUnit {
    pub fn new(from: Position, path: Vec<Position>) -> Self {
        Self {
            from,
            path,
            selection: None,
        }
    }

    /// Follows a path computed by a [`DistanceMap`] rooted at `from`.
    pub fn along(from: Position, path: &Path) -> Self {
        Self::new(from, path.cells.clone())
    }

    pub fn with_selection(mut self, selection: Vec<usize>) -> Self {
        self.selection = Some(selection);
        self
    }

    fn selected(&self, stack: usize) -> Result<Vec<usize>, CommandError> {
        let Some(selection) = &self.selection else {
            return Ok((0..stack).collect());
        };
        let mut moving = selection.clone();
        moving.sort_unstable();
        moving.dedup();
        let valid = !moving.is_empty()
            && moving.len() == selection.len()
            && moving.last().is_some_and(|last| *last < stack);
        if valid {
            Ok(moving)
        } else {
            Err(CommandError::InvalidSelection)
        }
    }
}

impl CommandTransition for MoveUnit {
    type Plan = MovePlan;

    fn priority(&self) -> u64 {
        cell_priority(self.from)
    }

    fn check(&self, logic: &Logic) -> Result<MovePlan, CommandError> {
        let from = self.from;
        let to = *self.path.last().ok_or(CommandError::EmptyPath)?;
        if to == from {
            return Err(CommandError::SameCell);
        }
        let world = logic.world();
        for cell in [from, to] {
            if !world.contains(cell) {
                return Err(CommandError::OutsideWorld(cell));
            }
        }
        let units = world.units_at(from);
        let player = units.first().ok_or(CommandError::NoUnit(from))?.player;
        if player != logic.state().player_id() {
            return Err(CommandError::NotOwner);
        }
        let moving = self.selected(units.len())?;

        let cap = logic.rules().army_max_size();
        if self.path.len() == 1 {
            let present = world.units_at(to);
            let merges = present.iter().all(|unit| unit.player == player);
            if merges && present.len() + moving.len() > cap {
                return Err(CommandError::ArmyFull { max: cap });
            }
        }

        let request = MoveRequest::new(player, from)
            .with_destination(to)
            .with_radius(GameConfig::MOVE_PROBE_RADIUS)
            .with_army(moving.len(), cap);
        let cost = DistanceMap::new(world, logic.content().move_costs(), &request).cost(to);
        if cost >= INFINITE_COST {
            return Err(CommandError::Unreachable(to));
        }
        let available = moving
            .iter()
            .map(|index| units[*index].properties.move_points)
            .min()
            .unwrap_or(0);
        if i64::from(cost) > i64::from(available) {
            return Err(CommandError::NotEnoughMovePoints { cost, available });
        }
        Ok(MovePlan { to, moving, cost })
    }

    fn execute(&self, plan: MovePlan, logic: &mut Logic) {
        let from = self.from;
        let to = plan.to;
        let world = logic.world_mut();

        let (mut moving, staying): (Vec<(usize, Unit)>, Vec<(usize, Unit)>) = world
            .take_units(from)
            .into_iter()
            .enumerate()
            .partition(|(index, _)| plan.moving.binary_search(index).is_ok());
        let cost = i32::try_from(plan.cost).unwrap_or(i32::MAX);
        for (_, unit) in &mut moving {
            unit.properties.move_points -= cost;
        }
        world.place_units(from, staying.into_iter().map(|(_, unit)| unit).collect());

        let mut arrived = world.take_units(to);
        let existing = arrived.len();
        arrived.extend(moving.into_iter().map(|(_, unit)| unit));
        let moved = arrived.len() - existing;
        world.place_units(to, arrived);

        logic.notify(|listener, state| {
            listener.layer_cell_changed(state, LayerKind::Units, from);
            listener.layer_cell_changed(state, LayerKind::Units, to);
            listener.unit_moved(state, from, to);
        });
        notify_unit_changed(logic, to);

        let remaining = &self.path[..self.path.len() - 1];
        if !remaining.is_empty() {
            let selection = (existing > 0).then(|| (existing..existing + moved).collect());
            tracing::debug!(%from, %to, hops = remaining.len(), "queueing next hop");
            logic.add_command(MoveUnit {
                from: to,
                path: remaining.to_vec(),
                selection,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::drive;
    use crate::constants::{CellValue, UnitClass, WorldType};
    use crate::state::PlayerId;
    use crate::testing::{earth_world, logic, two_players, unit};

    fn pikemen(count: usize) -> Vec<Unit> {
        (0..count)
            .map(|_| unit(UnitClass::Pikeman, PlayerId(1)))
            .collect()
    }

    fn path(cells: &[(i32, i32)]) -> Vec<Position> {
        cells.iter().rev().map(|cell| Position::from(*cell)).collect()
    }

    #[test]
    fn a_hop_spends_move_points_and_queues_the_rest() {
        let mut world = earth_world(6, 3, WorldType::Strategic);
        world.place_units(Position::new(0, 1), pikemen(2));
        let mut logic = logic(two_players(world));

        let command = MoveUnit::new(Position::new(0, 1), path(&[(1, 1), (2, 1), (3, 1)]));
        drive(&command, &mut logic).unwrap();

        let moved = logic.world().units_at(Position::new(1, 1));
        assert_eq!(moved.len(), 2);
        assert!(moved.iter().all(|unit| unit.properties.move_points == 6));
        assert!(logic.world().units_at(Position::new(0, 1)).is_empty());
        assert_eq!(logic.pending(), 1);

        logic.run_until_idle(5);
        let arrived = logic.world().units_at(Position::new(3, 1));
        assert_eq!(arrived.len(), 2);
        assert!(arrived.iter().all(|unit| unit.properties.move_points == 0));
    }

    #[test]
    fn selections_split_the_stack() {
        let mut world = earth_world(4, 1, WorldType::Strategic);
        let mut units = pikemen(3);
        units[2].properties.move_points = 1;
        world.place_units(Position::new(0, 0), units);
        let mut logic = logic(two_players(world));

        let tired = MoveUnit::new(Position::new(0, 0), path(&[(1, 0)])).with_selection(vec![2]);
        assert_eq!(
            drive(&tired, &mut logic),
            Err(CommandError::NotEnoughMovePoints {
                cost: 3,
                available: 1
            })
        );
        let bad = MoveUnit::new(Position::new(0, 0), path(&[(1, 0)])).with_selection(vec![0, 0]);
        assert_eq!(drive(&bad, &mut logic), Err(CommandError::InvalidSelection));

        let fresh = MoveUnit::new(Position::new(0, 0), path(&[(1, 0)])).with_selection(vec![0, 1]);
        drive(&fresh, &mut logic).unwrap();
        assert_eq!(logic.world().units_at(Position::new(0, 0)).len(), 1);
        assert_eq!(logic.world().units().get(Position::new(0, 0)), CellValue::Unit);
        assert_eq!(logic.world().units().get(Position::new(1, 0)), CellValue::Army);
    }

    #[test]
    fn merging_respects_the_army_cap() {
        let mut world = earth_world(3, 1, WorldType::Strategic);
        world.place_units(Position::new(0, 0), pikemen(6));
        world.place_units(Position::new(1, 0), pikemen(5));
        let mut logic = logic(two_players(world));

        let all = MoveUnit::new(Position::new(0, 0), path(&[(1, 0)]));
        assert_eq!(drive(&all, &mut logic), Err(CommandError::ArmyFull { max: 10 }));

        let five = all.clone().with_selection(vec![0, 1, 2, 3, 4]);
        drive(&five, &mut logic).unwrap();
        assert_eq!(logic.world().units_at(Position::new(1, 0)).len(), 10);
        assert_eq!(logic.world().units_at(Position::new(0, 0)).len(), 1);
    }

    #[test]
    fn enemies_block_the_way() {
        let mut world = earth_world(3, 1, WorldType::Strategic);
        world.place_units(Position::new(0, 0), pikemen(1));
        world.place_units(Position::new(1, 0), vec![unit(UnitClass::Bowman, PlayerId(2))]);
        let mut logic = logic(two_players(world));

        assert_eq!(
            drive(&MoveUnit::new(Position::new(0, 0), path(&[(1, 0)])), &mut logic),
            Err(CommandError::Unreachable(Position::new(1, 0)))
        );
        logic.state_mut().set_player_id(PlayerId(2));
        assert_eq!(
            drive(&MoveUnit::new(Position::new(0, 0), path(&[(1, 0)])), &mut logic),
            Err(CommandError::NotOwner)
        );
    }

    #[test]
    fn paths_from_the_distance_map_are_followed() {
        let mut world = earth_world(5, 5, WorldType::Strategic);
        world.place_units(Position::new(0, 0), pikemen(1));
        let mut logic = logic(two_players(world));
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0));
        let map = DistanceMap::new(logic.world(), logic.content().move_costs(), &request);
        let route = map.path(Position::new(2, 0));
        assert_eq!(route.len(), 2);

        logic.add_command(MoveUnit::along(Position::new(0, 0), &route));
        assert_eq!(logic.run_until_idle(5), 2);
        assert_eq!(logic.world().units_at(Position::new(2, 0)).len(), 1);
    }
}
