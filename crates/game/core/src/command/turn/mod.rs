//! Handing the turn to the next player.
mod sweep;

use super::{CommandTransition, STATE_PRIORITY};
use crate::engine::{CommandError, Logic};
use crate::state::PlayerId;

/// Passes the turn round-robin. When the last player hands over, the round
/// ends: units rest, players pay upkeep, cities grow or starve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextTurn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnPlan {
    pub next: PlayerId,
    /// The round ends before `next` plays.
    pub wraps: bool,
}

impl CommandTransition for NextTurn {
    type Plan = TurnPlan;

    fn priority(&self) -> u64 {
        STATE_PRIORITY
    }

    fn check(&self, logic: &Logic) -> Result<TurnPlan, CommandError> {
        let state = logic.state();
        let current = state.player_id();
        let ids = state.player_ids();
        let index = ids
            .iter()
            .position(|id| *id == current)
            .ok_or(CommandError::UnknownPlayer(current))?;
        let wraps = index + 1 >= ids.len();
        let next = if wraps { ids[0] } else { ids[index + 1] };
        Ok(TurnPlan { next, wraps })
    }

    fn execute(&self, plan: TurnPlan, logic: &mut Logic) {
        if plan.wraps {
            sweep::end_round(logic);
        }
        logic.state_mut().set_player_id(plan.next);
        logic.notify(|listener, state| listener.turn_changed(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::drive;
    use crate::constants::{Resource, UnitClass, WorldType};
    use crate::state::{GameState, Player, Position};
    use crate::testing::{earth_world, logic, two_players, unit};

    #[test]
    fn players_take_turns_round_robin() {
        let mut logic = logic(two_players(earth_world(2, 2, WorldType::Strategic)));
        let mut seen = Vec::new();
        for _ in 0..4 {
            drive(&NextTurn, &mut logic).unwrap();
            seen.push((logic.state().player_id(), logic.state().turn));
        }
        assert_eq!(
            seen,
            vec![
                (PlayerId(2), 1),
                (PlayerId(1), 2),
                (PlayerId(2), 2),
                (PlayerId(1), 3),
            ]
        );
    }

    #[test]
    fn only_the_last_player_ends_the_round() {
        let players = (1..=3).map(|id| Player::new(PlayerId(id))).collect();
        let state = GameState::with_players(earth_world(4, 4, WorldType::Strategic), players);
        let mut logic = logic(state);
        let cell = Position::new(1, 1);
        let mut pikeman = unit(UnitClass::Pikeman, PlayerId(1));
        pikeman.properties.move_points = 0;
        logic.world_mut().place_units(cell, vec![pikeman]);
        if let Some(player) = logic.state_mut().player_mut(PlayerId(1)) {
            player.set_resource(Resource::Gold, 10);
        }
        logic.state_mut().set_player_id(PlayerId(2));
        let turn = logic.state().turn;
        let rested = |logic: &Logic| logic.world().units_at(cell)[0].properties.move_points;

        drive(&NextTurn, &mut logic).unwrap();
        assert_eq!((logic.state().player_id(), logic.state().turn), (PlayerId(3), turn));
        assert_eq!(rested(&logic), 0);

        drive(&NextTurn, &mut logic).unwrap();
        assert_eq!((logic.state().player_id(), logic.state().turn), (PlayerId(1), turn + 1));
        assert_eq!(rested(&logic), 9);
        let gold_after_one_sweep = logic.state().players()[0].resource(Resource::Gold);
        assert!(gold_after_one_sweep < 10);

        drive(&NextTurn, &mut logic).unwrap();
        assert_eq!(logic.state().turn, turn + 1);
        assert_eq!(
            logic.state().players()[0].resource(Resource::Gold),
            gold_after_one_sweep
        );
    }

    #[test]
    fn checking_twice_changes_nothing() {
        let logic = logic(two_players(earth_world(2, 2, WorldType::Strategic)));
        let before = logic.state().clone();
        let first = NextTurn.check(&logic).unwrap();
        let second = NextTurn.check(&logic).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, TurnPlan { next: PlayerId(2), wraps: false });
        assert_eq!(logic.state(), &before);
    }
}
