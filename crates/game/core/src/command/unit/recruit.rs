use super::{check_affordable, spend};
use crate::command::{CommandTransition, cell_priority};
use crate::constants::{LayerKind, ResourceBag, UnitClass};
use crate::engine::{CommandError, Logic};
use crate::state::{ItemId, Position, Unit};

/// A city trains a unit on a free cell of its footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecruitUnit {
    pub city_cell: Position,
    pub class: UnitClass,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecruitPlan {
    pub city: ItemId,
    pub cell: Position,
    pub unit: Unit,
    pub cost: ResourceBag,
}

impl RecruitUnit {
    pub fn new(city_cell: Position, class: UnitClass) -> Self {
        Self { city_cell, class }
    }
}

impl CommandTransition for RecruitUnit {
    type Plan = RecruitPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.city_cell)
    }

    fn check(&self, logic: &Logic) -> Result<RecruitPlan, CommandError> {
        let properties = logic.content().require_unit(self.class)?;
        let world = logic.world();
        if !world.contains(self.city_cell) {
            return Err(CommandError::OutsideWorld(self.city_cell));
        }
        let rules = logic.rules();
        let (_, city) = rules
            .city_at(self.city_cell)
            .ok_or(CommandError::NoCity(self.city_cell))?;
        let owner = rules
            .city(city)
            .ok_or(CommandError::NoCity(self.city_cell))?
            .player;
        if owner != logic.state().player_id() {
            return Err(CommandError::NotOwner);
        }

        let recruits = rules.city_recruit_state(city);
        if !recruits.recruit_max.contains_key(&self.class) {
            return Err(CommandError::CannotRecruit(self.class));
        }
        if recruits.recruited(self.class) >= recruits.max(self.class) {
            return Err(CommandError::RecruitLimit(self.class));
        }
        check_affordable(logic, &properties.cost)?;

        let mut footprint = world.objects().item_cells(city);
        footprint.sort_by_key(|cell| (cell.y, cell.x));
        let cell = footprint
            .into_iter()
            .find(|cell| world.units().get(*cell).is_empty())
            .ok_or(CommandError::NoRoom)?;
        Ok(RecruitPlan {
            city,
            cell,
            cost: properties.cost.clone(),
            unit: Unit::new(self.class, owner, properties),
        })
    }

    fn execute(&self, plan: RecruitPlan, logic: &mut Logic) {
        let cell = plan.cell;
        logic.world_mut().place_units(cell, vec![plan.unit]);
        if !logic.set_city_recruit_state(plan.city, self.class, 1) {
            tracing::warn!(city = %plan.city, class = %self.class, "recruit counter already full");
        }
        logic.notify(|listener, state| {
            listener.layer_cell_changed(state, LayerKind::Units, cell);
            listener.unit_recruited(state, cell);
        });
        spend(logic, &plan.cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{SetObjectsCell, drive};
    use crate::constants::{CellValue, Resource};
    use crate::state::PlayerId;
    use crate::testing::{city_world, logic};

    const CITY: Position = Position::new(10, 10);

    fn rich_city() -> (Logic, ItemId) {
        let (state, city) = city_world(CITY);
        let mut logic = logic(state);
        if let Some(player) = logic.state_mut().current_player_mut() {
            for resource in [Resource::Gold, Resource::Wood, Resource::Stone] {
                player.set_resource(resource, 100);
            }
        }
        (logic, city)
    }

    #[test]
    fn recruits_appear_on_the_footprint() {
        let (mut logic, city) = rich_city();
        drive(&RecruitUnit::new(Position::new(11, 11), UnitClass::Worker), &mut logic).unwrap();

        let recruit = &logic.world().units_at(CITY)[0];
        assert_eq!(recruit.class, UnitClass::Worker);
        assert_eq!(recruit.player, PlayerId(1));
        assert_eq!(logic.rules().city_recruit_state(city).recruited(UnitClass::Worker), 1);
        assert_eq!(
            logic.state().player(PlayerId(1)).unwrap().resource(Resource::Gold),
            90
        );
        assert_eq!(
            drive(&RecruitUnit::new(CITY, UnitClass::Worker), &mut logic),
            Err(CommandError::RecruitLimit(UnitClass::Worker))
        );
    }

    #[test]
    fn camps_unlock_classes() {
        let (mut logic, _) = rich_city();
        assert_eq!(
            drive(&RecruitUnit::new(CITY, UnitClass::Pikeman), &mut logic),
            Err(CommandError::CannotRecruit(UnitClass::Pikeman))
        );
        drive(&SetObjectsCell::new(Position::new(13, 10), CellValue::Camp), &mut logic).unwrap();
        drive(&RecruitUnit::new(CITY, UnitClass::Pikeman), &mut logic).unwrap();
        assert_eq!(logic.world().units_at(CITY)[0].class, UnitClass::Pikeman);
    }

    #[test]
    fn a_full_footprint_has_no_room() {
        let (mut logic, city) = rich_city();
        if let Some(city) = logic.world_mut().city_mut(city) {
            city.properties.recruits.recruit_max.insert(UnitClass::Worker, 5);
        }
        for _ in 0..4 {
            drive(&RecruitUnit::new(CITY, UnitClass::Worker), &mut logic).unwrap();
        }
        assert_eq!(
            drive(&RecruitUnit::new(CITY, UnitClass::Worker), &mut logic),
            Err(CommandError::NoRoom)
        );
    }

    #[test]
    fn only_the_owner_recruits() {
        let (mut logic, _) = rich_city();
        logic.state_mut().set_player_id(PlayerId(2));
        assert_eq!(
            drive(&RecruitUnit::new(CITY, UnitClass::Worker), &mut logic),
            Err(CommandError::NotOwner)
        );
        assert_eq!(
            drive(&RecruitUnit::new(Position::new(3, 3), UnitClass::Worker), &mut logic),
            Err(CommandError::NoCity(Position::new(3, 3)))
        );
    }
}
