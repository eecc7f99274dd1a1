use super::{check_buildable, check_contains, notify_cell, spread};
use crate::command::city::release_cell;
use crate::command::{AssignCell, CommandTransition, cell_priority, drive};
use crate::constants::{CellUsage, CellValue, LayerKind};
use crate::engine::{CommandError, Logic};
use crate::rules::CITY_AREA;
use crate::state::{Item, ItemId, Position, TrainingCamp};

/// Writes or clears an object: roads, scenery, houses, cities, buildings
/// and training camps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetObjectsCell {
    pub cell: Position,
    pub value: CellValue,
    pub fill: bool,
    /// City or training camp to attach; camps get a fresh one when absent.
    pub item: Option<Item>,
}

/// How the objects layer changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectsPlan {
    Remove,
    Place,
    City,
    /// Production building worked by the city at `city_cell`.
    Attach { city: ItemId, city_cell: Position },
    Camp {
        city: ItemId,
        city_cell: Position,
        camp: TrainingCamp,
    },
}

impl SetObjectsCell {
    pub fn new(cell: Position, value: CellValue) -> Self {
        Self {
            cell,
            value,
            fill: false,
            item: None,
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.item = Some(item.into());
        self
    }

    fn reject_item(&self) -> Result<(), CommandError> {
        match self.item {
            Some(_) => Err(CommandError::UnexpectedItem),
            None => Ok(()),
        }
    }

    fn check_remove(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        if logic.world().objects().get(self.cell).is_empty() {
            return Err(CommandError::Unchanged(self.cell));
        }
        Ok(ObjectsPlan::Remove)
    }

    fn check_road(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        self.reject_item()?;
        let world = logic.world();
        let cell = self.cell;
        let objects = world.objects().get(cell);
        if objects.is_road() {
            return Ok(ObjectsPlan::Place);
        }
        if world.impassable().get(cell) != CellValue::River {
            check_buildable(logic, cell)?;
            return Ok(ObjectsPlan::Place);
        }
        let reason = if !objects.is_empty() {
            "There is already something here"
        } else if !world
            .impassable()
            .mask4(cell, CellValue::River)
            .is_straight()
        {
            "Bridges need a straight river"
        } else {
            return Ok(ObjectsPlan::Place);
        };
        Err(CommandError::CannotBuild { cell, reason })
    }

    fn check_city(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        let Some(Item::City(_)) = &self.item else {
            return Err(CommandError::ItemRequired(CellValue::City));
        };
        for cell in city_footprint(self.cell) {
            check_buildable(logic, cell)?;
        }
        let world = logic.world();
        for dy in -1..=2 {
            for dx in -1..=2 {
                let cell = self.cell.offset(dx, dy);
                if world.contains(cell) && world.objects().get(cell) == CellValue::City {
                    return Err(CommandError::CannotBuild {
                        cell: self.cell,
                        reason: "Too close to another city",
                    });
                }
            }
        }
        Ok(ObjectsPlan::City)
    }

    /// Closest city whose area covers the cell.
    fn find_city(&self, logic: &Logic) -> Result<(Position, ItemId), CommandError> {
        let rules = logic.rules();
        let (city_cell, city) = rules
            .find_closest_city(self.cell)
            .ok_or(CommandError::NoCityNearby(self.cell))?;
        if !rules.is_in_city_area(city_cell, self.cell) {
            return Err(CommandError::OutsideCityArea(self.cell));
        }
        Ok((city_cell, city))
    }

    fn check_building(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        let (city_cell, city) = self.find_city(logic)?;
        self.reject_item()?;
        check_buildable(logic, self.cell)?;
        Ok(ObjectsPlan::Attach { city, city_cell })
    }

    fn check_camp(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        let (city_cell, city) = self.find_city(logic)?;
        check_buildable(logic, self.cell)?;
        let camp = match &self.item {
            Some(Item::TrainingCamp(camp)) => camp.clone(),
            Some(_) => return Err(CommandError::UnexpectedItem),
            None => {
                let owner = logic
                    .world()
                    .city(city)
                    .ok_or(CommandError::NoCity(city_cell))?
                    .player;
                TrainingCamp::new(owner, logic.content().require_camp(self.value)?)
            }
        };
        Ok(ObjectsPlan::Camp {
            city,
            city_cell,
            camp,
        })
    }

    fn remove(&self, logic: &mut Logic) {
        let cell = self.cell;
        let Some(city) = logic.world().city_id_at(cell) else {
            release_cell(logic, cell);
            logic
                .world_mut()
                .set_value(LayerKind::Objects, cell, CellValue::Empty);
            notify_cell(logic, LayerKind::Objects, cell);
            return;
        };

        let city_cell = logic.rules().city_cell(city).unwrap_or(cell);
        let claimed: Vec<Position> = logic
            .world()
            .city(city)
            .map(|city| city.cells.iter().copied().collect())
            .unwrap_or_default();
        for claimed_cell in claimed {
            logic.world_mut().unassign(claimed_cell);
            logic.notify(|listener, state| {
                listener.city_cell_unassigned(state, city_cell, claimed_cell);
            });
        }
        let footprint = logic.world().objects().item_cells(city);
        for footprint_cell in footprint {
            logic
                .world_mut()
                .set_value(LayerKind::Objects, footprint_cell, CellValue::Empty);
            notify_cell(logic, LayerKind::Objects, footprint_cell);
        }
        logic.notify(|listener, state| listener.resources_changed(state));
    }

    fn found_city(&self, logic: &mut Logic) {
        let Some(Item::City(city)) = &self.item else {
            return;
        };
        let mut city = city.clone();
        city.properties.citizen_count = 0;
        city.properties.worker_count = 0;
        city.cells.clear();

        let footprint = city_footprint(self.cell);
        for cell in footprint {
            release_cell(logic, cell);
        }
        let id = logic
            .world_mut()
            .attach_item(LayerKind::Objects, &footprint, CellValue::City, city.into());
        for cell in footprint {
            notify_cell(logic, LayerKind::Objects, cell);
        }

        // Houses, buildings and camps in reach join the new city.
        let claimable: Vec<Position> = {
            let rules = logic.rules();
            CITY_AREA
                .cells(self.cell)
                .filter(|cell| rules.world().contains(*cell))
                .filter(|cell| {
                    !matches!(rules.city_cell_usage(*cell), CellUsage::Worker | CellUsage::None)
                })
                .collect()
        };
        for cell in claimable {
            let command = AssignCell::new(self.cell, cell).ignoring_player();
            if let Err(error) = drive(&command, logic) {
                tracing::debug!(%cell, "new city left tile unclaimed: {error}");
            }
        }
        logic.auto_assign_citizens(id);
    }

    fn attach(&self, logic: &mut Logic, city_cell: Position, camp: Option<TrainingCamp>) {
        let cell = self.cell;
        release_cell(logic, cell);
        let world = logic.world_mut();
        match camp {
            Some(camp) => {
                world.attach_item(LayerKind::Objects, &[cell], self.value, camp.into());
            }
            None => world.set_value(LayerKind::Objects, cell, self.value),
        }
        notify_cell(logic, LayerKind::Objects, cell);
        if let Err(error) = drive(&AssignCell::new(city_cell, cell).ignoring_player(), logic) {
            tracing::debug!(%cell, %city_cell, "building left unassigned: {error}");
        }
    }
}

/// The four cells a city covers from its top-left cell.
fn city_footprint(top_left: Position) -> [Position; 4] {
    [
        top_left,
        top_left.offset(1, 0),
        top_left.offset(0, 1),
        top_left.offset(1, 1),
    ]
}

impl CommandTransition for SetObjectsCell {
    type Plan = ObjectsPlan;

    fn priority(&self) -> u64 {
        cell_priority(self.cell)
    }

    fn check(&self, logic: &Logic) -> Result<ObjectsPlan, CommandError> {
        if !self.value.is_empty() && !self.value.is_valid_for(LayerKind::Objects) {
            return Err(CommandError::InvalidValue {
                layer: LayerKind::Objects,
                value: self.value,
            });
        }
        check_contains(logic, self.cell)?;
        if self.value.is_empty() {
            return self.check_remove(logic);
        }
        if logic.world().objects().get(self.cell) == self.value {
            return Err(CommandError::Unchanged(self.cell));
        }

        if self.value.is_road() {
            self.check_road(logic)
        } else if self.value == CellValue::City {
            self.check_city(logic)
        } else if self.value.is_production_building() {
            self.check_building(logic)
        } else if self.value.is_training_camp() {
            self.check_camp(logic)
        } else {
            self.reject_item()?;
            check_buildable(logic, self.cell)?;
            Ok(ObjectsPlan::Place)
        }
    }

    fn execute(&self, plan: ObjectsPlan, logic: &mut Logic) {
        let cell = self.cell;
        match plan {
            ObjectsPlan::Remove => self.remove(logic),
            ObjectsPlan::Place => {
                if !self.value.is_road() {
                    release_cell(logic, cell);
                }
                logic
                    .world_mut()
                    .set_value(LayerKind::Objects, cell, self.value);
                notify_cell(logic, LayerKind::Objects, cell);
            }
            ObjectsPlan::City => self.found_city(logic),
            ObjectsPlan::Attach { city_cell, .. } => self.attach(logic, city_cell, None),
            ObjectsPlan::Camp {
                city_cell, camp, ..
            } => self.attach(logic, city_cell, Some(camp)),
        }
        if self.fill {
            spread(logic, cell, |cell| {
                Self {
                    cell,
                    ..self.clone()
                }
                .into()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{UnitClass, WorldType};
    use crate::state::PlayerId;
    use crate::testing::{city_world, earth_world, logic, new_city, two_players};

    const CITY: Position = Position::new(10, 10);

    #[test]
    fn bridges_need_a_straight_river() {
        let mut world = earth_world(5, 5, WorldType::Strategic);
        for y in 0..5 {
            world.set_value(LayerKind::Impassable, Position::new(2, y), CellValue::River);
        }
        world.set_value(LayerKind::Impassable, Position::new(3, 4), CellValue::River);
        let mut logic = logic(two_players(world));

        drive(
            &SetObjectsCell::new(Position::new(2, 2), CellValue::RoadDirt),
            &mut logic,
        )
        .unwrap();
        assert_eq!(
            drive(
                &SetObjectsCell::new(Position::new(2, 4), CellValue::RoadDirt),
                &mut logic
            ),
            Err(CommandError::CannotBuild {
                cell: Position::new(2, 4),
                reason: "Bridges need a straight river",
            })
        );
        // Upgrading an existing road keeps the bridge.
        drive(
            &SetObjectsCell::new(Position::new(2, 2), CellValue::RoadStone),
            &mut logic,
        )
        .unwrap();
    }

    #[test]
    fn cities_keep_their_distance() {
        let (state, _) = city_world(CITY);
        let mut logic = logic(state);
        let near = SetObjectsCell::new(Position::new(12, 12), CellValue::City)
            .with_item(new_city(PlayerId(2)));
        assert_eq!(
            drive(&near, &mut logic),
            Err(CommandError::CannotBuild {
                cell: Position::new(12, 12),
                reason: "Too close to another city",
            })
        );
        assert_eq!(
            drive(&SetObjectsCell::new(Position::new(20, 20), CellValue::City), &mut logic),
            Err(CommandError::ItemRequired(CellValue::City))
        );
        let far = SetObjectsCell::new(Position::new(13, 10), CellValue::City)
            .with_item(new_city(PlayerId(2)));
        drive(&far, &mut logic).unwrap();
        assert_eq!(logic.rules().cities().len(), 2);
    }

    #[test]
    fn new_city_claims_nearby_houses() {
        let mut world = earth_world(32, 32, WorldType::Strategic);
        world.set_value(LayerKind::Objects, Position::new(9, 9), CellValue::Houses);
        world.set_value(LayerKind::Objects, Position::new(12, 12), CellValue::Houses);
        let mut logic = logic(two_players(world));

        let command = SetObjectsCell::new(CITY, CellValue::City).with_item(new_city(PlayerId(1)));
        drive(&command, &mut logic).unwrap();

        let (_, id) = logic.rules().city_at(CITY).unwrap();
        let city = logic.world().city(id).unwrap();
        assert_eq!(city.properties.citizen_count, 2);
        assert!(city.is_assigned(Position::new(9, 9)));
        assert!(city.is_assigned(Position::new(12, 12)));
        // Two citizens eat four food against two base food: one farmer.
        assert_eq!(city.properties.worker_count, 1);
    }

    #[test]
    fn full_new_city_leaves_extra_houses_unclaimed() {
        let mut world = earth_world(32, 32, WorldType::Strategic);
        let houses = [Position::new(9, 9), Position::new(12, 12)];
        for cell in houses {
            world.set_value(LayerKind::Objects, cell, CellValue::Houses);
        }
        let mut logic = logic(two_players(world));
        let mut city = new_city(PlayerId(1));
        city.properties.citizen_count_max = 1;

        drive(&SetObjectsCell::new(CITY, CellValue::City).with_item(city), &mut logic).unwrap();

        let (_, id) = logic.rules().city_at(CITY).unwrap();
        let city = logic.world().city(id).unwrap();
        assert_eq!(city.properties.citizen_count, 1);
        let claimed = houses.iter().filter(|cell| city.is_assigned(**cell)).count();
        assert_eq!(claimed, 1);
        for cell in houses {
            assert_eq!(logic.world().layer(LayerKind::Objects).get(cell), CellValue::Houses);
        }
    }

    #[test]
    fn buildings_attach_to_the_closest_city() {
        let (state, city) = city_world(CITY);
        let mut logic = logic(state);

        drive(
            &SetObjectsCell::new(Position::new(13, 10), CellValue::Mill),
            &mut logic,
        )
        .unwrap();
        assert_eq!(logic.world().assigned_city(Position::new(13, 10)), Some(city));
        assert_eq!(
            logic.rules().city_buildings(city),
            vec![(Position::new(13, 10), CellValue::Mill)]
        );

        assert_eq!(
            drive(
                &SetObjectsCell::new(Position::new(30, 30), CellValue::Mill),
                &mut logic
            ),
            Err(CommandError::OutsideCityArea(Position::new(30, 30)))
        );
    }

    #[test]
    fn camps_get_a_fresh_training_camp() {
        let (state, city) = city_world(CITY);
        let mut logic = logic(state);
        drive(
            &SetObjectsCell::new(Position::new(14, 10), CellValue::KnightCamp),
            &mut logic,
        )
        .unwrap();

        let camp = logic
            .world()
            .item_at(LayerKind::Objects, Position::new(14, 10))
            .and_then(Item::as_camp)
            .unwrap();
        assert_eq!(camp.player, PlayerId(1));
        assert_eq!(camp.recruits.max(UnitClass::Knight), 1);
        assert_eq!(logic.rules().city_recruit_state(city).max(UnitClass::Knight), 1);
    }

    #[test]
    fn removing_a_city_frees_everything() {
        let (state, city) = city_world(CITY);
        let mut logic = logic(state);
        drive(
            &SetObjectsCell::new(Position::new(13, 10), CellValue::Mill),
            &mut logic,
        )
        .unwrap();

        drive(&SetObjectsCell::new(Position::new(11, 11), CellValue::Empty), &mut logic).unwrap();
        let world = logic.world();
        assert!(world.city(city).is_none());
        assert!(world.assignments().iter().next().is_none());
        for cell in city_footprint(CITY) {
            assert_eq!(world.objects().get(cell), CellValue::Empty);
        }
        assert_eq!(world.objects().get(Position::new(13, 10)), CellValue::Mill);
    }

    #[test]
    fn removing_a_house_updates_its_city() {
        let (state, city) = city_world(CITY);
        let mut logic = logic(state);
        logic
            .world_mut()
            .set_value(LayerKind::Objects, Position::new(9, 9), CellValue::Houses);
        drive(&AssignCell::new(CITY, Position::new(9, 9)), &mut logic).unwrap();

        drive(&SetObjectsCell::new(Position::new(9, 9), CellValue::Empty), &mut logic).unwrap();
        assert_eq!(logic.world().city(city).unwrap().properties.citizen_count, 0);
        assert!(!logic.world().assignments().has(Position::new(9, 9)));
    }

    #[test]
    fn trees_fill_until_blocked() {
        let mut world = earth_world(3, 1, WorldType::Strategic);
        world.set_value(LayerKind::Ground, Position::new(2, 0), CellValue::Sea);
        let mut logic = logic(two_players(world));
        logic.add_command(SetObjectsCell::new(Position::new(0, 0), CellValue::Trees).filled());
        logic.run_until_idle(10);

        assert_eq!(logic.world().objects().get(Position::new(1, 0)), CellValue::Trees);
        assert_eq!(logic.world().objects().get(Position::new(2, 0)), CellValue::Empty);
    }
}
