//! Rule-driven mutations shared by several commands.
//!
//! These run inside a command's `execute`, after its check passed. Nested
//! assignments go through the city commands so counters stay consistent.

use super::Logic;
use crate::command::{AssignCell, UnassignCell, drive};
use crate::constants::{LayerKind, Resource, UnitClass};
use crate::state::{ItemId, Position, Unit};

impl Logic {
    /// Releases the worker whose tile yields the least food.
    pub fn remove_city_worker(&mut self, city: ItemId) {
        let rules = self.rules();
        let (Some(properties), Some(city_cell)) = (
            rules.city(city).map(|city| &city.properties),
            rules.city_cell(city),
        ) else {
            return;
        };
        if properties.worker_count == 0 {
            return;
        }
        let Some(worker) = rules
            .compute_city_workers_production(city, Some(Resource::Food))
            .first()
            .map(|worker| worker.cell)
        else {
            return;
        };
        let command = UnassignCell::new(city_cell, worker).ignoring_player();
        if let Err(error) = drive(&command, self) {
            tracing::warn!(%city, %worker, "could not release worker: {error}");
        }
    }

    /// Puts one idle citizen to work on the best food tile while the city
    /// runs a food deficit. Returns whether a tile was assigned.
    pub fn auto_assign_citizen(&mut self, city: ItemId) -> bool {
        let rules = self.rules();
        let (Some(properties), Some(city_cell)) = (
            rules.city(city).map(|city| &city.properties),
            rules.city_cell(city),
        ) else {
            return false;
        };
        if rules.compute_city_production(city).balance.get(Resource::Food) >= 0 {
            return false;
        }
        if properties.worker_count == properties.citizen_count {
            return false;
        }
        let Some(cell) = rules
            .find_city_unworked_cells(city, Some(Resource::Food))
            .first()
            .map(|cell| cell.cell)
        else {
            return false;
        };
        drive(&AssignCell::new(city_cell, cell).ignoring_player(), self).is_ok()
    }

    pub fn auto_assign_citizens(&mut self, city: ItemId) {
        while self.auto_assign_citizen(city) {}
    }

    /// Counts `count` recruits of `class` against the city first, then
    /// against its training camps. Returns whether some counter had room.
    pub fn set_city_recruit_state(&mut self, city: ItemId, class: UnitClass, count: i32) -> bool {
        let camps: Vec<Position> = match self.world().city(city) {
            Some(city) => city
                .cells
                .iter()
                .copied()
                .filter(|cell| self.world().objects().get(*cell).is_training_camp())
                .collect(),
            None => return false,
        };

        let world = self.world_mut();
        if let Some(city) = world.city_mut(city) {
            if record_recruit(&mut city.properties.recruits, class, count) {
                return true;
            }
        }
        for cell in camps {
            let Some(camp) = world
                .item_at_mut(LayerKind::Objects, cell)
                .and_then(|item| item.as_camp_mut())
            else {
                continue;
            };
            if record_recruit(&mut camp.recruits, class, count) {
                return true;
            }
        }
        false
    }

    /// Removes one unit from a cell's stack, reforming what is left.
    pub fn remove_unit(&mut self, cell: Position, index: usize) -> Option<Unit> {
        let world = self.world_mut();
        let mut units = world.take_units(cell);
        if index >= units.len() {
            world.place_units(cell, units);
            return None;
        }
        let removed = units.remove(index);
        world.place_units(cell, units);
        self.notify(|listener, state| {
            listener.layer_cell_changed(state, LayerKind::Units, cell);
            listener.unit_died(state, cell);
        });
        Some(removed)
    }
}

fn record_recruit(
    counters: &mut crate::state::RecruitCounters,
    class: UnitClass,
    count: i32,
) -> bool {
    let Some(max) = counters.recruit_max.get(&class).copied() else {
        return false;
    };
    let Some(recruited) = counters.recruit.get_mut(&class) else {
        return false;
    };
    if *recruited + count > max {
        return false;
    }
    *recruited += count;
    true
}
