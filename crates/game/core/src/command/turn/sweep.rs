//! End-of-round resolution.

use std::cmp::Reverse;

use tracing::{debug, info, warn};

use crate::command::{AssignCell, UnassignCell, drive};
use crate::constants::{CellValue, LayerKind, Resource, ResourceBag};
use crate::engine::Logic;
use crate::state::{ItemId, PlayerId, Position};

pub(super) fn end_round(logic: &mut Logic) {
    for (_, item) in logic.world_mut().items_mut().iter_mut() {
        for unit in item.units_mut() {
            unit.properties.reset_points();
        }
    }

    for player in logic.state().player_ids() {
        settle_player(logic, player);
    }

    for (city_cell, city) in logic.rules().cities() {
        grow_city(logic, city_cell, city);
    }

    let abandoned: Vec<Position> = {
        let world = logic.world();
        world
            .objects()
            .find_values(&[CellValue::Houses])
            .into_iter()
            .filter(|cell| !world.assignments().has(*cell))
            .collect()
    };
    for cell in abandoned {
        logic
            .world_mut()
            .set_value(LayerKind::Objects, cell, CellValue::Empty);
        logic.notify(|listener, state| {
            listener.layer_cell_changed(state, LayerKind::Objects, cell);
        });
    }

    for cell in logic.rules().find_training_camps() {
        if let Some(camp) = logic
            .world_mut()
            .item_at_mut(LayerKind::Objects, cell)
            .and_then(|item| item.as_camp_mut())
        {
            camp.recruits.reset();
        }
    }

    let state = logic.state_mut();
    state.turn += 1;
    info!(turn = state.turn, "round resolved");
    logic.notify(|listener, state| listener.resources_changed(state));
}

/// Stock plus what the player's cities yield this round. Food never
/// reaches the player.
fn projected_resources(logic: &Logic, player: PlayerId) -> ResourceBag {
    let rules = logic.rules();
    let mut resources = logic
        .state()
        .player(player)
        .map(|player| player.resources().clone())
        .unwrap_or_default();
    for (_, city) in rules.player_cities(player) {
        resources.add_bag(&rules.compute_city_production(city).balance, 1);
    }
    resources.remove(Resource::Food);
    resources
}

/// Shuts one building down whose upkeep uses `shortage`.
fn disable_building(logic: &mut Logic, player: PlayerId, shortage: Resource) -> bool {
    let candidates: Vec<(Position, Position)> = {
        let rules = logic.rules();
        let mut candidates = Vec::new();
        for (city_cell, id) in rules.player_cities(player) {
            let Some(city) = rules.city(id) else {
                continue;
            };
            for (cell, building) in rules.city_buildings(id) {
                let uses = city
                    .properties
                    .building_upkeep(building)
                    .is_some_and(|upkeep| upkeep.get(shortage) > 0);
                if uses {
                    candidates.push((city_cell, cell));
                }
            }
        }
        candidates
    };
    for (city_cell, cell) in candidates {
        if drive(&UnassignCell::new(city_cell, cell).ignoring_player(), logic).is_ok() {
            debug!(%player, %cell, %shortage, "building shut down");
            return true;
        }
    }
    false
}

fn building_count(logic: &Logic, player: PlayerId) -> usize {
    let rules = logic.rules();
    rules
        .player_cities(player)
        .into_iter()
        .map(|(_, city)| rules.city_buildings(city).len())
        .sum()
}

fn settle_player(logic: &mut Logic, player: PlayerId) {
    let bound = building_count(logic, player) + 1;
    let mut attempts = 0;
    let resources = loop {
        let resources = projected_resources(logic, player);
        let shortage = resources
            .iter()
            .filter(|(_, amount)| *amount < 0)
            .map(|(resource, _)| resource)
            .last();
        let Some(shortage) = shortage else {
            break resources;
        };
        if attempts == bound {
            warn!(%player, attempts, %shortage, "gave up shutting buildings down");
            break resources;
        }
        if !disable_building(logic, player, shortage) {
            break resources;
        }
        attempts += 1;
    };

    let mut upkeeps: Vec<(Position, usize, ResourceBag, i32)> = logic
        .rules()
        .player_units(player)
        .into_iter()
        .map(|placed| {
            let properties = &placed.unit.properties;
            (
                placed.cell,
                placed.index,
                properties.upkeep.clone(),
                properties.cost.total(),
            )
        })
        .collect();
    upkeeps.sort_by_key(|(_, _, _, cost)| Reverse(*cost));

    let Some(account) = logic.state_mut().player_mut(player) else {
        return;
    };
    account.set_resources(resources);
    let mut unpaid = Vec::new();
    for (cell, index, upkeep, _) in upkeeps {
        if account.has_resources(&upkeep) {
            account.remove_resources(&upkeep);
        } else {
            unpaid.push((cell, index));
        }
    }
    // Highest index first so the remaining indices stay valid.
    unpaid.sort_by_key(|(cell, index)| Reverse((*cell, *index)));
    for (cell, index) in unpaid {
        debug!(%player, %cell, index, "unit disbanded for lack of upkeep");
        logic.remove_unit(cell, index);
    }
}

fn grow_city(logic: &mut Logic, city_cell: Position, id: ItemId) {
    let rules = logic.rules();
    let food = rules.compute_city_production(id).balance.get(Resource::Food);
    let granary_max = rules.city_granary_size(id);
    let growth_max = rules.city_growth_max(id);
    let step = logic.config().food_per_shrink_step.max(1);

    let Some(city) = logic.world_mut().city_mut(id) else {
        return;
    };
    let properties = &mut city.properties;
    properties.recruits.reset();
    let mut granary = granary_max.min(properties.granary_food + food);

    if granary >= 0 {
        properties.granary_food = granary;
        let growth = properties.growth_points + 1;
        if growth < growth_max {
            properties.growth_points = growth;
            return;
        }
        let free = logic.rules().find_city_tiles_for_new_houses(city_cell);
        if free.is_empty() {
            return;
        }
        let seed = (3 * city_cell.x + 7 * city_cell.y).rem_euclid(free.len() as i32);
        let house = free[seed as usize];
        logic
            .world_mut()
            .set_value(LayerKind::Objects, house, CellValue::Houses);
        logic.notify(|listener, state| {
            listener.layer_cell_changed(state, LayerKind::Objects, house);
        });
        if let Err(error) = drive(&AssignCell::new(city_cell, house).ignoring_player(), logic) {
            warn!(city = %id, %house, "new house left empty: {error}");
        }
        logic.auto_assign_citizens(id);
        if let Some(city) = logic.world_mut().city_mut(id) {
            city.properties.growth_points = 0;
        }
        return;
    }

    properties.growth_points = 0;
    properties.granary_food = 0;
    while granary < 0 {
        let (citizens, workers, house) = {
            let world = logic.world();
            let Some(city) = world.city(id) else {
                break;
            };
            let house = city
                .cells
                .iter()
                .copied()
                .find(|cell| world.objects().get(*cell) == CellValue::Houses);
            (
                city.properties.citizen_count,
                city.properties.worker_count,
                house,
            )
        };
        if citizens <= 0 {
            break;
        }
        if citizens == workers {
            logic.remove_city_worker(id);
        }
        if let Some(house) = house {
            if let Err(error) = drive(&UnassignCell::new(city_cell, house).ignoring_player(), logic) {
                warn!(city = %id, %house, "could not empty house: {error}");
            }
        }
        granary += step;
    }
}
