//! Movement cost fields over the world grid.
//!
//! A [`DistanceMap`] is a one-shot Dijkstra search from a single origin,
//! bounded to a window around the origin (and optional destination). Unit
//! movement and the rules layer query it for costs and backward paths.
mod distance_map;

pub use distance_map::{DistanceMap, INFINITE_COST, MoveRequest, Path};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::constants::{CellValue, Direction, LayerKind, WorldType};
    use crate::env::MoveCosts;
    use crate::state::{Item, PlayerId, Position, Unit, UnitProperties, World};

    fn earth(width: i32, height: i32) -> World {
        let mut world = World::new(width, height, WorldType::Strategic);
        world.layer_mut(LayerKind::Ground).fill(CellValue::Earth);
        world
    }

    fn soldier(player: PlayerId) -> Unit {
        Unit::new(crate::constants::UnitClass::Pikeman, player, UnitProperties::default())
    }

    #[test]
    fn straight_line_costs_two_ground_steps() {
        let world = earth(5, 5);
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0));
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.cost(Position::new(0, 0)), 0);
        assert_eq!(map.cost(Position::new(2, 0)), 6);

        let path = map.path(Position::new(2, 0));
        assert_eq!(path.cells, vec![Position::new(2, 0), Position::new(1, 0)]);
        assert_eq!(path.costs, vec![6, 3]);
        assert_eq!(map.edge_cost(Position::new(1, 1), Direction::None), INFINITE_COST);
        assert_eq!(path.step_costs(), vec![3, 3]);
    }

    #[test]
    fn diagonal_squeezes_between_mountains() {
        let mut world = earth(3, 3);
        world.set_value(LayerKind::Impassable, Position::new(1, 0), CellValue::Mountain);
        world.set_value(LayerKind::Impassable, Position::new(0, 1), CellValue::Mountain);
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0));
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.cost(Position::new(1, 1)), 4);
        assert_eq!(map.path(Position::new(1, 1)).cells, vec![Position::new(1, 1)]);
    }

    #[test]
    fn roads_are_cheaper_than_open_ground() {
        let mut world = earth(6, 1);
        for x in 1..5 {
            world.set_value(LayerKind::Objects, Position::new(x, 0), CellValue::RoadStone);
        }
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0));
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.cost(Position::new(4, 0)), 4);
        // Leaving the road costs the dearer endpoint.
        assert_eq!(map.cost(Position::new(5, 0)), 7);
    }

    #[test]
    fn sea_and_outside_window_are_unreachable() {
        let mut world = earth(8, 8);
        world.set_value(LayerKind::Ground, Position::new(3, 3), CellValue::Sea);
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0)).with_radius(2);
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.cost(Position::new(7, 7)), INFINITE_COST);
        assert!(map.path(Position::new(7, 7)).is_empty());

        let wide = DistanceMap::new(
            &world,
            MoveCosts::default(),
            &MoveRequest::new(PlayerId(1), Position::new(0, 0)),
        );
        assert!(!wide.is_reachable(Position::new(3, 3)));
        assert!(wide.is_reachable(Position::new(7, 7)));
    }

    #[test]
    fn destination_widens_the_window() {
        let world = earth(20, 1);
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0))
            .with_radius(1)
            .with_destination(Position::new(15, 0));
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.cost(Position::new(15, 0)), 45);
        assert_eq!(map.path(Position::new(15, 0)).len(), 15);
    }

    #[test]
    fn single_unit_cap_blocks_every_occupied_cell() {
        let mut world = earth(3, 1);
        world.place_units(Position::new(0, 0), vec![soldier(PlayerId(1))]);
        world.place_units(Position::new(1, 0), vec![soldier(PlayerId(1))]);
        let request = MoveRequest::new(PlayerId(1), Position::new(0, 0));
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);

        assert_eq!(map.node_cost(Position::new(0, 0)), 0);
        assert_eq!(map.node_cost(Position::new(1, 0)), INFINITE_COST);
        assert!(!map.is_reachable(Position::new(2, 0)));
    }

    #[test]
    fn armies_merge_until_the_cap() {
        let mut world = earth(3, 1);
        world.place_units(Position::new(0, 0), vec![soldier(PlayerId(1))]);
        let friends: Vec<Unit> = (0..3).map(|_| soldier(PlayerId(1))).collect();
        world.place_units(Position::new(1, 0), friends);
        world.place_units(Position::new(2, 0), vec![soldier(PlayerId(2))]);
        assert!(matches!(
            world.item_at(LayerKind::Units, Position::new(1, 0)),
            Some(Item::Army(_))
        ));

        let roomy = MoveRequest::new(PlayerId(1), Position::new(0, 0)).with_army(1, 10);
        let map = DistanceMap::new(&world, MoveCosts::default(), &roomy);
        assert!(map.is_reachable(Position::new(1, 0)));
        assert!(!map.is_reachable(Position::new(2, 0)));

        let full = MoveRequest::new(PlayerId(1), Position::new(0, 0)).with_army(1, 3);
        let map = DistanceMap::new(&world, MoveCosts::default(), &full);
        assert!(!map.is_reachable(Position::new(1, 0)));
    }

    #[test]
    fn origin_outside_the_world_leaves_everything_infinite() {
        let world = earth(4, 4);
        let request = MoveRequest::new(PlayerId(1), Position::new(40, 40)).with_radius(1);
        let map = DistanceMap::new(&world, MoveCosts::default(), &request);
        assert_eq!(map.cost(Position::new(40, 40)), INFINITE_COST);
        assert!(map.path(Position::new(3, 3)).is_empty());
    }

    fn opposite(direction: Direction) -> Direction {
        let (dx, dy) = direction.offset();
        Direction::ALL
            .into_iter()
            .find(|d| d.offset() == (-dx, -dy))
            .unwrap()
    }

    fn arb_world() -> impl Strategy<Value = (World, Position)> {
        (3i32..9, 3i32..9).prop_flat_map(|(width, height)| {
            let cells = (width * height) as usize;
            (
                proptest::collection::vec(0u8..6, cells),
                0..width,
                0..height,
            )
                .prop_map(move |(tiles, ox, oy)| {
                    let mut world = earth(width, height);
                    for (index, tile) in tiles.into_iter().enumerate() {
                        let cell = Position::new(index as i32 % width, index as i32 / width);
                        match tile {
                            0 => world.set_value(LayerKind::Ground, cell, CellValue::Sea),
                            1 => world.set_value(LayerKind::Objects, cell, CellValue::RoadDirt),
                            2 => world.set_value(LayerKind::Objects, cell, CellValue::Trees),
                            3 => world.set_value(
                                LayerKind::Impassable,
                                cell,
                                CellValue::Mountain,
                            ),
                            _ => {}
                        }
                    }
                    (world, Position::new(ox, oy))
                })
        })
    }

    proptest! {
        #[test]
        fn origin_costs_nothing((world, origin) in arb_world()) {
            let map = DistanceMap::new(
                &world,
                MoveCosts::default(),
                &MoveRequest::new(PlayerId(1), origin),
            );
            prop_assert_eq!(map.cost(origin), 0);
            prop_assert!(map.path(origin).is_empty());
        }

        #[test]
        fn edges_are_symmetric((world, origin) in arb_world()) {
            let map = DistanceMap::new(
                &world,
                MoveCosts::default(),
                &MoveRequest::new(PlayerId(1), origin),
            );
            for y in 0..world.height() {
                for x in 0..world.width() {
                    let cell = Position::new(x, y);
                    for direction in Direction::ALL {
                        let neighbor = direction.apply(cell);
                        prop_assert_eq!(
                            map.edge_cost(cell, direction),
                            map.edge_cost(neighbor, opposite(direction))
                        );
                    }
                }
            }
        }

        #[test]
        fn paths_descend_to_the_origin((world, origin) in arb_world()) {
            let map = DistanceMap::new(
                &world,
                MoveCosts::default(),
                &MoveRequest::new(PlayerId(1), origin),
            );
            for y in 0..world.height() {
                for x in 0..world.width() {
                    let target = Position::new(x, y);
                    let path = map.path(target);
                    if !map.is_reachable(target) || target == origin {
                        prop_assert!(path.is_empty());
                        continue;
                    }
                    prop_assert_eq!(path.cells[0], target);
                    prop_assert!(path.costs.windows(2).all(|pair| pair[0] > pair[1]));
                    prop_assert_eq!(path.step_costs().iter().sum::<u32>(), map.cost(target));
                    let last = *path.cells.last().unwrap();
                    prop_assert!((last.x - origin.x).abs() <= 1 && (last.y - origin.y).abs() <= 1);
                }
            }
        }
    }
}
