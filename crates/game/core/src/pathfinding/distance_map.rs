use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use crate::config::GameConfig;
use crate::constants::{CellValue, Direction};
use crate::env::MoveCosts;
use crate::state::{Item, PlayerId, Position, Rect, World};

/// Cost of an impassable node, edge or unreached cell.
///
/// A concrete integer so it takes part in `max` and comparisons like any
/// other cost.
pub const INFINITE_COST: u32 = 10_000;

/// Backward-walk neighbor order: orthogonal first, then diagonal.
const PATH_SCAN: [Direction; 8] = [
    Direction::Left,
    Direction::Top,
    Direction::Bottom,
    Direction::Right,
    Direction::TopLeft,
    Direction::BottomLeft,
    Direction::TopRight,
    Direction::BottomRight,
];

/// Who is moving and how far the search may look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub player: PlayerId,
    pub origin: Position,
    /// Only widens the window so it covers both ends.
    pub destination: Option<Position>,
    pub radius: i32,
    /// Units moving together.
    pub army_size: usize,
    /// Largest stack allowed on one cell.
    pub army_cap: usize,
}

impl MoveRequest {
    pub fn new(player: PlayerId, origin: Position) -> Self {
        Self {
            player,
            origin,
            destination: None,
            radius: GameConfig::DEFAULT_DISTANCE_RADIUS,
            army_size: 1,
            army_cap: 1,
        }
    }

    pub fn with_destination(mut self, destination: Position) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_army(mut self, army_size: usize, army_cap: usize) -> Self {
        self.army_size = army_size;
        self.army_cap = army_cap;
        self
    }
}

/// Cells from a target back towards the origin, with their cumulative costs.
///
/// `cells[0]` is the target; the last cell is adjacent to the origin, which
/// is not included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Position>,
    pub costs: Vec<u32>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Total cost to reach the target.
    pub fn total_cost(&self) -> u32 {
        self.costs.first().copied().unwrap_or(0)
    }

    /// Cost of each individual step, target-most first.
    pub fn step_costs(&self) -> Vec<u32> {
        self.costs
            .iter()
            .zip(self.costs.iter().skip(1).chain(std::iter::once(&0)))
            .map(|(here, next)| here - next)
            .collect()
    }
}

/// Shortest movement cost from one origin to every cell of a bounded window.
///
/// Built once per query: node costs come from terrain and occupancy, edge
/// costs from the dearer endpoint (times √2 on diagonals), and a Dijkstra
/// sweep fills the cost field. The window carries a one-cell ring of
/// infinite nodes so the search never needs bounds checks.
#[derive(Clone, Debug)]
pub struct DistanceMap {
    area: Rect,
    nodes: Vec<u32>,
    edges: Vec<[u32; 8]>,
    costs: Vec<u32>,
}

impl DistanceMap {
    pub fn new(world: &World, move_costs: MoveCosts, request: &MoveRequest) -> Self {
        let origin = request.origin;
        let (low, high) = match request.destination {
            Some(destination) => (
                Position::new(origin.x.min(destination.x), origin.y.min(destination.y)),
                Position::new(origin.x.max(destination.x), origin.y.max(destination.y)),
            ),
            None => (origin, origin),
        };
        let radius = request.radius;
        let reach = Rect::new(
            low.x - radius,
            low.y - radius,
            high.x + radius + 1,
            high.y + radius + 1,
        );
        let area = Rect::new(
            (reach.x1 - 1).max(-1),
            (reach.y1 - 1).max(-1),
            (reach.x2 + 1).min(world.width() + 1),
            (reach.y2 + 1).min(world.height() + 1),
        );
        if area.width() <= 0 || area.height() <= 0 {
            return Self {
                area: Rect::new(0, 0, 0, 0),
                nodes: Vec::new(),
                edges: Vec::new(),
                costs: Vec::new(),
            };
        }
        let len = (area.width() * area.height()) as usize;
        let mut map = Self {
            area,
            nodes: vec![INFINITE_COST; len],
            edges: vec![[INFINITE_COST; 8]; len],
            costs: vec![INFINITE_COST; len],
        };
        map.compute(world, move_costs, request);
        map
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        ((y - self.area.y1) * self.area.width() + (x - self.area.x1)) as usize
    }

    fn compute(&mut self, world: &World, move_costs: MoveCosts, request: &MoveRequest) {
        let area = self.area;
        let source = request.origin;
        let ground = world.ground().area(area);
        let impassable = world.impassable().area(area);
        let objects = world.objects().area(area);

        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                let mut cost = if ground.get(x, y) == CellValue::Earth {
                    move_costs.ground
                } else {
                    INFINITE_COST
                };
                if !impassable.get(x, y).is_empty() {
                    cost = INFINITE_COST;
                }
                match objects.get(x, y) {
                    CellValue::RoadStone => cost = move_costs.road_stone,
                    CellValue::RoadDirt => cost = move_costs.road_dirt,
                    CellValue::Hill | CellValue::Rocks | CellValue::Trees => {
                        cost = move_costs.rough
                    }
                    _ => {}
                }
                let index = self.index(x, y);
                self.nodes[index] = cost;
            }
        }

        if !area.contains(source) {
            return;
        }
        self.block_occupied_cells(world, request);
        let source_index = self.index(source.x, source.y);
        self.nodes[source_index] = 0;
        self.seal_border();
        self.compute_edges();
        self.search(source);
    }

    fn block_occupied_cells(&mut self, world: &World, request: &MoveRequest) {
        let area = self.area;
        if request.army_cap == 1 {
            let units = world.units().area(area);
            for y in area.y1..area.y2 {
                for x in area.x1..area.x2 {
                    if !units.get(x, y).is_empty() && Position::new(x, y) != request.origin {
                        let index = self.index(x, y);
                        self.nodes[index] = INFINITE_COST;
                    }
                }
            }
            return;
        }

        for group in world.units().items_in(area) {
            let blocks = match world.item(group.id) {
                Some(item) if item.player() != request.player => true,
                Some(Item::Unit(_)) => request.army_size + 1 > request.army_cap,
                Some(Item::Army(army)) => request.army_size + army.len() > request.army_cap,
                _ => true,
            };
            if blocks {
                for cell in group.cells {
                    let index = self.index(cell.x, cell.y);
                    self.nodes[index] = INFINITE_COST;
                }
            }
        }
    }

    fn seal_border(&mut self) {
        let area = self.area;
        for x in area.x1..area.x2 {
            for y in [area.y1, area.y2 - 1] {
                let index = self.index(x, y);
                self.nodes[index] = INFINITE_COST;
            }
        }
        for y in area.y1..area.y2 {
            for x in [area.x1, area.x2 - 1] {
                let index = self.index(x, y);
                self.nodes[index] = INFINITE_COST;
            }
        }
    }

    fn compute_edges(&mut self) {
        let area = self.area;
        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                let here = self.nodes[self.index(x, y)];
                let mut edges = [INFINITE_COST; 8];
                for (slot, direction) in Direction::ALL.iter().enumerate() {
                    let (dx, dy) = direction.offset();
                    let neighbor = Position::new(x + dx, y + dy);
                    if !area.contains(neighbor) {
                        continue;
                    }
                    let dearer = here.max(self.nodes[self.index(neighbor.x, neighbor.y)]);
                    edges[slot] = if direction.is_diagonal() {
                        (f64::from(dearer) * SQRT_2).round() as u32
                    } else {
                        dearer
                    };
                }
                let index = self.index(x, y);
                self.edges[index] = edges;
            }
        }
    }

    fn search(&mut self, source: Position) {
        let mut queue = BinaryHeap::new();
        let source_index = self.index(source.x, source.y);
        self.costs[source_index] = 0;
        queue.push(Frontier {
            cost: 0,
            x: source.x,
            y: source.y,
        });

        while let Some(Frontier { cost, x, y }) = queue.pop() {
            let index = self.index(x, y);
            if cost > self.costs[index] {
                continue;
            }
            let edges = self.edges[index];
            for (slot, direction) in Direction::ALL.iter().enumerate() {
                let (dx, dy) = direction.offset();
                let (nx, ny) = (x + dx, y + dy);
                if !self.area.contains(Position::new(nx, ny)) {
                    continue;
                }
                let candidate = cost + edges[slot];
                let neighbor = self.index(nx, ny);
                if self.costs[neighbor] > candidate {
                    self.costs[neighbor] = candidate;
                    queue.push(Frontier {
                        cost: candidate,
                        x: nx,
                        y: ny,
                    });
                }
            }
        }
    }

    /// Node cost of a cell, infinite outside the window.
    pub fn node_cost(&self, cell: Position) -> u32 {
        if !self.area.contains(cell) {
            return INFINITE_COST;
        }
        self.nodes[self.index(cell.x, cell.y)]
    }

    /// Cost of the edge leaving `cell` towards `direction`. There is no
    /// self-edge, so [`Direction::None`] is never traversable.
    pub fn edge_cost(&self, cell: Position, direction: Direction) -> u32 {
        let Some(slot) = Direction::ALL.iter().position(|d| *d == direction) else {
            return INFINITE_COST;
        };
        if !self.area.contains(cell) {
            return INFINITE_COST;
        }
        self.edges[self.index(cell.x, cell.y)][slot]
    }

    /// Shortest cost to reach `cell`, infinite when outside the window or unreached.
    pub fn cost(&self, cell: Position) -> u32 {
        if !self.area.contains(cell) {
            return INFINITE_COST;
        }
        self.costs[self.index(cell.x, cell.y)]
    }

    pub fn is_reachable(&self, cell: Position) -> bool {
        self.cost(cell) < INFINITE_COST
    }

    /// Walks back from `target` along cheapest neighbors until the origin.
    ///
    /// Ties go to the first neighbor in orthogonal-then-diagonal scan order.
    /// Empty when the target is unreached or outside the window.
    pub fn path(&self, target: Position) -> Path {
        let mut path = Path::default();
        if !self.is_reachable(target) {
            return path;
        }
        let mut current = target;
        for _ in 0..GameConfig::PATH_STEP_LIMIT {
            let cost = self.cost(current);
            if cost == 0 {
                break;
            }
            path.costs.push(cost);
            path.cells.push(current);

            let mut best = PATH_SCAN[0].apply(current);
            let mut best_cost = self.cost(best);
            for direction in &PATH_SCAN[1..] {
                let neighbor = direction.apply(current);
                let neighbor_cost = self.cost(neighbor);
                if neighbor_cost < best_cost {
                    best = neighbor;
                    best_cost = neighbor_cost;
                }
            }
            current = best;
        }
        path
    }
}

/// Queue entry; ordered so the heap pops the lowest `(cost, x, y)` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frontier {
    cost: u32,
    x: i32,
    y: i32,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.x.cmp(&self.x))
            .then_with(|| other.y.cmp(&self.y))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
