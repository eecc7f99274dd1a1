//! Fixed cell masks around a city.

use crate::state::Position;

const CITY_SIZE: usize = 16;
const HOUSE_SIZE: usize = 6;

/// Disc of radius 8 centered on the 2×2 footprint.
const fn city_bits() -> [bool; CITY_SIZE * CITY_SIZE] {
    let mut bits = [false; CITY_SIZE * CITY_SIZE];
    let mut j = 0;
    while j < CITY_SIZE {
        let mut i = 0;
        while i < CITY_SIZE {
            // Cell centers measured from the disc center, doubled to stay integral.
            let dx = 2 * i as i32 - 15;
            let dy = 2 * j as i32 - 15;
            bits[j * CITY_SIZE + i] = dx * dx + dy * dy < 256;
            i += 1;
        }
        j += 1;
    }
    bits
}

/// 6×6 square with its corners cut.
const fn house_bits() -> [bool; HOUSE_SIZE * HOUSE_SIZE] {
    let mut bits = [true; HOUSE_SIZE * HOUSE_SIZE];
    let last = HOUSE_SIZE - 1;
    bits[0] = false;
    bits[last] = false;
    bits[last * HOUSE_SIZE] = false;
    bits[last * HOUSE_SIZE + last] = false;
    bits
}

const CITY_BITS: [bool; CITY_SIZE * CITY_SIZE] = city_bits();
const HOUSE_BITS: [bool; HOUSE_SIZE * HOUSE_SIZE] = house_bits();

/// Square boolean mask placed relative to a city's top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaMask {
    size: i32,
    /// Distance from the mask's first cell to the city's top-left cell.
    offset: i32,
    bits: &'static [bool],
}

/// Cells a city may claim.
pub const CITY_AREA: AreaMask = AreaMask {
    size: CITY_SIZE as i32,
    offset: CITY_SIZE as i32 / 2 - 1,
    bits: &CITY_BITS,
};

/// Cells where a city grows houses.
pub const HOUSE_AREA: AreaMask = AreaMask {
    size: HOUSE_SIZE as i32,
    offset: HOUSE_SIZE as i32 / 2 - 1,
    bits: &HOUSE_BITS,
};

impl AreaMask {
    pub const fn size(self) -> i32 {
        self.size
    }

    /// World position of the mask's first cell for a city at `city_cell`.
    pub const fn origin(self, city_cell: Position) -> Position {
        city_cell.offset(-self.offset, -self.offset)
    }

    fn bit(self, i: i32, j: i32) -> bool {
        0 <= i
            && i < self.size
            && 0 <= j
            && j < self.size
            && self.bits[(j * self.size + i) as usize]
    }

    pub fn contains(self, city_cell: Position, cell: Position) -> bool {
        let origin = self.origin(city_cell);
        self.bit(cell.x - origin.x, cell.y - origin.y)
    }

    /// Masked cells in raster order (rows first). Cells may lie outside the world.
    pub fn cells(self, city_cell: Position) -> impl Iterator<Item = Position> {
        let origin = self.origin(city_cell);
        (0..self.size).flat_map(move |j| {
            (0..self.size)
                .filter(move |i| self.bit(*i, j))
                .map(move |i| origin.offset(i, j))
        })
    }

    pub fn count(self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_area_is_a_symmetric_disc() {
        let city = Position::new(20, 20);
        assert_eq!(CITY_AREA.origin(city), Position::new(13, 13));
        assert!(CITY_AREA.contains(city, city));
        assert!(CITY_AREA.contains(city, Position::new(21, 21)));
        assert!(!CITY_AREA.contains(city, Position::new(13, 13)));
        assert!(CITY_AREA.contains(city, Position::new(13, 20)));
        assert!(!CITY_AREA.contains(city, Position::new(29, 20)));
        for cell in CITY_AREA.cells(city) {
            let mirrored = Position::new(2 * city.x + 1 - cell.x, 2 * city.y + 1 - cell.y);
            assert!(CITY_AREA.contains(city, mirrored), "{cell} vs {mirrored}");
        }
    }

    #[test]
    fn house_area_cuts_corners() {
        let city = Position::new(5, 5);
        assert_eq!(HOUSE_AREA.count(), 32);
        assert!(!HOUSE_AREA.contains(city, Position::new(3, 3)));
        assert!(HOUSE_AREA.contains(city, Position::new(4, 3)));
        assert!(!HOUSE_AREA.contains(city, Position::new(8, 8)));
        assert!(HOUSE_AREA.contains(city, Position::new(8, 7)));

        let cells: Vec<Position> = HOUSE_AREA.cells(city).take(3).collect();
        assert_eq!(
            cells,
            vec![Position::new(4, 3), Position::new(5, 3), Position::new(6, 3)]
        );
    }
}
