use bitflags::bitflags;

use crate::state::Position;

/// Grid direction, including the identity step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    None,
    Left,
    Top,
    Bottom,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// Orthogonal directions in neighbor-scan order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Left,
        Direction::Top,
        Direction::Bottom,
        Direction::Right,
    ];

    /// All eight directions in neighbor-scan order (column by column).
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Left,
        Direction::BottomLeft,
        Direction::Top,
        Direction::Bottom,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
    ];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Left => (-1, 0),
            Direction::Top => (0, -1),
            Direction::Bottom => (0, 1),
            Direction::Right => (1, 0),
            Direction::TopLeft => (-1, -1),
            Direction::TopRight => (1, -1),
            Direction::BottomLeft => (-1, 1),
            Direction::BottomRight => (1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::TopLeft | Direction::TopRight | Direction::BottomLeft | Direction::BottomRight
        )
    }

    pub fn apply(self, cell: Position) -> Position {
        let (dx, dy) = self.offset();
        Position::new(cell.x + dx, cell.y + dy)
    }
}

bitflags! {
    /// Orthogonal neighbors matching some predicate.
    ///
    /// Bits follow [`Direction::ORTHOGONAL`]: left=1, top=2, bottom=4, right=8.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NeighborMask: u8 {
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const BOTTOM = 1 << 2;
        const RIGHT = 1 << 3;

        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl NeighborMask {
    /// Builds a mask from four flags in [`Direction::ORTHOGONAL`] order.
    pub fn from_flags(flags: [bool; 4]) -> Self {
        flags
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .fold(Self::empty(), |mask, (bit, _)| {
                mask | Self::from_bits_truncate(1 << bit)
            })
    }

    /// True when the matching neighbors form a straight line through the cell.
    pub fn is_straight(self) -> bool {
        self == Self::VERTICAL || self == Self::HORIZONTAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_bits_follow_orthogonal_order() {
        let mask = NeighborMask::from_flags([false, true, true, false]);
        assert_eq!(mask.bits(), 6);
        assert!(mask.is_straight());

        let corner = NeighborMask::from_flags([true, true, false, false]);
        assert_eq!(corner.bits(), 3);
        assert!(!corner.is_straight());
    }

    #[test]
    fn diagonal_offsets() {
        assert_eq!(Direction::BottomLeft.offset(), (-1, 1));
        assert!(Direction::TopRight.is_diagonal());
        assert!(!Direction::Right.is_diagonal());
    }
}
