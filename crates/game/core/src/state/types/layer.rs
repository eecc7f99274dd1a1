use std::collections::BTreeMap;

use super::items::ItemRefs;
use super::{ItemId, Position, Rect};
use crate::constants::{CellValue, Direction, NeighborMask};

/// Cells of one item, grouped by item identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCells {
    pub id: ItemId,
    pub cells: Vec<Position>,
}

/// One plane of the world: dense cell values plus a sparse item overlay.
///
/// Storage is padded with a one-cell ring holding the default value, so
/// neighbor reads at the world edge need no branching. Coordinates passed to
/// the accessors must lie inside the world; anything else is a caller bug and
/// panics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "super::layer_data::LayerData", try_from = "super::layer_data::LayerData")
)]
pub struct Layer {
    pub(super) width: i32,
    pub(super) height: i32,
    pub(super) default_value: CellValue,
    pub(super) cells: Vec<CellValue>,
    pub(super) items: BTreeMap<Position, ItemId>,
    pub(super) refs: ItemRefs,
}

impl Layer {
    pub fn new(width: i32, height: i32, default_value: CellValue) -> Self {
        assert!(width > 0 && height > 0, "invalid layer size {width}x{height}");
        let len = ((width + 2) * (height + 2)) as usize;
        Self {
            width,
            height,
            default_value,
            cells: vec![default_value; len],
            items: BTreeMap::new(),
            refs: ItemRefs::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn default_value(&self) -> CellValue {
        self.default_value
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, cell: Position) -> bool {
        self.bounds().contains(cell)
    }

    /// Index into padded storage; accepts the padding ring at -1 and width/height.
    #[inline]
    fn padded_index(&self, x: i32, y: i32) -> usize {
        debug_assert!((-1..=self.width).contains(&x) && (-1..=self.height).contains(&y));
        ((y + 1) * (self.width + 2) + (x + 1)) as usize
    }

    #[inline]
    fn check(&self, cell: Position) {
        assert!(
            self.contains(cell),
            "cell {cell} outside {}x{} layer",
            self.width,
            self.height
        );
    }

    pub fn get(&self, cell: Position) -> CellValue {
        self.check(cell);
        self.cells[self.padded_index(cell.x, cell.y)]
    }

    /// Value of the neighbor in `direction`; the padding ring reads as default.
    pub fn get_toward(&self, cell: Position, direction: Direction) -> CellValue {
        self.check(cell);
        let (dx, dy) = direction.offset();
        self.cells[self.padded_index(cell.x + dx, cell.y + dy)]
    }

    /// Writes a value. Writing [`CellValue::Empty`] also detaches the item.
    pub fn set(&mut self, cell: Position, value: CellValue) {
        self.check(cell);
        let index = self.padded_index(cell.x, cell.y);
        self.cells[index] = value;
        if value.is_empty() {
            let old = self.items.remove(&cell);
            self.refs.replace(old, None);
        }
    }

    /// Resets every interior cell and drops all items.
    pub fn fill(&mut self, value: CellValue) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.padded_index(x, y);
                self.cells[index] = value;
            }
        }
        self.items.clear();
        self.refs.clear();
    }

    /// All cells holding one of `values`, in raster order.
    pub fn find_values(&self, values: &[CellValue]) -> Vec<Position> {
        let mut found = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if values.contains(&self.cells[self.padded_index(x, y)]) {
                    found.push(Position::new(x, y));
                }
            }
        }
        found
    }

    /// Orthogonal neighbors in [`Direction::ORTHOGONAL`] order.
    pub fn neighbors4(&self, cell: Position) -> [CellValue; 4] {
        Direction::ORTHOGONAL.map(|direction| self.get_toward(cell, direction))
    }

    /// All neighbors in [`Direction::ALL`] order.
    pub fn neighbors8(&self, cell: Position) -> [CellValue; 8] {
        Direction::ALL.map(|direction| self.get_toward(cell, direction))
    }

    /// Orthogonal neighbors equal to `value`.
    pub fn mask4(&self, cell: Position, value: CellValue) -> NeighborMask {
        NeighborMask::from_flags(self.neighbors4(cell).map(|neighbor| neighbor == value))
    }

    /// Read-only window; `rect` may reach one cell into the padding ring.
    pub fn area(&self, rect: Rect) -> LayerArea<'_> {
        assert!(
            rect.x1 >= -1 && rect.y1 >= -1 && rect.x2 <= self.width + 1 && rect.y2 <= self.height + 1,
            "area {rect:?} exceeds padded layer"
        );
        LayerArea { layer: self, rect }
    }

    // ===== item overlay =====

    pub fn item(&self, cell: Position) -> Option<ItemId> {
        self.items.get(&cell).copied()
    }

    pub fn has_item(&self, cell: Position) -> bool {
        self.items.contains_key(&cell)
    }

    pub fn set_item(&mut self, cell: Position, item: Option<ItemId>) {
        self.check(cell);
        let old = match item {
            Some(id) => self.items.insert(cell, id),
            None => self.items.remove(&cell),
        };
        self.refs.replace(old, item);
    }

    /// Number of cells attached to `id`.
    pub fn item_refs(&self, id: ItemId) -> usize {
        self.refs.count(id)
    }

    /// Every cell that references `id`.
    pub fn item_cells(&self, id: ItemId) -> Vec<Position> {
        self.items
            .iter()
            .filter(|(_, item)| **item == id)
            .map(|(cell, _)| *cell)
            .collect()
    }

    pub fn item_entries(&self) -> impl Iterator<Item = (Position, ItemId)> + '_ {
        self.items.iter().map(|(cell, id)| (*cell, *id))
    }

    /// Items grouped by identity, so a multi-cell item reports once.
    pub fn items(&self) -> Vec<ItemCells> {
        group(self.item_entries())
    }

    /// Grouped items whose cells lie in `rect`.
    pub fn items_in(&self, rect: Rect) -> Vec<ItemCells> {
        group(self.item_entries().filter(|(cell, _)| rect.contains(*cell)))
    }

    /// Grouped items attached to cells holding one of `values`.
    pub fn items_by_value(&self, values: &[CellValue]) -> Vec<ItemCells> {
        group(
            self.item_entries()
                .filter(|(cell, _)| values.contains(&self.get(*cell))),
        )
    }
}

fn group(entries: impl Iterator<Item = (Position, ItemId)>) -> Vec<ItemCells> {
    let mut groups: Vec<ItemCells> = Vec::new();
    let mut found: BTreeMap<ItemId, usize> = BTreeMap::new();
    for (cell, id) in entries {
        let index = *found.entry(id).or_insert_with(|| {
            groups.push(ItemCells {
                id,
                cells: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].cells.push(cell);
    }
    groups
}

/// Window over a layer's padded storage, addressed in world coordinates.
#[derive(Clone, Copy, Debug)]
pub struct LayerArea<'a> {
    layer: &'a Layer,
    rect: Rect,
}

impl LayerArea<'_> {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn get(&self, x: i32, y: i32) -> CellValue {
        assert!(
            self.rect.contains(Position::new(x, y)),
            "({x}, {y}) outside area {:?}",
            self.rect
        );
        self.layer.cells[self.layer.padded_index(x, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn border_ring_reads_default() {
        let mut layer = Layer::new(3, 2, CellValue::Sea);
        layer.fill(CellValue::Earth);
        assert_eq!(layer.get(cell(0, 0)), CellValue::Earth);
        assert_eq!(layer.get_toward(cell(0, 0), Direction::Left), CellValue::Sea);
        assert_eq!(layer.get_toward(cell(2, 1), Direction::BottomRight), CellValue::Sea);
    }

    #[test]
    fn neighbor_orders() {
        let mut layer = Layer::new(3, 3, CellValue::Empty);
        layer.set(cell(0, 1), CellValue::River); // left
        layer.set(cell(1, 0), CellValue::Pond); // top
        layer.set(cell(0, 0), CellValue::Mountain); // top-left
        layer.set(cell(2, 2), CellValue::Hill); // bottom-right

        let n4 = layer.neighbors4(cell(1, 1));
        assert_eq!(n4, [CellValue::River, CellValue::Pond, CellValue::Empty, CellValue::Empty]);

        let n8 = layer.neighbors8(cell(1, 1));
        assert_eq!(n8[0], CellValue::Mountain);
        assert_eq!(n8[1], CellValue::River);
        assert_eq!(n8[3], CellValue::Pond);
        assert_eq!(n8[7], CellValue::Hill);
    }

    #[test]
    fn setting_empty_detaches_item() {
        let mut layer = Layer::new(4, 4, CellValue::Empty);
        layer.set(cell(1, 1), CellValue::Unit);
        layer.set_item(cell(1, 1), Some(ItemId(7)));
        assert_eq!(layer.item(cell(1, 1)), Some(ItemId(7)));

        layer.set(cell(1, 1), CellValue::Empty);
        assert_eq!(layer.item(cell(1, 1)), None);
    }

    #[test]
    fn items_group_multi_cell_entities() {
        let mut layer = Layer::new(4, 4, CellValue::Empty);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            layer.set(cell(x, y), CellValue::City);
            layer.set_item(cell(x, y), Some(ItemId(1)));
        }
        layer.set(cell(0, 3), CellValue::Camp);
        layer.set_item(cell(0, 3), Some(ItemId(2)));

        let items = layer.items();
        assert_eq!(items.len(), 2);
        let city = items.iter().find(|group| group.id == ItemId(1)).unwrap();
        assert_eq!(city.cells.len(), 4);

        let camps = layer.items_by_value(&[CellValue::Camp]);
        assert_eq!(camps.len(), 1);
        assert_eq!(camps[0].cells, vec![cell(0, 3)]);
    }

    #[test]
    fn find_values_scans_in_raster_order() {
        let mut layer = Layer::new(3, 3, CellValue::Empty);
        layer.set(cell(2, 0), CellValue::Houses);
        layer.set(cell(0, 1), CellValue::Houses);
        layer.set(cell(1, 2), CellValue::Farm);
        assert_eq!(
            layer.find_values(&[CellValue::Houses, CellValue::Farm]),
            vec![cell(2, 0), cell(0, 1), cell(1, 2)]
        );
    }

    #[test]
    fn area_reaches_into_padding() {
        let layer = Layer::new(2, 2, CellValue::Sea);
        let area = layer.area(Rect::new(-1, -1, 3, 3));
        assert_eq!(area.get(-1, -1), CellValue::Sea);
        assert_eq!(area.get(2, 2), CellValue::Sea);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access_panics() {
        let layer = Layer::new(2, 2, CellValue::Sea);
        layer.get(cell(2, 0));
    }
}
