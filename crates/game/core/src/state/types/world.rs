use super::{
    Army, Assignments, City, Item, ItemCells, ItemId, ItemTable, Layer, PlayerId, Position, Rect,
    Unit, UnitStack,
};
use crate::constants::{CellValue, LayerKind, WorldType};
use crate::state::StateError;

/// Four layers, the assignment side table, and the arena owning every item.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    world_type: WorldType,
    width: i32,
    height: i32,
    ground: Layer,
    impassable: Layer,
    objects: Layer,
    units: Layer,
    assignments: Assignments,
    items: ItemTable,
}

impl World {
    /// Empty world: all sea, nothing else.
    pub fn new(width: i32, height: i32, world_type: WorldType) -> Self {
        Self {
            world_type,
            width,
            height,
            ground: Layer::new(width, height, CellValue::Sea),
            impassable: Layer::new(width, height, CellValue::Empty),
            objects: Layer::new(width, height, CellValue::Empty),
            units: Layer::new(width, height, CellValue::Empty),
            assignments: Assignments::new(width, height),
            items: ItemTable::new(),
        }
    }

    pub fn world_type(&self) -> WorldType {
        self.world_type
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, cell: Position) -> bool {
        self.bounds().contains(cell)
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Impassable => &self.impassable,
            LayerKind::Objects => &self.objects,
            LayerKind::Units => &self.units,
        }
    }

    /// Direct layer access. Values written here bypass item bookkeeping;
    /// prefer [`World::set_value`] and the item helpers.
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Ground => &mut self.ground,
            LayerKind::Impassable => &mut self.impassable,
            LayerKind::Objects => &mut self.objects,
            LayerKind::Units => &mut self.units,
        }
    }

    pub fn ground(&self) -> &Layer {
        &self.ground
    }

    pub fn impassable(&self) -> &Layer {
        &self.impassable
    }

    pub fn objects(&self) -> &Layer {
        &self.objects
    }

    pub fn units(&self) -> &Layer {
        &self.units
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemTable {
        &mut self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    pub fn item_at(&self, kind: LayerKind, cell: Position) -> Option<&Item> {
        self.layer(kind).item(cell).and_then(|id| self.items.get(id))
    }

    pub fn item_at_mut(&mut self, kind: LayerKind, cell: Position) -> Option<&mut Item> {
        let id = self.layer(kind).item(cell)?;
        self.items.get_mut(id)
    }

    // ===== values =====

    /// Writes a cell value. Clearing a cell releases its item once no other
    /// cell references it.
    pub fn set_value(&mut self, kind: LayerKind, cell: Position, value: CellValue) {
        let previous = self.layer(kind).item(cell);
        self.layer_mut(kind).set(cell, value);
        if value.is_empty() {
            if let Some(id) = previous {
                self.release_if_orphaned(id);
            }
        }
    }

    /// Writes a value and attaches a freshly inserted item to each of `cells`.
    pub fn attach_item(
        &mut self,
        kind: LayerKind,
        cells: &[Position],
        value: CellValue,
        item: Item,
    ) -> ItemId {
        for cell in cells {
            self.set_value(kind, *cell, CellValue::Empty);
        }
        let id = self.items.insert(item);
        for cell in cells {
            let layer = self.layer_mut(kind);
            layer.set(*cell, value);
            layer.set_item(*cell, Some(id));
        }
        id
    }

    fn is_referenced(&self, id: ItemId) -> bool {
        LayerKind::ALL
            .iter()
            .any(|kind| self.layer(*kind).item_refs(id) > 0)
            || self.assignments.refs(id) > 0
    }

    fn release_if_orphaned(&mut self, id: ItemId) {
        if !self.is_referenced(id) {
            self.items.remove(id);
        }
    }

    // ===== units =====

    /// Units standing on a cell, in stack order.
    pub fn units_at(&self, cell: Position) -> &[Unit] {
        self.item_at(LayerKind::Units, cell)
            .map(Item::units)
            .unwrap_or(&[])
    }

    pub fn unit_at_mut(&mut self, cell: Position, index: usize) -> Option<&mut Unit> {
        self.item_at_mut(LayerKind::Units, cell)?
            .units_mut()
            .get_mut(index)
    }

    /// Replaces the units on a cell.
    ///
    /// One unit is stored as a unit, several as an army owned by the first
    /// unit's player, none clears the cell. Callers enforce the army cap.
    pub fn place_units(&mut self, cell: Position, units: Vec<Unit>) {
        self.set_value(LayerKind::Units, cell, CellValue::Empty);
        let mut units = units.into_iter();
        let Some(first) = units.next() else {
            return;
        };
        let rest: Vec<Unit> = units.collect();
        if rest.is_empty() {
            self.attach_item(LayerKind::Units, &[cell], CellValue::Unit, Item::Unit(first));
            return;
        }
        let player = first.player;
        let stack: UnitStack = std::iter::once(first).chain(rest).collect();
        self.attach_item(
            LayerKind::Units,
            &[cell],
            CellValue::Army,
            Item::Army(Army::new(player, stack)),
        );
    }

    /// Removes and returns every unit on a cell.
    pub fn take_units(&mut self, cell: Position) -> Vec<Unit> {
        let units = self.units_at(cell).to_vec();
        self.set_value(LayerKind::Units, cell, CellValue::Empty);
        units
    }

    /// All units of a layer grouped per cell for the given players.
    pub fn items_by_players(&self, kind: LayerKind, players: &[PlayerId]) -> Vec<ItemCells> {
        self.layer(kind)
            .items()
            .into_iter()
            .filter(|group| {
                self.items
                    .get(group.id)
                    .is_some_and(|item| players.contains(&item.player()))
            })
            .collect()
    }

    // ===== cities =====

    pub fn city(&self, id: ItemId) -> Option<&City> {
        self.items.get(id).and_then(Item::as_city)
    }

    pub fn city_mut(&mut self, id: ItemId) -> Option<&mut City> {
        self.items.get_mut(id).and_then(Item::as_city_mut)
    }

    /// City item attached to the objects layer at `cell`.
    pub fn city_id_at(&self, cell: Position) -> Option<ItemId> {
        if !self.contains(cell) || self.objects.get(cell) != CellValue::City {
            return None;
        }
        self.objects
            .item(cell)
            .filter(|id| self.city(*id).is_some())
    }

    /// City claiming `cell` through the assignment table.
    pub fn assigned_city(&self, cell: Position) -> Option<ItemId> {
        self.assignments.get(cell)
    }

    /// Claims `cell` for a city on both sides of the association.
    pub fn assign(&mut self, cell: Position, city: ItemId) {
        self.assignments.set(cell, Some(city));
        if let Some(city) = self.city_mut(city) {
            city.cells.insert(cell);
        }
    }

    /// Releases a claimed cell on both sides of the association.
    pub fn unassign(&mut self, cell: Position) {
        if let Some(id) = self.assignments.get(cell) {
            self.assignments.set(cell, None);
            if let Some(city) = self.city_mut(id) {
                city.cells.remove(&cell);
            }
        }
    }

    // ===== consistency =====

    /// Checks the cross-references a persistence layer could have broken.
    pub fn validate(&self) -> Result<(), StateError> {
        for kind in LayerKind::ALL {
            let layer = self.layer(kind);
            if layer.width() != self.width || layer.height() != self.height {
                return Err(StateError::InvalidLayerSize {
                    width: layer.width(),
                    height: layer.height(),
                });
            }
            for (cell, id) in layer.item_entries() {
                let item = self.items.get(id).ok_or(StateError::MissingItem(id))?;
                if !item.player().is_valid() {
                    return Err(StateError::InvalidPlayer(item.player()));
                }
                let value = layer.get(cell);
                let consistent = match item {
                    Item::Unit(_) => value == CellValue::Unit,
                    Item::Army(army) => value == CellValue::Army && army.len() >= 2,
                    Item::City(_) => value == CellValue::City,
                    Item::TrainingCamp(_) => value.is_training_camp(),
                };
                if !consistent {
                    return Err(StateError::ValueMismatch { cell, value });
                }
            }
        }
        for (cell, id) in self.assignments.iter() {
            let city = self.city(id).ok_or(StateError::MissingItem(id))?;
            if !city.cells.contains(&cell) {
                return Err(StateError::AssignmentMismatch(cell));
            }
        }
        for (id, item) in self.items.iter() {
            if let Item::City(city) = item {
                for cell in &city.cells {
                    if self.assignments.get(*cell) != Some(id) {
                        return Err(StateError::AssignmentMismatch(*cell));
                    }
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for World {
    /// Layers must agree cell by cell and referenced items by value, so two
    /// worlds that allocated different ids for equal content compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.world_type != other.world_type
            || self.width != other.width
            || self.height != other.height
        {
            return false;
        }
        let layers_match = LayerKind::ALL.iter().all(|kind| {
            let (mine, theirs) = (self.layer(*kind), other.layer(*kind));
            mine.default_value() == theirs.default_value()
                && mine.cells == theirs.cells
                && same_items(
                    mine.item_entries(),
                    theirs.item_entries(),
                    &self.items,
                    &other.items,
                )
        });
        layers_match
            && same_items(
                self.assignments.iter(),
                other.assignments.iter(),
                &self.items,
                &other.items,
            )
    }
}

impl Eq for World {}

fn same_items<'a>(
    mine: impl Iterator<Item = (Position, ItemId)>,
    theirs: impl Iterator<Item = (Position, ItemId)>,
    my_items: &'a ItemTable,
    their_items: &'a ItemTable,
) -> bool {
    let mine: Vec<_> = mine.collect();
    let theirs: Vec<_> = theirs.collect();
    mine.len() == theirs.len()
        && mine
            .iter()
            .zip(theirs.iter())
            .all(|((cell_a, id_a), (cell_b, id_b))| {
                cell_a == cell_b && my_items.get(*id_a) == their_items.get(*id_b)
            })
}
