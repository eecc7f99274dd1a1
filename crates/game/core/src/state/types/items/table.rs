use std::collections::BTreeMap;

use super::Item;
use crate::state::ItemId;

/// Arena owning every item of a world.
///
/// Ids are allocated monotonically and never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTable {
    next_id: u32,
    items: BTreeMap<ItemId, Item>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut Item)> + '_ {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Per-item count of the cells referencing it from one side table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ItemRefs(BTreeMap<ItemId, usize>);

impl ItemRefs {
    pub(crate) fn count(&self, id: ItemId) -> usize {
        self.0.get(&id).copied().unwrap_or(0)
    }

    pub(crate) fn acquire(&mut self, id: ItemId) {
        *self.0.entry(id).or_insert(0) += 1;
    }

    pub(crate) fn release(&mut self, id: ItemId) {
        if let Some(count) = self.0.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(&id);
            }
        }
    }

    /// Swaps the reference held by one cell: `old` out, `new` in.
    pub(crate) fn replace(&mut self, old: Option<ItemId>, new: Option<ItemId>) {
        if let Some(id) = old {
            self.release(id);
        }
        if let Some(id) = new {
            self.acquire(id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
