use std::collections::BTreeMap;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Resource kinds produced and spent by cities, units and players.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Resource {
    Food,
    Gold,
    Stone,
    Wood,
}

impl Resource {
    pub const fn label(self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Gold => "gold",
            Resource::Stone => "stone",
            Resource::Wood => "wood",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sparse resource amounts. Missing entries read as zero and zeros are pruned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceBag(BTreeMap<Resource, i32>);

impl ResourceBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, resource: Resource) -> i32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    pub fn set(&mut self, resource: Resource, amount: i32) {
        if amount == 0 {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, amount);
        }
    }

    pub fn add(&mut self, resource: Resource, amount: i32) {
        self.set(resource, self.get(resource) + amount);
    }

    pub fn remove(&mut self, resource: Resource) {
        self.0.remove(&resource);
    }

    /// Adds one unit per list entry, multiplied by `factor`.
    pub fn add_list(&mut self, resources: &[Resource], factor: i32) {
        for resource in resources {
            self.add(*resource, factor);
        }
    }

    pub fn add_bag(&mut self, other: &ResourceBag, factor: i32) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount * factor);
        }
    }

    /// Whether every positive amount in `cost` is covered by this bag.
    pub fn covers(&self, cost: &ResourceBag) -> bool {
        cost.iter()
            .filter(|(_, amount)| *amount > 0)
            .all(|(resource, amount)| self.get(resource) >= amount)
    }

    /// Sum of all amounts, used to rank units by price.
    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.0.contains_key(&resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, i32)> + '_ {
        self.0.iter().map(|(resource, amount)| (*resource, *amount))
    }
}

impl FromIterator<(Resource, i32)> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = (Resource, i32)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (resource, amount) in iter {
            bag.add(resource, amount);
        }
        bag
    }
}

impl<const N: usize> From<[(Resource, i32); N]> for ResourceBag {
    fn from(entries: [(Resource, i32); N]) -> Self {
        entries.into_iter().collect()
    }
}
