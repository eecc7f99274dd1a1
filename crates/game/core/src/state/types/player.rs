use super::PlayerId;
use crate::constants::{Resource, ResourceBag};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    resources: ResourceBag,
}

impl Player {
    /// Player with the default name for its id and no resources.
    pub fn new(id: PlayerId) -> Self {
        debug_assert!(id.is_valid(), "invalid player id {id}");
        Self {
            id,
            name: default_name(id).to_string(),
            resources: ResourceBag::new(),
        }
    }

    pub fn resources(&self) -> &ResourceBag {
        &self.resources
    }

    pub fn set_resources(&mut self, resources: ResourceBag) {
        self.resources = resources;
    }

    pub fn resource(&self, resource: Resource) -> i32 {
        self.resources.get(resource)
    }

    /// Zero amounts are dropped from the balance.
    pub fn set_resource(&mut self, resource: Resource, amount: i32) {
        self.resources.set(resource, amount);
    }

    pub fn add_resource(&mut self, resource: Resource, amount: i32) {
        self.resources.add(resource, amount);
    }

    /// Whether the player can pay every positive amount in `cost`.
    pub fn has_resources(&self, cost: &ResourceBag) -> bool {
        self.resources.covers(cost)
    }

    pub fn remove_resources(&mut self, cost: &ResourceBag) {
        self.resources.add_bag(cost, -1);
    }
}

pub fn default_name(id: PlayerId) -> &'static str {
    match id.0 {
        0 => "Gray",
        1 => "the blue player",
        2 => "the red player",
        3 => "the yellow player",
        4 => "the green player",
        _ => "unknown player",
    }
}
