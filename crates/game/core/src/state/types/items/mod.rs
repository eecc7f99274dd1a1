//! Entities attached to layer cells.
//!
//! The set of kinds is closed, so [`Item`] is a plain sum type and every
//! consumer matches on it exhaustively. Items live in the world's
//! [`ItemTable`]; layers and assignments only hold their [`ItemId`].
mod army;
mod city;
mod table;
mod unit;

pub use army::{Army, UnitStack};
pub use city::{City, CityProperties, RecruitCounters, TrainingCamp};
pub use table::ItemTable;
pub(crate) use table::ItemRefs;
pub use unit::{Unit, UnitProperties, WeaponStats};

use super::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Unit(Unit),
    Army(Army),
    City(City),
    TrainingCamp(TrainingCamp),
}

impl Item {
    pub fn player(&self) -> PlayerId {
        match self {
            Item::Unit(unit) => unit.player,
            Item::Army(army) => army.player,
            Item::City(city) => city.player,
            Item::TrainingCamp(camp) => camp.player,
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Item::Unit(_) => "unit",
            Item::Army(_) => "army",
            Item::City(_) => "city",
            Item::TrainingCamp(_) => "training camp",
        }
    }

    /// Units carried by this item: one for a unit, the stack for an army.
    pub fn units(&self) -> &[Unit] {
        match self {
            Item::Unit(unit) => std::slice::from_ref(unit),
            Item::Army(army) => &army.units,
            Item::City(_) | Item::TrainingCamp(_) => &[],
        }
    }

    pub fn units_mut(&mut self) -> &mut [Unit] {
        match self {
            Item::Unit(unit) => std::slice::from_mut(unit),
            Item::Army(army) => &mut army.units,
            Item::City(_) | Item::TrainingCamp(_) => &mut [],
        }
    }

    pub fn as_unit(&self) -> Option<&Unit> {
        match self {
            Item::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_unit_mut(&mut self) -> Option<&mut Unit> {
        match self {
            Item::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn as_army(&self) -> Option<&Army> {
        match self {
            Item::Army(army) => Some(army),
            _ => None,
        }
    }

    pub fn as_city(&self) -> Option<&City> {
        match self {
            Item::City(city) => Some(city),
            _ => None,
        }
    }

    pub fn as_city_mut(&mut self) -> Option<&mut City> {
        match self {
            Item::City(city) => Some(city),
            _ => None,
        }
    }

    pub fn as_camp(&self) -> Option<&TrainingCamp> {
        match self {
            Item::TrainingCamp(camp) => Some(camp),
            _ => None,
        }
    }

    pub fn as_camp_mut(&mut self) -> Option<&mut TrainingCamp> {
        match self {
            Item::TrainingCamp(camp) => Some(camp),
            _ => None,
        }
    }
}

impl From<Unit> for Item {
    fn from(unit: Unit) -> Self {
        Item::Unit(unit)
    }
}

impl From<City> for Item {
    fn from(city: City) -> Self {
        Item::City(city)
    }
}

impl From<TrainingCamp> for Item {
    fn from(camp: TrainingCamp) -> Self {
        Item::TrainingCamp(camp)
    }
}
