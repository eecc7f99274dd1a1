//! Data-driven content for the armies rules.
//!
//! This crate provides the balance tables the core reads through its oracle
//! traits:
//! - Unit templates (stats, weapons, cost, upkeep)
//! - City and training camp templates
//! - Terrain tables (move-cost tiers, build costs, tile production)
//! - Game configuration
//!
//! [`StandardContent::standard`] carries the built-in tables. With the
//! `loaders` feature, [`ContentFactory`] reads the same data from RON/TOML
//! files. Content is consumed by the engine and never appears in game state.

mod standard;
mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use standard::StandardContent;
pub use tables::{ProductionRule, TileTables};

#[cfg(feature = "loaders")]
pub use loaders::{
    CityCatalog, CityLoader, ConfigLoader, ContentFactory, LoadResult, ProductionLoader,
    TablesLoader, UnitLoader,
};
