use strum::{EnumIter, EnumString, IntoStaticStr};

/// Unit classes. Ordering matters: ties between classes favour the higher one.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum UnitClass {
    #[default]
    None,
    Worker,
    Farmer,
    Bowman,
    Pikeman,
    Swordsman,
    Knight,
    Catapult,
}

impl UnitClass {
    pub const fn label(self) -> &'static str {
        match self {
            UnitClass::None => "None",
            UnitClass::Worker => "Worker",
            UnitClass::Farmer => "Farmer",
            UnitClass::Bowman => "Bowman",
            UnitClass::Pikeman => "Pikeman",
            UnitClass::Swordsman => "Swordsman",
            UnitClass::Knight => "Knight",
            UnitClass::Catapult => "Catapult",
        }
    }
}

impl core::fmt::Display for UnitClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Combat channel; each has its own attack, defense and range.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WeaponKind {
    Melee,
    Bow,
    Mount,
    Siege,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Melee,
        WeaponKind::Bow,
        WeaponKind::Mount,
        WeaponKind::Siege,
    ];
}

/// Strategic worlds stack units into armies; tactic worlds hold one unit per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum WorldType {
    #[default]
    Strategic,
    Tactic,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CityClass {
    #[default]
    Default,
}

/// How a city uses one of its claimed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellUsage {
    None,
    House,
    Worker,
    ProductionBuilding,
    TrainingCamp,
}

/// The four planes of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayerKind {
    Ground,
    Impassable,
    Objects,
    Units,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Ground,
        LayerKind::Impassable,
        LayerKind::Objects,
        LayerKind::Units,
    ];
}
