use strum::{EnumIter, EnumString, IntoStaticStr};

use super::LayerKind;

/// Tag stored in a layer cell.
///
/// Numeric codes are grouped per layer: ground in `[101, 103)`, impassable in
/// `[201, 204)`, objects in `[301, 320)` and units in `[401, 403)`.
/// [`CellValue::Empty`] (`NONE`) is valid everywhere except the ground layer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(u16)]
pub enum CellValue {
    #[default]
    #[strum(serialize = "NONE")]
    #[cfg_attr(feature = "serde", serde(rename = "NONE"))]
    Empty = 0,

    Sea = 101,
    Earth = 102,

    River = 201,
    Pond = 202,
    Mountain = 203,

    City = 301,
    Hill = 302,
    Rocks = 303,
    Trees = 304,
    Houses = 305,
    RoadDirt = 306,
    RoadStone = 307,
    Farm = 308,
    Mill = 309,
    Bakery = 310,
    Sawmill = 311,
    Factory = 312,
    Market = 313,
    Bank = 314,
    Camp = 315,
    BowCamp = 316,
    SwordCamp = 317,
    KnightCamp = 318,
    SiegeCamp = 319,

    Unit = 401,
    Army = 402,
}

impl CellValue {
    pub const PRODUCTION_BUILDINGS: [CellValue; 6] = [
        CellValue::Mill,
        CellValue::Bakery,
        CellValue::Sawmill,
        CellValue::Factory,
        CellValue::Market,
        CellValue::Bank,
    ];

    pub const TRAINING_CAMPS: [CellValue; 5] = [
        CellValue::Camp,
        CellValue::BowCamp,
        CellValue::SwordCamp,
        CellValue::KnightCamp,
        CellValue::SiegeCamp,
    ];

    pub const ROADS: [CellValue; 2] = [CellValue::RoadDirt, CellValue::RoadStone];

    /// Numeric code of this value.
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|value| value.code() == code)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn is_production_building(self) -> bool {
        Self::PRODUCTION_BUILDINGS.contains(&self)
    }

    pub fn is_training_camp(self) -> bool {
        Self::TRAINING_CAMPS.contains(&self)
    }

    pub fn is_road(self) -> bool {
        Self::ROADS.contains(&self)
    }

    /// Layer whose code range contains this value, `None` for [`CellValue::Empty`].
    pub const fn layer(self) -> Option<LayerKind> {
        match self.code() {
            101..=102 => Some(LayerKind::Ground),
            201..=203 => Some(LayerKind::Impassable),
            301..=319 => Some(LayerKind::Objects),
            401..=402 => Some(LayerKind::Units),
            _ => None,
        }
    }

    /// Whether this value may be written into `layer` by an editing command.
    ///
    /// Units accept only [`CellValue::Unit`]; armies form through merging.
    pub fn is_valid_for(self, layer: LayerKind) -> bool {
        if self.is_empty() {
            return layer != LayerKind::Ground;
        }
        match layer {
            LayerKind::Units => self == CellValue::Unit,
            _ => self.layer() == Some(layer),
        }
    }

    /// Display name used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::Sea => "Sea",
            CellValue::Earth => "Earth",
            CellValue::River => "River",
            CellValue::Pond => "Pond",
            CellValue::Mountain => "Mountain",
            CellValue::City => "City",
            CellValue::Hill => "Hill",
            CellValue::Rocks => "Stones",
            CellValue::Trees => "Forest",
            CellValue::Houses => "House",
            CellValue::RoadDirt => "Road",
            CellValue::RoadStone => "Stone road",
            CellValue::Farm => "Farm",
            CellValue::Mill => "Mill",
            CellValue::Bakery => "Bakery",
            CellValue::Sawmill => "Sawmill",
            CellValue::Factory => "Factory",
            CellValue::Market => "Market",
            CellValue::Bank => "Bank",
            CellValue::Camp => "Pikemen training camp",
            CellValue::BowCamp => "Bowmen training camp",
            CellValue::SwordCamp => "Swordmen training camp",
            CellValue::KnightCamp => "Knights training camp",
            CellValue::SiegeCamp => "Siege workshop",
            CellValue::Unit => "Unit",
            CellValue::Army => "Army",
        }
    }
}

impl core::fmt::Display for CellValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn codes_round_trip_through_lookup() {
        assert_eq!(CellValue::from_code(102), Some(CellValue::Earth));
        assert_eq!(CellValue::from_code(319), Some(CellValue::SiegeCamp));
        assert_eq!(CellValue::from_code(999), None);
    }

    #[test]
    fn names_parse_in_screaming_case() {
        assert_eq!(CellValue::from_str("NONE").unwrap(), CellValue::Empty);
        assert_eq!(CellValue::from_str("ROAD_STONE").unwrap(), CellValue::RoadStone);
        let name: &'static str = CellValue::KnightCamp.into();
        assert_eq!(name, "KNIGHT_CAMP");
    }

    #[test]
    fn layer_validity_follows_code_ranges() {
        assert!(!CellValue::Empty.is_valid_for(LayerKind::Ground));
        assert!(CellValue::Empty.is_valid_for(LayerKind::Objects));
        assert!(CellValue::Sea.is_valid_for(LayerKind::Ground));
        assert!(!CellValue::River.is_valid_for(LayerKind::Ground));
        assert!(CellValue::Unit.is_valid_for(LayerKind::Units));
        assert!(!CellValue::Army.is_valid_for(LayerKind::Units));
    }
}
