use serde::{Deserialize, Serialize};

/// The `StreetDirection` enum represents the directional prefix of a street name.  Catalog data
/// mixes the postal abbreviation with the spelled-out word, so both forms match.
#[allow(missing_docs)]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum StreetDirection {
    NORTHEAST,
    NORTHWEST,
    SOUTHEAST,
    SOUTHWEST,
    NORTH,
    SOUTH,
    EAST,
    WEST,
}

impl StreetDirection {
    /// The `abbreviate` method converts the variant to the canonical one- or two-letter form
    /// stored in parsed components.
    pub fn abbreviate(&self) -> &'static str {
        match self {
            StreetDirection::NORTH => "N",
            StreetDirection::SOUTH => "S",
            StreetDirection::EAST => "E",
            StreetDirection::WEST => "W",
            StreetDirection::NORTHEAST => "NE",
            StreetDirection::NORTHWEST => "NW",
            StreetDirection::SOUTHEAST => "SE",
            StreetDirection::SOUTHWEST => "SW",
        }
    }

    /// Matches the target data against the official postal abbreviation for street
    /// directionals.
    pub fn match_abbreviated(input: &str) -> Option<Self> {
        match input.to_uppercase().as_str() {
            "NE" => Some(Self::NORTHEAST),
            "NW" => Some(Self::NORTHWEST),
            "SE" => Some(Self::SOUTHEAST),
            "SW" => Some(Self::SOUTHWEST),
            "N" => Some(Self::NORTH),
            "S" => Some(Self::SOUTH),
            "E" => Some(Self::EAST),
            "W" => Some(Self::WEST),
            _ => None,
        }
    }

    /// Maps the string representation of a street directional to the appropriate
    /// [`StreetDirection`] enum variant, accepting both the abbreviation and the full word.
    pub fn match_token(input: &str) -> Option<Self> {
        if let Some(dir) = Self::match_abbreviated(input) {
            Some(dir)
        } else {
            match input.to_uppercase().as_str() {
                "NORTHEAST" => Some(Self::NORTHEAST),
                "NORTHWEST" => Some(Self::NORTHWEST),
                "SOUTHEAST" => Some(Self::SOUTHEAST),
                "SOUTHWEST" => Some(Self::SOUTHWEST),
                "NORTH" => Some(Self::NORTH),
                "SOUTH" => Some(Self::SOUTH),
                "EAST" => Some(Self::EAST),
                "WEST" => Some(Self::WEST),
                _ => None,
            }
        }
    }

    /// The `canonicalize` function normalizes a directional field for comparison.  A recognized
    /// directional collapses to its abbreviation; any other value passes through unchanged.
    pub fn canonicalize(value: &str) -> String {
        match Self::match_token(value) {
            Some(direction) => direction.abbreviate().to_string(),
            None => value.to_string(),
        }
    }
}
