use serde::{Deserialize, Serialize};

/// The `UnitDesignator` enum represents the secondary unit designator that introduces a unit
/// element, per the USPS Publication 28 list of designators observed in catalog data.
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
pub enum UnitDesignator {
    APARTMENT,
    BUILDING,
    FLOOR,
    LEVEL,
    ROOM,
    SUITE,
    UNIT,
}

impl UnitDesignator {
    /// The `match_token` function maps a token to a unit designator.  The bare `#` sign counts
    /// as a unit introducer and reads as [`UnitDesignator::UNIT`].
    pub fn match_token(input: &str) -> Option<Self> {
        match input.to_uppercase().as_str() {
            "APT" | "APARTMENT" => Some(Self::APARTMENT),
            "BLDG" | "BUILDING" => Some(Self::BUILDING),
            "FL" | "FLOOR" => Some(Self::FLOOR),
            "LEVEL" => Some(Self::LEVEL),
            "RM" | "ROOM" => Some(Self::ROOM),
            "STE" | "SUITE" => Some(Self::SUITE),
            "UNIT" | "#" => Some(Self::UNIT),
            _ => None,
        }
    }
}
