use serde::{Deserialize, Serialize};

/// The `StreetSuffix` enum represents the primary street suffix of a complete street name.
/// Parsed components store the expanded form, so `AVE` and `AVENUE` both read as
/// [`StreetSuffix::AVENUE`].
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
pub enum StreetSuffix {
    ALLEY,
    AVENUE,
    BEND,
    BOULEVARD,
    CIRCLE,
    COURT,
    DRIVE,
    FREEWAY,
    HIGHWAY,
    LANE,
    LOOP,
    PARKWAY,
    PLACE,
    ROAD,
    STREET,
    TERRACE,
    TRAIL,
    WAY,
}

impl StreetSuffix {
    /// The `match_token` function maps a token to a street suffix, accepting the expanded form
    /// and the common short forms found in catalog rows that escaped abbreviation expansion.
    pub fn match_token(input: &str) -> Option<Self> {
        match input.to_uppercase().as_str() {
            "ALLEY" | "ALLY" => Some(Self::ALLEY),
            "AVENUE" | "AVE" => Some(Self::AVENUE),
            "BEND" => Some(Self::BEND),
            "BOULEVARD" | "BLVD" => Some(Self::BOULEVARD),
            "CIRCLE" | "CIR" => Some(Self::CIRCLE),
            "COURT" | "CT" => Some(Self::COURT),
            "DRIVE" | "DR" => Some(Self::DRIVE),
            "FREEWAY" | "FWY" => Some(Self::FREEWAY),
            "HIGHWAY" | "HWY" => Some(Self::HIGHWAY),
            "LANE" | "LN" => Some(Self::LANE),
            "LOOP" => Some(Self::LOOP),
            "PARKWAY" | "PKWY" => Some(Self::PARKWAY),
            "PLACE" | "PL" => Some(Self::PLACE),
            "ROAD" | "RD" => Some(Self::ROAD),
            "STREET" | "ST" => Some(Self::STREET),
            "TERRACE" | "TER" => Some(Self::TERRACE),
            "TRAIL" | "TRL" => Some(Self::TRAIL),
            "WAY" => Some(Self::WAY),
            _ => None,
        }
    }
}
