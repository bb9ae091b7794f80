//! The `address` module defines the parsed form of a postal address.  The parser fills an
//! [`AddressComponents`] record; the scorer and strategies read it.
use serde::{Deserialize, Serialize};

/// The `AddressComponents` struct holds the typed fields parsed from one free-text address.  All
/// fields are upper-cased by the parser; absent fields hold the empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    /// The `street_number` field represents the house number, possibly a hyphenated range.
    pub street_number: String,
    /// The `street_direction` field represents the directional prefix in its canonical one- or
    /// two-letter form.
    pub street_direction: String,
    /// The `street_name` field represents the street name with ordinal tokens converted to
    /// ordinal words.
    pub street_name: String,
    /// The `street_suffix` field represents the primary street suffix in expanded form.
    pub street_suffix: String,
    /// The `unit` field concatenates the unit designator and its followup tokens.
    pub unit: String,
    /// The `city` field represents the postal community.
    pub city: String,
    /// The `state` field represents the two-letter state code, empty when no valid code was
    /// found.
    pub state: String,
    /// The `postal_code` field represents the canonicalized ZIP, five digits with an optional
    /// `-` plus-four tail.
    pub postal_code: String,
    /// The `canonical_key` field is a stable pipe-joined rendering of the components, used for
    /// exact lookup.  Empty unless both the street number and street name are present.
    pub canonical_key: String,
}

impl AddressComponents {
    /// The `compute_canonical_key` method synthesizes the canonical key from the other fields.
    /// The key joins street number, direction, name, suffix, city, state and postal code with
    /// pipes, and stays empty when either the street number or the street name is missing.
    pub fn compute_canonical_key(&mut self) {
        if self.street_number.is_empty() || self.street_name.is_empty() {
            self.canonical_key.clear();
            return;
        }
        self.canonical_key = [
            self.street_number.as_str(),
            self.street_direction.as_str(),
            self.street_name.as_str(),
            self.street_suffix.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
        ]
        .join("|");
    }
}
