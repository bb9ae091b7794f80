//! The `address_components` module holds type definitions and methods for the token vocabularies
//! used to classify address components: state codes, directionals, street suffixes and unit
//! designators.
mod state_code;
mod street_direction;
mod street_suffix;
mod unit_designator;

pub use state_code::StateCode;
pub use street_direction::StreetDirection;
pub use street_suffix::StreetSuffix;
pub use unit_designator::UnitDesignator;
