//! The `compare` module scores a pair of parsed addresses field by field, producing the weighted
//! aggregate and the per-field breakdown attached to every candidate.
use crate::address::AddressComponents;
use crate::address_components::{StateCode, StreetDirection};
use crate::normalize;
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};

/// Upper bound on comparisons recorded per breakdown, one per scored field.
pub const MAX_BREAKDOWN_ENTRIES: usize = 8;

const STREET_NUMBER_WEIGHT: f64 = 0.35;
const STREET_NAME_WEIGHT: f64 = 0.25;
const DIRECTIONAL_WEIGHT: f64 = 0.05;
const SUFFIX_WEIGHT: f64 = 0.05;
const CITY_WEIGHT: f64 = 0.15;
const STATE_WEIGHT: f64 = 0.05;
const POSTAL_WEIGHT: f64 = 0.10;

/// The `ScoreComparison` struct records one per-field comparison: the field key, the compared
/// values rendered as `left|right`, and the weight the field carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct ScoreComparison {
    /// The `key` field names the compared component.
    pub key: String,
    /// The `value` field renders the compared values as `left|right`.
    pub value: String,
    /// The `weight` field carries the fixed weight of the component.
    pub weight: f64,
}

/// The `ScoreBreakdown` struct aggregates the weighted score and the comparisons that produced
/// it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// The `score` field holds the weighted sum over all compared fields, at most 1.0 by
    /// construction.
    pub score: f64,
    /// The `comparisons` field holds one entry per scored field.
    pub comparisons: Vec<ScoreComparison>,
}

impl ScoreBreakdown {
    fn record(&mut self, key: &str, left: &str, right: &str, weight: f64) {
        if self.comparisons.len() >= MAX_BREAKDOWN_ENTRIES {
            return;
        }
        self.comparisons
            .push(ScoreComparison::new(key.to_string(), format!("{left}|{right}"), weight));
    }
}

/// The `score_components` function compares two parsed addresses across seven weighted fields.
/// Exact-match fields contribute their weight only when both sides are present and equal; the
/// street name and city contribute their weight scaled by string similarity.  When `require_zip`
/// is set and the left side carries a ZIP the right side lacks, the postal contribution is forced
/// to zero.
pub fn score_components(
    left: &AddressComponents,
    right: &AddressComponents,
    require_zip: bool,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();
    let mut score = 0.0;

    let mut number_match = 0.0;
    if !left.street_number.is_empty() && !right.street_number.is_empty() {
        number_match = exact_match(&left.street_number, &right.street_number);
    }
    score += STREET_NUMBER_WEIGHT * number_match;
    breakdown.record(
        "street_number",
        &left.street_number,
        &right.street_number,
        STREET_NUMBER_WEIGHT,
    );

    let name_similarity = similarity(&left.street_name, &right.street_name);
    score += STREET_NAME_WEIGHT * name_similarity;
    breakdown.record(
        "street_name",
        &left.street_name,
        &right.street_name,
        STREET_NAME_WEIGHT,
    );

    let left_direction = StreetDirection::canonicalize(&left.street_direction);
    let right_direction = StreetDirection::canonicalize(&right.street_direction);
    let mut direction_match = 0.0;
    if !left_direction.is_empty() && !right_direction.is_empty() {
        direction_match = exact_match(&left_direction, &right_direction);
    }
    score += DIRECTIONAL_WEIGHT * direction_match;
    breakdown.record(
        "directional",
        &left_direction,
        &right_direction,
        DIRECTIONAL_WEIGHT,
    );

    let mut suffix_match = 0.0;
    if !left.street_suffix.is_empty() && !right.street_suffix.is_empty() {
        suffix_match = exact_match(&left.street_suffix, &right.street_suffix);
    }
    score += SUFFIX_WEIGHT * suffix_match;
    breakdown.record(
        "suffix",
        &left.street_suffix,
        &right.street_suffix,
        SUFFIX_WEIGHT,
    );

    let city_similarity = similarity(&left.city, &right.city);
    score += CITY_WEIGHT * city_similarity;
    breakdown.record("city", &left.city, &right.city, CITY_WEIGHT);

    let left_state = StateCode::canonicalize(&left.state);
    let right_state = StateCode::canonicalize(&right.state);
    let mut state_match = 0.0;
    if !left_state.is_empty() && !right_state.is_empty() {
        state_match = exact_match(&left_state, &right_state);
    }
    score += STATE_WEIGHT * state_match;
    breakdown.record("state", &left_state, &right_state, STATE_WEIGHT);

    let left_zip = normalize::canonicalize_zip(&left.postal_code);
    let right_zip = normalize::canonicalize_zip(&right.postal_code);
    let mut zip_match = 0.0;
    if !left_zip.is_empty() && !right_zip.is_empty() {
        zip_match = exact_match(&left_zip, &right_zip);
    }
    if require_zip && !left_zip.is_empty() && right_zip.is_empty() {
        zip_match = 0.0;
    }
    score += POSTAL_WEIGHT * zip_match;
    breakdown.record("postal_code", &left_zip, &right_zip, POSTAL_WEIGHT);

    breakdown.score = score;
    breakdown
}

fn exact_match(left: &str, right: &str) -> f64 {
    if left == right { 1.0 } else { 0.0 }
}
