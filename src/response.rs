//! The `response` module shapes a match result into the JSON document consumed by the enclosing
//! service layer.  String values are sanitized by dropping control characters below 0x20 other
//! than newline, carriage return and tab, which the serializer escapes.
use crate::catalog::LocationCatalog;
use crate::error::GazetteerResult;
use crate::matcher::{MatchCandidate, MatchResult};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// The `MatchResponse` struct is the serializable rendering of a [`MatchResult`].
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    best_candidate: Option<BestCandidate>,
    candidates: Vec<CandidateSummary>,
    diagnostics: Diagnostics,
    record_components: RecordComponents,
}

/// The `BestCandidate` struct renders the designated best candidate with its full breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct BestCandidate {
    location_id: String,
    confidence: f64,
    strategy: String,
    reason: String,
    street: String,
    city: String,
    state: String,
    postal_code: String,
    breakdown: Map<String, Value>,
}

/// The `CandidateSummary` struct renders one ranked candidate without its breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    location_id: String,
    confidence: f64,
    strategy: String,
    reason: String,
}

/// The `Diagnostics` struct echoes the selection outcome as formatted strings.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    selected_strategy: String,
    selected_confidence: String,
}

/// The `RecordComponents` struct echoes every parsed field of the query.
#[derive(Debug, Clone, Serialize)]
pub struct RecordComponents {
    street_number: String,
    street_direction: String,
    street_name: String,
    street_suffix: String,
    unit: String,
    city: String,
    state: String,
    postal_code: String,
    canonical_key: String,
}

impl MatchResponse {
    /// The `build` method assembles the response from a match result and the catalog its
    /// candidates refer into.
    pub fn build(result: &MatchResult, catalog: &LocationCatalog) -> Self {
        let best_candidate = result
            .best()
            .and_then(|candidate| best_candidate(candidate, catalog));

        let candidates = result
            .candidates()
            .iter()
            .filter_map(|candidate| {
                catalog
                    .get(*candidate.location())
                    .map(|record| CandidateSummary {
                        location_id: sanitize(record.location_id()),
                        confidence: *candidate.confidence(),
                        strategy: candidate.strategy().to_string(),
                        reason: candidate.reason().to_string(),
                    })
            })
            .collect();

        let diagnostics = Diagnostics {
            selected_strategy: sanitize(result.selected_strategy()),
            selected_confidence: sanitize(result.selected_confidence()),
        };

        let query = result.query();
        let record_components = RecordComponents {
            street_number: sanitize(&query.street_number),
            street_direction: sanitize(&query.street_direction),
            street_name: sanitize(&query.street_name),
            street_suffix: sanitize(&query.street_suffix),
            unit: sanitize(&query.unit),
            city: sanitize(&query.city),
            state: sanitize(&query.state),
            postal_code: sanitize(&query.postal_code),
            canonical_key: sanitize(&query.canonical_key),
        };

        MatchResponse {
            best_candidate,
            candidates,
            diagnostics,
            record_components,
        }
    }

    /// The `to_json` method serializes the response to a compact JSON string.
    pub fn to_json(&self) -> GazetteerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The `to_json_pretty` method serializes the response with indentation, for the CLI and
    /// test pages.
    pub fn to_json_pretty(&self) -> GazetteerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn best_candidate(candidate: &MatchCandidate, catalog: &LocationCatalog) -> Option<BestCandidate> {
    let record = catalog.get(*candidate.location())?;
    let mut breakdown = Map::new();
    for comparison in &candidate.breakdown().comparisons {
        breakdown.insert(
            sanitize(&comparison.key),
            json!({ "value": sanitize(&comparison.value), "weight": comparison.weight }),
        );
    }
    Some(BestCandidate {
        location_id: sanitize(record.location_id()),
        confidence: *candidate.confidence(),
        strategy: candidate.strategy().to_string(),
        reason: candidate.reason().to_string(),
        street: sanitize(record.street()),
        city: sanitize(record.city()),
        state: sanitize(record.state()),
        postal_code: sanitize(record.postal_code()),
        breakdown,
    })
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| (*c as u32) >= 0x20 || matches!(*c, '\n' | '\r' | '\t'))
        .collect()
}
