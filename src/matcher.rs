//! The `matcher` module runs the candidate strategies in fixed order and aggregates their output
//! into a ranked match result.  Strategies share one [`CandidateSet`], which deduplicates by
//! location id and keeps the highest-confidence provenance for each location.
use crate::address::AddressComponents;
use crate::catalog::LocationCatalog;
use crate::compare::{ScoreBreakdown, score_components};
use crate::config::MatcherConfig;
use crate::oracle::{MAX_ORACLE_CANDIDATES, OracleCandidate, OracleClient};
use crate::parser::Parser;
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Hard upper bound on the candidate list, regardless of configuration.
pub const CANDIDATE_CAP: usize = 16;

const CANONICAL_CONFIDENCE_FLOOR: f64 = 0.9;
const FUZZY_STRUCTURED_SHARE: f64 = 0.60;
const FUZZY_NAME_SHARE: f64 = 0.25;
const FUZZY_CITY_SHARE: f64 = 0.15;
const FUZZY_ZIP_BONUS: f64 = 0.05;
const FUZZY_ZIP_AGREEMENT: f64 = 0.8;

/// The `Strategy` enum names the four candidate generators.  The variant is both the dispatch
/// tag and the provenance label carried by candidates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Strategy {
    /// Exact canonical-key lookup.
    #[display("canonical")]
    Canonical,
    /// Weighted per-component scoring over the whole catalog.
    #[display("structured")]
    Structured,
    /// Structured score blended with raw string similarities.
    #[display("fuzzy")]
    Fuzzy,
    /// External oracle ranking over the accumulated shortlist.
    #[display("llm")]
    Llm,
}

impl Strategy {
    /// The `reason` method returns the fixed reason label reported for candidates of this
    /// strategy.
    pub fn reason(&self) -> &'static str {
        match self {
            Strategy::Canonical => "canonical_key_match",
            Strategy::Structured => "weighted_component_score",
            Strategy::Fuzzy => "approximate_text_similarity",
            Strategy::Llm => "llm_ranked",
        }
    }
}

/// The `MatchCandidate` struct ties a catalog location to the confidence, provenance and score
/// breakdown that admitted it.  The location is referenced by catalog index; candidates never
/// copy the record.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct MatchCandidate {
    location: usize,
    confidence: f64,
    strategy: Strategy,
    breakdown: ScoreBreakdown,
}

impl MatchCandidate {
    /// The `reason` method returns the reason label of the candidate's strategy.
    pub fn reason(&self) -> &'static str {
        self.strategy.reason()
    }
}

/// The `CandidateSet` struct is the bounded, deduplicated aggregation shared by all strategies.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    items: Vec<MatchCandidate>,
    capacity: usize,
}

impl CandidateSet {
    /// The `with_capacity` method creates an empty set holding at most
    /// `min(max_candidates, 16)` entries.
    pub fn with_capacity(max_candidates: usize) -> Self {
        CandidateSet {
            items: Vec::new(),
            capacity: max_candidates.clamp(1, CANDIDATE_CAP),
        }
    }

    /// The `add` method admits a candidate.  A location already present is upgraded in place
    /// when the incoming confidence is strictly greater, keeping its slot.  Otherwise the
    /// candidate appends while the set has room, or replaces the weakest slot when it strictly
    /// beats it; anything else is dropped.
    pub fn add(
        &mut self,
        catalog: &LocationCatalog,
        location: usize,
        confidence: f64,
        strategy: Strategy,
        breakdown: ScoreBreakdown,
    ) {
        let Some(record) = catalog.get(location) else {
            return;
        };
        let incoming_id = record.location_id().clone();

        if let Some(existing) = self.items.iter_mut().find(|candidate| {
            catalog
                .get(candidate.location)
                .is_some_and(|record| record.location_id() == &incoming_id)
        }) {
            if confidence > existing.confidence {
                trace!(
                    "Upgrading {} to {:.3} via {}.",
                    incoming_id, confidence, strategy
                );
                existing.confidence = confidence;
                existing.strategy = strategy;
                existing.breakdown = breakdown;
            }
            return;
        }

        if self.items.len() < self.capacity {
            self.items.push(MatchCandidate {
                location,
                confidence,
                strategy,
                breakdown,
            });
            return;
        }

        let mut weakest = 0;
        for (index, candidate) in self.items.iter().enumerate().skip(1) {
            if candidate.confidence < self.items[weakest].confidence {
                weakest = index;
            }
        }
        if confidence > self.items[weakest].confidence {
            self.items[weakest] = MatchCandidate {
                location,
                confidence,
                strategy,
                breakdown,
            };
        }
    }

    /// The `sort` method orders candidates by descending confidence, breaking ties by ascending
    /// location id.
    pub fn sort(&mut self, catalog: &LocationCatalog) {
        self.items.sort_by(|left, right| {
            right
                .confidence
                .partial_cmp(&left.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    let left_id = catalog
                        .get(left.location)
                        .map(|record| record.location_id().as_str())
                        .unwrap_or_default();
                    let right_id = catalog
                        .get(right.location)
                        .map(|record| record.location_id().as_str())
                        .unwrap_or_default();
                    left_id.cmp(right_id)
                })
        });
    }

    /// The `items` method exposes the accumulated candidates in their current order.
    pub fn items(&self) -> &[MatchCandidate] {
        &self.items
    }

    /// The `capacity` method returns the effective slot bound after clamping.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The `len` method returns the number of accumulated candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The `is_empty` method returns true when no strategy has admitted a candidate.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_items(self) -> Vec<MatchCandidate> {
        self.items
    }
}

/// The `MatchResult` struct is the outcome of resolving one address: the ranked candidates, the
/// selection diagnostics, the parsed query and the raw input.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct MatchResult {
    candidates: Vec<MatchCandidate>,
    has_best: bool,
    best_index: usize,
    selected_strategy: String,
    selected_confidence: String,
    query: AddressComponents,
    raw_address: String,
}

impl MatchResult {
    fn empty(raw_address: &str, query: AddressComponents) -> Self {
        MatchResult {
            candidates: Vec::new(),
            has_best: false,
            best_index: 0,
            selected_strategy: "none".to_string(),
            selected_confidence: "0.00".to_string(),
            query,
            raw_address: raw_address.to_string(),
        }
    }

    /// The `best` method returns the designated best candidate, when one exists.
    pub fn best(&self) -> Option<&MatchCandidate> {
        if self.has_best {
            self.candidates.get(self.best_index)
        } else {
            None
        }
    }
}

/// The `Matcher` struct binds a loaded catalog to a configuration and resolves addresses against
/// it.  Resolution is read-only; one matcher serves any number of sequential queries.
#[derive(Debug, Clone, derive_new::new)]
pub struct Matcher<'a> {
    catalog: &'a LocationCatalog,
    config: MatcherConfig,
}

impl Matcher<'_> {
    /// The `resolve` method runs the full pipeline on one free-text address: parse, run the four
    /// strategies in fixed order, then rank and select.  A failed parse yields an empty result
    /// rather than an error; the caller decides what that means.
    pub fn resolve(&self, raw_address: &str) -> MatchResult {
        let query = match Parser::parse(raw_address) {
            Ok(components) => components,
            Err(e) => {
                debug!("Address did not parse: {}", e);
                return MatchResult::empty(raw_address, AddressComponents::default());
            }
        };

        let mut candidates = CandidateSet::with_capacity(self.config.max_candidates);
        self.canonical(&query, &mut candidates);
        self.structured(&query, &mut candidates);
        self.fuzzy(&query, &mut candidates);
        self.llm(raw_address, &query, &mut candidates);
        candidates.sort(self.catalog);

        let items = candidates.into_items();
        if items.is_empty() {
            return MatchResult::empty(raw_address, query);
        }
        MatchResult {
            selected_strategy: items[0].strategy.to_string(),
            selected_confidence: format!("{:.3}", items[0].confidence),
            has_best: true,
            best_index: 0,
            candidates: items,
            query,
            raw_address: raw_address.to_string(),
        }
    }

    /// Exact canonical-key lookup.  Any key hit is admitted; a structured score of at least 0.9
    /// promotes the confidence to 1.0, anything lower reports the score verbatim.
    fn canonical(&self, query: &AddressComponents, candidates: &mut CandidateSet) {
        if query.canonical_key.is_empty() {
            return;
        }
        for (index, record) in self.catalog.iter().enumerate() {
            let components = record.components();
            if components.canonical_key.is_empty()
                || components.canonical_key != query.canonical_key
            {
                continue;
            }
            let breakdown = score_components(query, components, true);
            let confidence = if breakdown.score >= CANONICAL_CONFIDENCE_FLOOR {
                1.0
            } else {
                breakdown.score
            };
            candidates.add(self.catalog, index, confidence, Strategy::Canonical, breakdown);
        }
    }

    /// Weighted component scoring over every catalog entry, admitted at the configured
    /// threshold.
    fn structured(&self, query: &AddressComponents, candidates: &mut CandidateSet) {
        for (index, record) in self.catalog.iter().enumerate() {
            let breakdown = score_components(query, record.components(), false);
            if breakdown.score >= self.config.structured_min_confidence {
                let confidence = breakdown.score;
                candidates.add(self.catalog, index, confidence, Strategy::Structured, breakdown);
            }
        }
    }

    /// Structured score blended with raw street-name and city similarity, plus a small bonus
    /// when the ZIPs agree closely.  The breakdown attached is the structured one.
    fn fuzzy(&self, query: &AddressComponents, candidates: &mut CandidateSet) {
        for (index, record) in self.catalog.iter().enumerate() {
            let components = record.components();
            let structured = score_components(query, components, false);

            let name_similarity = similarity(&query.street_name, &components.street_name);
            let city_similarity = similarity(&query.city, &components.city);
            let mut zip_similarity = 0.0;
            if !query.postal_code.is_empty() && !components.postal_code.is_empty() {
                zip_similarity = similarity(&query.postal_code, &components.postal_code);
            }

            let mut fuzzy = FUZZY_STRUCTURED_SHARE * structured.score
                + FUZZY_NAME_SHARE * name_similarity
                + FUZZY_CITY_SHARE * city_similarity;
            if zip_similarity > FUZZY_ZIP_AGREEMENT {
                fuzzy += FUZZY_ZIP_BONUS;
            }
            fuzzy = fuzzy.min(1.0);

            if fuzzy >= self.config.fuzzy_min_confidence {
                candidates.add(self.catalog, index, fuzzy, Strategy::Fuzzy, structured);
            }
        }
    }

    /// External oracle ranking.  Runs only when a command is configured and at least one
    /// candidate already exists; every failure leaves the accumulated candidates untouched.
    fn llm(&self, raw_address: &str, query: &AddressComponents, candidates: &mut CandidateSet) {
        let Some(command) = &self.config.llm_command else {
            return;
        };
        if candidates.is_empty() {
            return;
        }

        let shortlist: Vec<OracleCandidate> = candidates
            .items()
            .iter()
            .take(MAX_ORACLE_CANDIDATES)
            .filter_map(|candidate| {
                self.catalog.get(*candidate.location()).map(|record| {
                    OracleCandidate::new(
                        record.location_id().clone(),
                        *candidate.confidence(),
                        candidate.strategy().to_string(),
                        record.street().clone(),
                        record.city().clone(),
                        record.state().clone(),
                        record.postal_code().clone(),
                    )
                })
            })
            .collect();

        let client = OracleClient::new(command.clone());
        let Some(reply) = client.consult(raw_address, &shortlist) else {
            debug!("Oracle contributed nothing.");
            return;
        };
        if reply.confidence < self.config.llm_min_confidence {
            debug!(
                "Oracle confidence {:.3} below threshold {:.3}.",
                reply.confidence, self.config.llm_min_confidence
            );
            return;
        }
        let Some(index) = self.catalog.find_by_id(&reply.location_id) else {
            debug!("Oracle named unknown location {}.", reply.location_id);
            return;
        };
        let Some(record) = self.catalog.get(index) else {
            return;
        };
        let breakdown = score_components(query, record.components(), false);
        candidates.add(self.catalog, index, reply.confidence, Strategy::Llm, breakdown);
    }
}
