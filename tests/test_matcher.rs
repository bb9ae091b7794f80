use gazetteer::{
    CANDIDATE_CAP, CandidateSet, CatalogSource, GazetteerResult, LocationCatalog, LocationRow,
    MatchResponse, Matcher, MatcherConfig, Parser, Strategy, score_components,
};

struct VecSource {
    rows: Vec<LocationRow>,
}

impl CatalogSource for VecSource {
    fn rows(&mut self) -> GazetteerResult<Vec<LocationRow>> {
        Ok(self.rows.clone())
    }
}

fn row(id: &str, street: &str, city: &str, state: &str, postal: &str) -> LocationRow {
    LocationRow {
        location_id: Some(id.to_string()),
        street: Some(street.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        postal_code: Some(postal.to_string()),
    }
}

fn springfield_catalog() -> LocationCatalog {
    let mut source = VecSource {
        rows: vec![
            row("LOC-1", "123 Main Street", "Springfield", "IL", "62701"),
            row("LOC-2", "742 Evergreen Terrace", "Springfield", "IL", "62704"),
            row("LOC-3", "1400 Monument Ave", "Richmond", "VA", "23220"),
        ],
    };
    LocationCatalog::load(&mut source).unwrap()
}

#[test_log::test]
fn catalog_skips_incomplete_rows() {
    let mut source = VecSource {
        rows: vec![
            row("LOC-1", "123 Main Street", "Springfield", "IL", "62701"),
            LocationRow {
                location_id: Some("LOC-2".to_string()),
                street: Some("742 Evergreen Terrace".to_string()),
                city: Some("Springfield".to_string()),
                state: Some("IL".to_string()),
                postal_code: None,
            },
            row("LOC-3", "", "Richmond", "VA", "23220"),
        ],
    };
    let catalog = LocationCatalog::load(&mut source).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.find_by_id("LOC-1"), Some(0));
    assert_eq!(catalog.find_by_id("LOC-2"), None);
}

#[test_log::test]
fn catalog_uppercases_and_parses_rows() {
    let catalog = springfield_catalog();
    let record = catalog.get(0).unwrap();
    assert_eq!(record.street(), "123 MAIN STREET");
    assert_eq!(record.city(), "SPRINGFIELD");
    assert_eq!(
        record.components().canonical_key,
        "123||MAIN|STREET|SPRINGFIELD|IL|62701"
    );
}

#[test_log::test]
fn score_self_comparison_sums_present_weights() {
    let full = Parser::parse("601 NE 1 AVE APT 2, Miami, FL 33132").unwrap();
    let breakdown = score_components(&full, &full, true);
    assert!((breakdown.score - 1.0).abs() < 1e-9);
    assert_eq!(breakdown.comparisons.len(), 7);

    // Without a direction and ZIP, only the remaining weights accumulate.
    let partial = Parser::parse("742 Evergreen Ter, Springfield, IL").unwrap();
    let breakdown = score_components(&partial, &partial, true);
    assert!((breakdown.score - 0.85).abs() < 1e-9);
}

#[test_log::test]
fn score_state_truncation_fallback() {
    let left = Parser::parse("601 NE 1 AVE, Miami, FL 33132").unwrap();
    let mut right = left.clone();
    // A spelled-out state still matches its code after the two-character truncation.
    right.state = "Florida".to_string();
    let breakdown = score_components(&left, &right, false);
    assert!((breakdown.score - 1.0).abs() < 1e-9);
}

#[test_log::test]
fn canonical_match_selects_exact_row() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    assert!(result.has_best());
    let best = result.best().unwrap();
    assert_eq!(best.strategy(), &Strategy::Canonical);
    assert!((best.confidence() - 1.0).abs() < 1e-9);
    assert_eq!(result.selected_strategy(), "canonical");
    assert_eq!(result.selected_confidence(), "1.000");
    assert_eq!(
        catalog.get(*best.location()).unwrap().location_id(),
        "LOC-1"
    );
}

#[test_log::test]
fn misspelled_street_admits_fuzzy() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("123 Maine St, Springfield, IL 62701");

    let best = result.best().unwrap();
    assert_eq!(
        catalog.get(*best.location()).unwrap().location_id(),
        "LOC-1"
    );
    // The canonical key misses, so the winning provenance is the fuzzy blend over the
    // structured score.
    assert_eq!(best.strategy(), &Strategy::Fuzzy);
    assert_eq!(best.reason(), "approximate_text_similarity");
    assert!(*best.confidence() >= 0.55);
    assert!(*best.confidence() < 1.0);
}

#[test_log::test]
fn missing_zip_blocks_canonical() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("742 EVERGREEN TER, Springfield, IL");

    let best = result.best().unwrap();
    assert_eq!(
        catalog.get(*best.location()).unwrap().location_id(),
        "LOC-2"
    );
    assert_ne!(best.strategy(), &Strategy::Canonical);
    assert!(*best.confidence() < 1.0);
}

#[test_log::test]
fn empty_input_yields_empty_result() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("");

    assert!(result.candidates().is_empty());
    assert!(!result.has_best());
    assert_eq!(result.selected_strategy(), "none");
    assert_eq!(result.selected_confidence(), "0.00");
}

#[test_log::test]
fn unmatchable_input_yields_empty_result() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("9999 Nowhere Esplanade, Frostbite Falls, MN 56649");
    assert!(result.candidates().is_empty());
    assert_eq!(result.selected_strategy(), "none");
}

#[test_log::test]
fn candidate_set_capacity_and_dedup() {
    let catalog = springfield_catalog();
    let mut set = CandidateSet::with_capacity(2);
    let breakdown = || {
        score_components(
            catalog.get(0).unwrap().components(),
            catalog.get(0).unwrap().components(),
            false,
        )
    };

    set.add(&catalog, 0, 0.70, Strategy::Structured, breakdown());
    set.add(&catalog, 1, 0.60, Strategy::Structured, breakdown());
    set.add(&catalog, 2, 0.80, Strategy::Fuzzy, breakdown());
    assert_eq!(set.len(), 2);

    // The weakest slot only gives way to a strictly stronger candidate.
    set.add(&catalog, 1, 0.65, Strategy::Fuzzy, breakdown());
    let confidences: Vec<f64> = set.items().iter().map(|c| *c.confidence()).collect();
    assert!(confidences.contains(&0.70));
    assert!(confidences.contains(&0.80));
}

#[test_log::test]
fn candidate_set_upgrade_never_downgrades() {
    let catalog = springfield_catalog();
    let breakdown = || {
        score_components(
            catalog.get(0).unwrap().components(),
            catalog.get(0).unwrap().components(),
            false,
        )
    };
    let mut set = CandidateSet::with_capacity(5);
    set.add(&catalog, 0, 0.80, Strategy::Structured, breakdown());
    set.add(&catalog, 0, 0.50, Strategy::Fuzzy, breakdown());
    assert_eq!(set.len(), 1);
    assert!((set.items()[0].confidence() - 0.80).abs() < 1e-9);
    assert_eq!(set.items()[0].strategy(), &Strategy::Structured);

    set.add(&catalog, 0, 0.90, Strategy::Llm, breakdown());
    assert_eq!(set.len(), 1);
    assert!((set.items()[0].confidence() - 0.90).abs() < 1e-9);
    assert_eq!(set.items()[0].strategy(), &Strategy::Llm);
}

#[test_log::test]
fn candidate_capacity_clamps_to_cap() {
    assert_eq!(CandidateSet::with_capacity(64).capacity(), CANDIDATE_CAP);
    assert_eq!(CandidateSet::with_capacity(0).capacity(), 1);
    assert_eq!(CandidateSet::with_capacity(2).capacity(), 2);
}

#[test_log::test]
fn equal_confidence_orders_by_location_id() {
    // Two catalog entries for the same physical address, distinct ids.
    let mut source = VecSource {
        rows: vec![
            row("LOC-B", "123 Main Street", "Springfield", "IL", "62701"),
            row("LOC-A", "123 Main Street", "Springfield", "IL", "62701"),
        ],
    };
    let catalog = LocationCatalog::load(&mut source).unwrap();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    let ids: Vec<&str> = result
        .candidates()
        .iter()
        .map(|c| catalog.get(*c.location()).unwrap().location_id().as_str())
        .collect();
    assert_eq!(ids, vec!["LOC-A", "LOC-B"]);

    let confidences: Vec<f64> = result
        .candidates()
        .iter()
        .map(|c| *c.confidence())
        .collect();
    let mut sorted = confidences.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(confidences, sorted);
}

#[test_log::test]
fn config_defaults_and_env_overrides() {
    let config = MatcherConfig::default();
    assert_eq!(config.structured_min_confidence, 0.65);
    assert_eq!(config.fuzzy_min_confidence, 0.55);
    assert_eq!(config.llm_min_confidence, 0.70);
    assert_eq!(config.max_candidates, 5);
    assert!(config.llm_command.is_none());

    // Out-of-range and malformed overrides are ignored; valid ones land.  All mutation happens
    // in this one test because the environment is process-global.
    unsafe {
        std::env::set_var(gazetteer::STRUCTURED_THRESHOLD_VAR, "1.5");
        std::env::set_var(gazetteer::FUZZY_THRESHOLD_VAR, "0.40");
        std::env::set_var(gazetteer::LLM_THRESHOLD_VAR, "not-a-number");
        std::env::set_var(gazetteer::MAX_CANDIDATES_VAR, "64");
    }
    let config = MatcherConfig::from_env();
    assert_eq!(config.structured_min_confidence, 0.65);
    assert_eq!(config.fuzzy_min_confidence, 0.40);
    assert_eq!(config.llm_min_confidence, 0.70);
    assert_eq!(config.max_candidates, 5);
    unsafe {
        std::env::remove_var(gazetteer::STRUCTURED_THRESHOLD_VAR);
        std::env::remove_var(gazetteer::FUZZY_THRESHOLD_VAR);
        std::env::remove_var(gazetteer::LLM_THRESHOLD_VAR);
        std::env::remove_var(gazetteer::MAX_CANDIDATES_VAR);
    }
}

#[test_log::test]
fn response_serializes_expected_shape() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");
    let response = MatchResponse::build(&result, &catalog);
    let body = response.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();

    let best = &value["best_candidate"];
    assert_eq!(best["location_id"], "LOC-1");
    assert_eq!(best["strategy"], "canonical");
    assert_eq!(best["reason"], "canonical_key_match");
    assert_eq!(best["street"], "123 MAIN STREET");
    let breakdown = best["breakdown"].as_object().unwrap();
    assert_eq!(breakdown.len(), 7);
    assert!((breakdown["street_number"]["weight"].as_f64().unwrap() - 0.35).abs() < 1e-9);
    assert_eq!(breakdown["street_name"]["value"], "MAIN|MAIN");

    assert_eq!(value["diagnostics"]["selected_strategy"], "canonical");
    assert_eq!(value["diagnostics"]["selected_confidence"], "1.000");
    assert_eq!(
        value["record_components"]["canonical_key"],
        "123||MAIN|STREET|SPRINGFIELD|IL|62701"
    );
    assert!(value["candidates"].as_array().unwrap().len() >= 1);
}

#[test_log::test]
fn response_empty_result_has_null_best() {
    let catalog = springfield_catalog();
    let matcher = Matcher::new(&catalog, MatcherConfig::default());
    let result = matcher.resolve("");
    let response = MatchResponse::build(&result, &catalog);
    let value: serde_json::Value =
        serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert!(value["best_candidate"].is_null());
    assert_eq!(value["candidates"].as_array().unwrap().len(), 0);
    assert_eq!(value["diagnostics"]["selected_strategy"], "none");
    assert_eq!(value["diagnostics"]["selected_confidence"], "0.00");
}
