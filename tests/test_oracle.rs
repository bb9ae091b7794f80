use gazetteer::{
    CatalogSource, GazetteerResult, LocationCatalog, LocationRow, Matcher, MatcherConfig,
    OracleClient, OracleReply, Strategy,
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

fn catalog() -> LocationCatalog {
    let mut source = VecSource {
        rows: vec![
            row("LOC-1", "123 Main Street", "Springfield", "IL", "62701"),
            row("LOC-2", "900 Birch Road", "Peoria", "IL", "61602"),
        ],
    };
    LocationCatalog::load(&mut source).unwrap()
}

fn config_with_oracle(command: &str) -> MatcherConfig {
    MatcherConfig {
        llm_command: Some(command.to_string()),
        ..Default::default()
    }
}

#[test_log::test]
fn reply_parsing_recognizes_known_keys() {
    let reply = OracleClient::parse_reply("location_id=LOC42 confidence=0.82").unwrap();
    assert_eq!(
        reply,
        OracleReply {
            location_id: "LOC42".to_string(),
            confidence: 0.82,
        }
    );

    // Tokens are order-insensitive and unknown keys are ignored.
    let reply =
        OracleClient::parse_reply("rank=1 confidence=0.9 location_id=LOC7 note=best").unwrap();
    assert_eq!(reply.location_id, "LOC7");
    assert_eq!(reply.confidence, 0.9);
}

#[test_log::test]
fn reply_parsing_rejects_incomplete_lines() {
    assert!(OracleClient::parse_reply("confidence=0.9").is_none());
    assert!(OracleClient::parse_reply("location_id=LOC42").is_none());
    assert!(OracleClient::parse_reply("location_id=LOC42 confidence=junk").is_none());
    assert!(OracleClient::parse_reply("location_id=LOC42 confidence=-0.2").is_none());
    assert!(OracleClient::parse_reply("").is_none());
}

#[cfg(unix)]
fn stub_oracle(dir: &tempfile::TempDir, script_body: &str) -> String {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("oracle.sh");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "#!/bin/sh").unwrap();
    writeln!(file, "{script_body}").unwrap();
    let mut permissions = file.metadata().unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
#[test_log::test]
fn consult_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let command = stub_oracle(&dir, "echo \"location_id=LOC-9 confidence=0.77\"");
    let client = OracleClient::new(command);
    let reply = client.consult("601 NE 1 AVE", &[]).unwrap();
    assert_eq!(reply.location_id, "LOC-9");
    assert_eq!(reply.confidence, 0.77);
}

#[cfg(unix)]
#[test_log::test]
fn oracle_adds_ranked_candidate() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    // The stub proves the payload landed on disk before replying.
    let command = stub_oracle(
        &dir,
        "grep -q '\"address\"' \"$1\" || exit 1\necho \"location_id=LOC-2 confidence=0.82\"",
    );
    let matcher = Matcher::new(&catalog, config_with_oracle(&command));
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    let llm_candidate = result
        .candidates()
        .iter()
        .find(|c| catalog.get(*c.location()).unwrap().location_id() == "LOC-2")
        .expect("oracle candidate admitted");
    assert_eq!(llm_candidate.strategy(), &Strategy::Llm);
    assert_eq!(llm_candidate.reason(), "llm_ranked");
    assert!((llm_candidate.confidence() - 0.82).abs() < 1e-9);

    // The canonical hit still outranks the oracle's pick.
    let best = result.best().unwrap();
    assert_eq!(
        catalog.get(*best.location()).unwrap().location_id(),
        "LOC-1"
    );
}

#[cfg(unix)]
#[test_log::test]
fn oracle_below_threshold_contributes_nothing() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let command = stub_oracle(&dir, "echo \"location_id=LOC-2 confidence=0.60\"");
    let matcher = Matcher::new(&catalog, config_with_oracle(&command));
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    let ids: Vec<&str> = result
        .candidates()
        .iter()
        .map(|c| catalog.get(*c.location()).unwrap().location_id().as_str())
        .collect();
    assert_eq!(ids, vec!["LOC-1"]);
}

#[cfg(unix)]
#[test_log::test]
fn oracle_unknown_id_contributes_nothing() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let command = stub_oracle(&dir, "echo \"location_id=LOC-404 confidence=0.99\"");
    let matcher = Matcher::new(&catalog, config_with_oracle(&command));
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");
    assert_eq!(result.candidates().len(), 1);
}

#[cfg(unix)]
#[test_log::test]
fn oracle_never_downgrades_existing_candidate() {
    let catalog = catalog();
    let dir = tempfile::tempdir().unwrap();
    let command = stub_oracle(&dir, "echo \"location_id=LOC-1 confidence=0.95\"");
    let matcher = Matcher::new(&catalog, config_with_oracle(&command));
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    let best = result.best().unwrap();
    assert_eq!(best.strategy(), &Strategy::Canonical);
    assert!((best.confidence() - 1.0).abs() < 1e-9);
}

#[test_log::test]
fn oracle_spawn_failure_degrades_silently() {
    let catalog = catalog();
    let matcher = Matcher::new(&catalog, config_with_oracle("/nonexistent/oracle-command"));
    let result = matcher.resolve("123 Main Street, Springfield, IL 62701");

    assert!(result.has_best());
    assert_eq!(result.selected_strategy(), "canonical");
    assert_eq!(result.candidates().len(), 1);
}
