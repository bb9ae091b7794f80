//! The `config` module reads the matcher tunables from the environment.  Invalid overrides are
//! ignored with a warning so a bad deployment falls back to the defaults rather than failing.
use crate::matcher::CANDIDATE_CAP;
use tracing::{debug, warn};

/// Environment variable overriding the structured strategy admission threshold.
pub const STRUCTURED_THRESHOLD_VAR: &str = "GAZETTEER_STRUCTURED_THRESHOLD";
/// Environment variable overriding the fuzzy strategy admission threshold.
pub const FUZZY_THRESHOLD_VAR: &str = "GAZETTEER_FUZZY_THRESHOLD";
/// Environment variable overriding the oracle reply acceptance threshold.
pub const LLM_THRESHOLD_VAR: &str = "GAZETTEER_LLM_THRESHOLD";
/// Environment variable overriding the candidate list capacity.
pub const MAX_CANDIDATES_VAR: &str = "GAZETTEER_MAX_CANDIDATES";
/// Environment variable naming the oracle command; its presence enables the oracle strategy.
pub const LLM_COMMAND_VAR: &str = "GAZETTEER_LLM_COMMAND";

/// The `MatcherConfig` struct carries the tunable thresholds and the optional oracle command.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// The `structured_min_confidence` field gates admission from the structured strategy.
    pub structured_min_confidence: f64,
    /// The `fuzzy_min_confidence` field gates admission from the fuzzy strategy.
    pub fuzzy_min_confidence: f64,
    /// The `llm_min_confidence` field gates acceptance of an oracle reply.
    pub llm_min_confidence: f64,
    /// The `max_candidates` field bounds the candidate list, clamped to `[1, 16]`.
    pub max_candidates: usize,
    /// The `llm_command` field names the oracle executable; `None` disables the oracle strategy.
    pub llm_command: Option<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            structured_min_confidence: 0.65,
            fuzzy_min_confidence: 0.55,
            llm_min_confidence: 0.70,
            max_candidates: 5,
            llm_command: None,
        }
    }
}

impl MatcherConfig {
    /// The `from_env` method builds a configuration from the defaults plus any valid environment
    /// overrides.  Thresholds outside the open interval (0, 1) and candidate counts outside
    /// `[1, 16]` are rejected.
    pub fn from_env() -> Self {
        let defaults = MatcherConfig::default();
        let mut config = MatcherConfig {
            structured_min_confidence: read_threshold(
                STRUCTURED_THRESHOLD_VAR,
                defaults.structured_min_confidence,
            ),
            fuzzy_min_confidence: read_threshold(
                FUZZY_THRESHOLD_VAR,
                defaults.fuzzy_min_confidence,
            ),
            llm_min_confidence: read_threshold(LLM_THRESHOLD_VAR, defaults.llm_min_confidence),
            ..defaults
        };

        if let Ok(value) = std::env::var(MAX_CANDIDATES_VAR) {
            match value.parse::<usize>() {
                Ok(count) if (1..=CANDIDATE_CAP).contains(&count) => {
                    debug!("{} set to {}.", MAX_CANDIDATES_VAR, count);
                    config.max_candidates = count;
                }
                _ => warn!(
                    "Ignoring {}: {:?} is not a count in [1, {}].",
                    MAX_CANDIDATES_VAR, value, CANDIDATE_CAP
                ),
            }
        }

        if let Ok(command) = std::env::var(LLM_COMMAND_VAR) {
            if !command.is_empty() {
                debug!("Oracle strategy enabled: {}.", command);
                config.llm_command = Some(command);
            }
        }
        config
    }
}

fn read_threshold(name: &str, default: f64) -> f64 {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => match value.parse::<f64>() {
            Ok(parsed) if parsed > 0.0 && parsed < 1.0 => {
                debug!("{} set to {}.", name, parsed);
                parsed
            }
            _ => {
                warn!("Ignoring {}: {:?} is not a ratio in (0, 1).", name, value);
                default
            }
        },
        _ => default,
    }
}
