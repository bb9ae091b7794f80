//! The `oracle` module adapts an externally-provided ranking command.  The adapter serializes a
//! candidate shortlist to a temp file, invokes the command with the file path, and reads one
//! reply line of flat `key=value` tokens from its standard output.  Every failure degrades to
//! `None`; the oracle never aborts a match.
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Upper bound on candidates serialized into the oracle payload.
pub const MAX_ORACLE_CANDIDATES: usize = 5;

/// The `OracleCandidate` struct is one shortlist entry carried in the payload.
#[derive(Debug, Clone, Serialize, Deserialize, derive_new::new)]
pub struct OracleCandidate {
    /// The `location_id` field holds the catalog identifier of the candidate.
    pub location_id: String,
    /// The `confidence` field holds the confidence accumulated so far.
    pub confidence: f64,
    /// The `strategy` field labels the strategy that produced the candidate.
    pub strategy: String,
    /// The `street` field holds the original street line of the location.
    pub street: String,
    /// The `city` field holds the original city of the location.
    pub city: String,
    /// The `state` field holds the original state of the location.
    pub state: String,
    /// The `postal_code` field holds the original ZIP of the location.
    pub postal_code: String,
}

#[derive(Debug, Serialize)]
struct OraclePayload<'a> {
    address: &'a str,
    candidates: &'a [OracleCandidate],
}

/// The `OracleReply` struct holds the recognized fields of a reply line.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleReply {
    /// The `location_id` field names the catalog entry the oracle ranked first.
    pub location_id: String,
    /// The `confidence` field carries the oracle's reported confidence.
    pub confidence: f64,
}

/// The `OracleClient` struct invokes the external ranking command configured for the matcher.
#[derive(Debug, Clone, derive_new::new)]
pub struct OracleClient {
    command: String,
}

impl OracleClient {
    /// The `consult` method writes the payload, runs `<command> <path>`, and parses the first
    /// line of standard output.  The payload file is removed on every exit path when the handle
    /// drops, and the child is reaped before returning.
    pub fn consult(&self, address: &str, candidates: &[OracleCandidate]) -> Option<OracleReply> {
        let payload = OraclePayload {
            address,
            candidates,
        };
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                debug!("Oracle payload serialization failed: {}", e);
                return None;
            }
        };

        let mut file = match tempfile::Builder::new()
            .prefix("gazetteer-llm-")
            .suffix(".json")
            .tempfile()
        {
            Ok(file) => file,
            Err(e) => {
                debug!("Oracle payload file creation failed: {}", e);
                return None;
            }
        };
        if let Err(e) = file.write_all(&body) {
            debug!("Oracle payload write failed: {}", e);
            return None;
        }

        let output = match Command::new(&self.command).arg(file.path()).output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Oracle command failed to spawn: {}", e);
                return None;
            }
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next()?.trim();
        if line.is_empty() {
            return None;
        }
        Self::parse_reply(line)
    }

    /// The `parse_reply` function reads a flat, whitespace-separated `key=value` reply line.
    /// Only `location_id=` and `confidence=` are recognized; other tokens are ignored.  A reply
    /// without an id, or with a confidence that fails to parse above zero, reads as no reply.
    pub fn parse_reply(line: &str) -> Option<OracleReply> {
        let mut location_id = String::new();
        let mut confidence = 0.0;
        for token in line.split_whitespace() {
            if let Some(value) = token.strip_prefix("location_id=") {
                location_id = value.to_string();
            } else if let Some(value) = token.strip_prefix("confidence=") {
                confidence = value.parse().unwrap_or(0.0);
            }
        }
        if location_id.is_empty() || confidence <= 0.0 {
            return None;
        }
        Some(OracleReply {
            location_id,
            confidence,
        })
    }
}
