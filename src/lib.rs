#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
mod address;
mod address_components;
mod catalog;
mod cli;
mod compare;
mod config;
mod error;
mod matcher;
mod normalize;
mod oracle;
mod parser;
mod response;
mod similarity;
mod utils;

pub use address::AddressComponents;
pub use address_components::{StateCode, StreetDirection, StreetSuffix, UnitDesignator};
pub use catalog::{CatalogSource, CsvSource, LocationCatalog, LocationRecord, LocationRow};
pub use cli::Cli;
pub use compare::{MAX_BREAKDOWN_ENTRIES, ScoreBreakdown, ScoreComparison, score_components};
pub use config::{
    FUZZY_THRESHOLD_VAR, LLM_COMMAND_VAR, LLM_THRESHOLD_VAR, MAX_CANDIDATES_VAR, MatcherConfig,
    STRUCTURED_THRESHOLD_VAR,
};
pub use error::{GazetteerError, GazetteerResult};
pub use matcher::{
    CANDIDATE_CAP, CandidateSet, MatchCandidate, MatchResult, Matcher, Strategy,
};
pub use normalize::{canonicalize_zip, expand, ordinal_street_name, trim_ordinal};
pub use oracle::{MAX_ORACLE_CANDIDATES, OracleCandidate, OracleClient, OracleReply};
pub use parser::Parser;
pub use response::MatchResponse;
pub use similarity::{levenshtein, similarity};
pub use utils::{from_csv, trace_init};
