//! The `error` module creates a library-specific Error type `GazetteerError`, and an alias for
//! Result using the `GazetteerError`, called `GazetteerResult`.
use thiserror::Error;

/// The `GazetteerError` enum represents the library-specific Error type.
#[derive(Error, Debug)]
pub enum GazetteerError {
    /// An `EmptyAddress` indicates the address parser received empty input, or input that
    /// produced no tokens.
    #[error("Address input is empty or produced no tokens.")]
    EmptyAddress,
    /// Error conversion type for [`std::io::Error`].
    #[error("Input/output error from std.")]
    Io(#[from] std::io::Error),
    /// Error conversion type for [`csv::Error`].
    #[error("Could not read records from csv.")]
    Csv(#[from] csv::Error),
    /// Error conversion type for [`serde_json::Error`].
    #[error("Could not serialize the match response.")]
    Json(#[from] serde_json::Error),
}

/// Alias for the Result type using the local Error type.
pub type GazetteerResult<T> = Result<T, GazetteerError>;
