//! The `utils` module contains utility functions accessed by multiple data types, where declaring
//! a stand-alone function eliminates code duplication in different methods.
use crate::error::GazetteerResult;
use serde::de::DeserializeOwned;

/// Generic function to deserialize data types from a CSV file.  Called by methods to avoid code
/// duplication.  Rows that fail to deserialize are dropped and counted rather than aborting the
/// read.
pub fn from_csv<T: DeserializeOwned, P: AsRef<std::path::Path>>(path: P) -> GazetteerResult<Vec<T>> {
    let mut records = Vec::new();
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut dropped = 0;
    for result in rdr.deserialize() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::trace!("Dropping: {}", e.to_string());
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        tracing::info!("{} records dropped.", dropped);
    }

    Ok(records)
}

/// The `trace_init` function initializes the tracing subscriber, filtered by the `RUST_LOG`
/// environmental variable.  Called by the binary; repeat initialization is not an error.
pub fn trace_init() {
    if tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .is_ok()
    {};
    tracing::info!("Subscriber initialized.");
}
