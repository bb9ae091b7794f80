//! The `catalog` module owns the in-memory collection of known locations.  The catalog loads
//! once at startup from an injected [`CatalogSource`] and is read-only afterwards.
use crate::address::AddressComponents;
use crate::error::GazetteerResult;
use crate::normalize;
use crate::parser::Parser;
use crate::utils;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

/// The `LocationRow` struct is the raw row shape returned by the backing store: an opaque id and
/// the four address fields.  Absent or empty fields mark the row as incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRow {
    /// The `location_id` field holds the opaque identifier assigned by the backing store.
    pub location_id: Option<String>,
    /// The `street` field holds the street line of the address.
    pub street: Option<String>,
    /// The `city` field holds the postal community.
    pub city: Option<String>,
    /// The `state` field holds the state as recorded by the store.
    pub state: Option<String>,
    /// The `postal_code` field holds the ZIP as recorded by the store.
    pub postal_code: Option<String>,
}

/// The `CatalogSource` trait abstracts the transport behind the location catalog.  The relational
/// store of the deployed service and the CSV files used in development both produce the same row
/// shape.
pub trait CatalogSource {
    /// The `rows` method fetches every catalog row from the backing store.
    fn rows(&mut self) -> GazetteerResult<Vec<LocationRow>>;
}

/// The `CsvSource` struct reads catalog rows from a headered CSV file.
#[derive(Debug, Clone, derive_new::new)]
pub struct CsvSource {
    path: std::path::PathBuf,
}

impl CatalogSource for CsvSource {
    fn rows(&mut self) -> GazetteerResult<Vec<LocationRow>> {
        utils::from_csv(&self.path)
    }
}

/// The `LocationRecord` struct is one catalog entry: the original address fields upper-cased,
/// plus the components parsed from their composite rendering.
#[derive(Debug, Clone, Serialize, Deserialize, derive_getters::Getters)]
pub struct LocationRecord {
    location_id: String,
    street: String,
    city: String,
    state: String,
    postal_code: String,
    components: AddressComponents,
}

/// The `LocationCatalog` struct owns the append-only collection of location records.  Candidates
/// refer to records by index, so records never move once loaded.
#[derive(Debug, Default, Clone)]
pub struct LocationCatalog {
    records: Vec<LocationRecord>,
}

impl LocationCatalog {
    /// The `load` method drains a [`CatalogSource`] into a new catalog.  Rows missing any field
    /// are skipped and counted; surviving rows are upper-cased, ZIP-canonicalized and parsed
    /// from their `"street, city, state postal"` composite form.
    pub fn load<S: CatalogSource>(source: &mut S) -> GazetteerResult<Self> {
        let rows = source.rows()?;
        let mut catalog = LocationCatalog::default();
        let mut skipped = 0;
        for row in rows {
            if !catalog.insert(row) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            info!("{} rows skipped for missing fields.", skipped);
        }
        info!("Location catalog loaded: {} records.", catalog.len());
        Ok(catalog)
    }

    fn insert(&mut self, row: LocationRow) -> bool {
        let fields = [
            row.location_id,
            row.street,
            row.city,
            row.state,
            row.postal_code,
        ];
        let mut values = Vec::new();
        for field in fields {
            match field {
                Some(value) if !value.trim().is_empty() => values.push(value),
                _ => {
                    trace!("Dropping incomplete catalog row.");
                    return false;
                }
            }
        }
        let [location_id, street, city, state, postal_code]: [String; 5] =
            match values.try_into() {
                Ok(values) => values,
                Err(_) => return false,
            };
        let street = street.to_uppercase();
        let city = city.to_uppercase();
        let state = state.to_uppercase();
        let postal_code = normalize::canonicalize_zip(&postal_code.to_uppercase());

        let composite = format!("{street}, {city}, {state} {postal_code}");
        let components = match Parser::parse(&composite) {
            Ok(components) => components,
            Err(_) => {
                trace!("Dropping unparseable catalog row {}.", location_id);
                return false;
            }
        };
        self.records.push(LocationRecord {
            location_id,
            street,
            city,
            state,
            postal_code,
            components,
        });
        true
    }

    /// The `len` method returns the number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The `is_empty` method returns true when no records loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `get` method returns the record at `index`.
    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    /// The `iter` method iterates the records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    /// The `find_by_id` method returns the index of the first record carrying `location_id`.
    /// Lookup is linear; the catalog is small enough that an index would not pay for itself.
    pub fn find_by_id(&self, location_id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.location_id == location_id)
    }
}
