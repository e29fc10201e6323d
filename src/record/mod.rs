//! Records - the items a collection view fetches, filters, sorts and pages.
//!
//! A record type exposes its identity plus whichever filterable and sortable
//! attributes it has. Every accessor except `id` defaults to "absent", so a
//! `User` never pretends to have a price.
//!
//! ## Example
//!
//! ```ignore
//! use marketview::Record;
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(resource = "batteries")]
//! struct Battery {
//!     #[record(id)]
//!     pub id: String,
//!     #[record(name, search)]
//!     pub title: String,
//!     #[record(price)]
//!     pub price: String,
//! }
//! ```

mod field;

use serde::{de::DeserializeOwned, Serialize};

pub use field::{parse_number, parse_recency, Amount, NumericField, RecencyField, TextField};

/// Trait for items of a fetched collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// REST collection path for this record type (e.g. "vehicles", "users").
    /// Also the key under which the shared cache stores its snapshot.
    const RESOURCE: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;

    /// Display name, used as the secondary sort key.
    fn name(&self) -> &str {
        ""
    }

    /// Fields matched by the text search predicate.
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Numeric price; unparseable or missing prices are 0.
    fn price(&self) -> f64 {
        0.0
    }

    fn status(&self) -> Option<&str> {
        None
    }

    fn brand(&self) -> Option<&str> {
        None
    }

    /// Category or type discriminator (vehicle type, transaction type, role).
    fn kind(&self) -> Option<&str> {
        None
    }

    /// Recency as a comparable integer (year, or Unix seconds for dates).
    fn recency(&self) -> i64 {
        0
    }

    fn rating(&self) -> f64 {
        0.0
    }
}
