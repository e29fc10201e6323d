//! Sort stage.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::Record;

/// Comparator selectable by a listing view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Newest first by date/year, then name ascending.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "priceLow")]
    PriceLow,
    #[serde(rename = "priceHigh")]
    PriceHigh,
    /// Highest rating first; unrated records count as 0.
    #[serde(rename = "rating")]
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "priceLow",
            SortKey::PriceHigh => "priceHigh",
            SortKey::Rating => "rating",
        }
    }

    /// Total order over records for this key.
    ///
    /// Ties on the primary key fall back to name, then id, so two distinct
    /// records only compare equal when both name and id match.
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        let primary = match self {
            SortKey::Newest => b.recency().cmp(&a.recency()),
            SortKey::PriceLow => a.price().total_cmp(&b.price()),
            SortKey::PriceHigh => b.price().total_cmp(&a.price()),
            SortKey::Rating => b.rating().total_cmp(&a.rating()),
        };
        primary
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::new("sort", format!("unknown sort key '{s}'")))
    }
}

/// Order records by `key`, returning a new vector.
///
/// The sort is stable, and because `SortKey::compare` is total, sorting
/// already-sorted input returns it unchanged.
pub fn sort_records<R: Record>(mut records: Vec<&R>, key: SortKey) -> Vec<&R> {
    records.sort_by(|a, b| key.compare(*a, *b));
    records
}
