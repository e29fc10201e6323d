//! Coercion of raw record fields into filter and sort values.
//!
//! Backends send prices both as numbers and as formatted strings, and years
//! both as integers and as ISO dates. These traits flatten that variety into
//! the values the pipeline compares, mapping anything unparseable to a
//! neutral value instead of failing.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// A field readable as text.
pub trait TextField {
    fn text(&self) -> Option<&str>;
}

impl TextField for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl TextField for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: TextField> TextField for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(TextField::text)
    }
}

/// A field readable as a number. Unparseable values read as 0.
pub trait NumericField {
    fn number(&self) -> f64;
}

macro_rules! numeric_primitive {
    ($($ty:ty),*) => {
        $(
            impl NumericField for $ty {
                fn number(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_primitive!(i32, i64, u32, u64);

impl NumericField for f32 {
    fn number(&self) -> f64 {
        f64::from(*self).number()
    }
}

impl NumericField for f64 {
    fn number(&self) -> f64 {
        if self.is_finite() {
            *self
        } else {
            0.0
        }
    }
}

impl NumericField for String {
    fn number(&self) -> f64 {
        parse_number(self)
    }
}

impl<T: NumericField> NumericField for Option<T> {
    fn number(&self) -> f64 {
        self.as_ref().map(NumericField::number).unwrap_or(0.0)
    }
}

/// A monetary value as the backend sends it: a JSON number or a formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl NumericField for Amount {
    fn number(&self) -> f64 {
        match self {
            Amount::Number(value) => value.number(),
            Amount::Text(raw) => parse_number(raw),
        }
    }
}

/// Parse a price-like string such as `"1,250,000"`, `"$ 99.5"` or `"12000 VND"`.
///
/// Grouping commas, currency symbols and unit suffixes are ignored. Anything
/// that still does not parse as a finite number yields 0.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// A field readable as a recency key: larger means newer.
pub trait RecencyField {
    fn recency(&self) -> i64;
}

impl RecencyField for i32 {
    fn recency(&self) -> i64 {
        i64::from(*self)
    }
}

impl RecencyField for i64 {
    fn recency(&self) -> i64 {
        *self
    }
}

impl RecencyField for u32 {
    fn recency(&self) -> i64 {
        i64::from(*self)
    }
}

impl RecencyField for String {
    fn recency(&self) -> i64 {
        parse_recency(self)
    }
}

impl<T: RecencyField> RecencyField for Option<T> {
    fn recency(&self) -> i64 {
        self.as_ref().map(RecencyField::recency).unwrap_or(0)
    }
}

/// Parse an RFC 3339 timestamp, a `YYYY-MM-DD` date or a bare year.
///
/// Timestamps and dates become Unix seconds; a bare year stays a year, so
/// only compare values from the same field. Unparseable input yields 0.
pub fn parse_recency(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return ts.unix_timestamp();
    }
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return date.midnight().assume_utc().unix_timestamp();
    }
    raw.parse::<i64>().unwrap_or(0)
}
