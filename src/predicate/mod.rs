//! Predicates - the filter criteria a view applies to its records.
//!
//! Every criterion has a "no constraint" value (empty search, `Choice::All`,
//! no price bound, empty brand set). A predicate set made only of those
//! values lets every record through.

mod store;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use store::PredicateStore;

/// A single-valued enumerated criterion such as status or type.
///
/// Serialises as the bare value, with `"ALL"` for no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn only(value: impl Into<String>) -> Self {
        Choice::from(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Choice::All
        } else {
            Choice::Only(trimmed.to_string())
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::from(value.to_string())
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::All => "ALL".to_string(),
            Choice::Only(value) => value,
        }
    }
}

/// The full set of active criteria for a view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredicateSet {
    pub search: String,
    pub status: Choice,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brands: BTreeSet<String>,
    #[serde(rename = "type")]
    pub kind: Choice,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<Choice>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<Choice>) -> Self {
        self.kind = kind.into();
        self
    }

    /// True when no criterion constrains the collection.
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && self.status.is_all()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.brands.is_empty()
            && self.kind.is_all()
    }

    /// Apply a partial update, returning whether anything changed.
    pub fn apply(&mut self, patch: PredicatePatch) -> bool {
        let before = self.clone();
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(min) = patch.min_price {
            self.min_price = min;
        }
        if let Some(max) = patch.max_price {
            self.max_price = max;
        }
        if let Some(brands) = patch.brands {
            self.brands = brands;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        *self != before
    }
}

/// A partial update to a `PredicateSet`. `None` leaves a field untouched.
///
/// Price bounds are doubly optional: `Some(None)` clears a bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicatePatch {
    pub search: Option<String>,
    pub status: Option<Choice>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub brands: Option<BTreeSet<String>>,
    pub kind: Option<Choice>,
}

impl PredicatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: impl Into<Choice>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn min_price(mut self, min: Option<f64>) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: Option<f64>) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    pub fn kind(mut self, kind: impl Into<Choice>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Reset every criterion to its "no constraint" value.
    pub fn clear_all() -> Self {
        Self {
            search: Some(String::new()),
            status: Some(Choice::All),
            min_price: Some(None),
            max_price: Some(None),
            brands: Some(BTreeSet::new()),
            kind: Some(Choice::All),
        }
    }
}
