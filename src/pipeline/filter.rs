//! Filter stage.

use crate::predicate::{Choice, PredicateSet};
use crate::Record;

/// Select the records that satisfy every active predicate.
///
/// Predicates holding their "no constraint" value are skipped without being
/// evaluated. Returns references in input order; the input is untouched.
pub fn filter_records<'a, R: Record>(records: &'a [R], predicates: &PredicateSet) -> Vec<&'a R> {
    if predicates.is_unconstrained() {
        return records.iter().collect();
    }

    let needle = predicates.search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches(*record, predicates, &needle))
        .collect()
}

/// Evaluate one record against the predicate set.
///
/// `needle` is the trimmed, lowercased search text, computed once per pass.
pub fn matches<R: Record>(record: &R, predicates: &PredicateSet, needle: &str) -> bool {
    if !needle.is_empty() && !matches_search(record, needle) {
        return false;
    }
    if !matches_choice(record.status(), &predicates.status) {
        return false;
    }
    if !matches_choice(record.kind(), &predicates.kind) {
        return false;
    }
    if predicates.min_price.is_some() || predicates.max_price.is_some() {
        let price = record.price();
        if predicates.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if predicates.max_price.is_some_and(|max| price > max) {
            return false;
        }
    }
    if !predicates.brands.is_empty() {
        let Some(brand) = record.brand() else {
            return false;
        };
        if !predicates
            .brands
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(brand.trim()))
        {
            return false;
        }
    }
    true
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_choice(value: Option<&str>, choice: &Choice) -> bool {
    match choice.value() {
        None => true,
        Some(wanted) => value.is_some_and(|v| v.trim().eq_ignore_ascii_case(wanted)),
    }
}
