//! The derivation pipeline: filter → sort → slice.
//!
//! Every stage is a pure function of its inputs. `derive` chains them and
//! returns a `DerivedView` that owns clones of the visible records only; the
//! filtered and sorted intermediates are vectors of references.

mod filter;
mod page;
mod sort;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;

use crate::predicate::PredicateSet;
use crate::Record;

pub use filter::{filter_records, matches};
pub use page::{slice_page, total_pages, PageCursor};
pub use sort::{sort_records, SortKey};

/// The computed page of a view. Never stored as authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView<R> {
    pub items: Vec<R>,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<R> DerivedView<R> {
    /// True when the filtered collection is empty: a "no results" state,
    /// not a failure.
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Run filter → sort → slice over `records`.
///
/// The cursor is clamped against the filtered count before slicing and
/// returned alongside the view so the caller can persist the clamped page.
pub fn derive<R: Record>(
    records: &[R],
    predicates: &PredicateSet,
    sort: SortKey,
    cursor: PageCursor,
) -> (DerivedView<R>, PageCursor) {
    let filtered = filter_records(records, predicates);
    let sorted = sort_records(filtered, sort);

    let mut cursor = cursor;
    cursor.clamp_to(sorted.len());

    let items = slice_page(&sorted, &cursor)
        .iter()
        .map(|record| R::clone(record))
        .collect();

    let view = DerivedView {
        items,
        filtered_count: sorted.len(),
        total_pages: total_pages(sorted.len(), cursor.page_size()),
        current_page: cursor.current_page(),
        page_size: cursor.page_size(),
    };
    (view, cursor)
}
