//! Collection views - the state behind one listing page.
//!
//! `CollectionView` is the synchronous core: it owns the fetched records,
//! the predicate store, the page cursor and the sort key, and derives the
//! visible page on demand. `LiveView` wraps it for async use, adding
//! latest-wins loading and debounced search.
//!
//! ## Example
//!
//! ```ignore
//! let mut view = CollectionView::<Vehicle>::new(page_size);
//! view.replace_records(fetched.items);
//! view.set_predicates(PredicatePatch::new().search("tesla"));
//! let page = view.derive();
//! ```

mod debounce;
mod live;
mod sequencer;

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::error::FetchError;
use crate::fetch::{FetchQuery, FetchedPage};
use crate::pipeline::{self, DerivedView, PageCursor, SortKey};
use crate::predicate::{PredicatePatch, PredicateSet, PredicateStore};
use crate::Record;

pub use debounce::Debouncer;
pub use live::{LiveView, LoadOutcome};
pub use sequencer::{RequestSequencer, Ticket};

/// Where the view is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last load failed. Previously fetched records are still shown.
    Failed(FetchError),
}

/// Totals the backend reported for the collection last applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub fetched: usize,
}

impl SourceWindow {
    /// True when client-side filtering only sees part of the backend data.
    pub fn is_truncated(&self) -> bool {
        self.total_results > self.fetched as u64
    }
}

/// State of a single listing view.
#[derive(Debug, Clone)]
pub struct CollectionView<R> {
    records: Arc<[R]>,
    source: Option<SourceWindow>,
    predicates: PredicateStore,
    cursor: PageCursor,
    sort: SortKey,
    load_state: LoadState,
    last_query: Option<FetchQuery>,
}

impl<R: Record> CollectionView<R> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: Arc::from(Vec::new()),
            source: None,
            predicates: PredicateStore::new(),
            cursor: PageCursor::first(page_size),
            sort: SortKey::default(),
            load_state: LoadState::Idle,
            last_query: None,
        }
    }

    pub fn with_predicates(mut self, predicates: PredicateSet) -> Self {
        self.predicates = PredicateStore::with_initial(predicates);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Shared handle to the raw collection, for handing to other readers.
    pub fn snapshot(&self) -> Arc<[R]> {
        Arc::clone(&self.records)
    }

    pub fn source(&self) -> Option<SourceWindow> {
        self.source
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        match &self.load_state {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn last_query(&self) -> Option<&FetchQuery> {
        self.last_query.as_ref()
    }

    /// Replace the collection wholesale.
    pub fn replace_records(&mut self, records: impl Into<Arc<[R]>>) {
        self.records = records.into();
        self.source = None;
        self.load_state = LoadState::Ready;
    }

    /// Replace the collection with a fetched page, keeping its totals.
    pub fn apply_page(&mut self, page: FetchedPage<R>) {
        self.source = Some(SourceWindow {
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            fetched: page.items.len(),
        });
        self.records = Arc::from(page.items);
        self.load_state = LoadState::Ready;
    }

    pub(crate) fn begin_load(&mut self, query: FetchQuery) {
        self.last_query = Some(query);
        self.load_state = LoadState::Loading;
    }

    /// Record a failed load without touching the displayed records.
    pub(crate) fn fail_load(&mut self, error: FetchError) {
        self.load_state = LoadState::Failed(error);
    }

    /// Drop the collection (unmount or cache invalidation).
    pub fn clear(&mut self) {
        self.records = Arc::from(Vec::new());
        self.source = None;
        self.load_state = LoadState::Idle;
        self.cursor.reset();
    }

    pub fn predicates(&self) -> &PredicateSet {
        self.predicates.get()
    }

    pub fn predicate_generation(&self) -> u64 {
        self.predicates.generation()
    }

    /// Update predicates. Any effective change sends the cursor back to page 1.
    pub fn set_predicates(&mut self, patch: PredicatePatch) -> bool {
        let changed = self.predicates.set(patch);
        if changed {
            self.cursor.reset();
        }
        changed
    }

    /// Replace the predicate set. Resets the cursor if it differs.
    pub fn replace_predicates(&mut self, predicates: PredicateSet) -> bool {
        let changed = self.predicates.replace(predicates);
        if changed {
            self.cursor.reset();
        }
        changed
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.cursor.go_to(page);
    }

    pub fn next_page(&mut self) {
        self.cursor.go_to(self.cursor.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.cursor
            .go_to(self.cursor.current_page().saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.cursor.set_page_size(page_size);
    }

    /// Compute the visible page, persisting the clamped cursor.
    pub fn derive(&mut self) -> DerivedView<R> {
        let (view, cursor) =
            pipeline::derive(&self.records, self.predicates.get(), self.sort, self.cursor);
        self.cursor = cursor;
        view
    }
}
