//! LiveView - a collection view shared between UI handlers and async loads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{CollectionView, Debouncer, LoadState, RequestSequencer};
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::fetch::{FetchQuery, RemoteFetcher};
use crate::pipeline::{DerivedView, SortKey};
use crate::predicate::{PredicatePatch, PredicateSet};
use crate::Record;

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was the latest and replaced the collection.
    Applied { count: usize },
    /// A newer request was issued (or the view closed) before this one
    /// resolved; its result was dropped.
    Discarded,
}

/// An async-capable collection view.
///
/// Clones share state. Loads may overlap freely: each load takes a ticket
/// from the view's `RequestSequencer` and only the latest ticket may commit,
/// so a slow early response can never overwrite a fresher one.
pub struct LiveView<R, F> {
    state: Arc<Mutex<CollectionView<R>>>,
    fetcher: Arc<F>,
    sequencer: RequestSequencer,
    debouncer: Debouncer,
}

impl<R, F> Clone for LiveView<R, F> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            fetcher: Arc::clone(&self.fetcher),
            sequencer: self.sequencer.clone(),
            debouncer: self.debouncer.clone(),
        }
    }
}

impl<R, F> LiveView<R, F>
where
    R: Record,
    F: RemoteFetcher<R>,
{
    pub fn new(fetcher: F, config: &ClientConfig) -> Self {
        Self::from_view(fetcher, CollectionView::new(config.page_size), config)
    }

    pub fn from_view(fetcher: F, view: CollectionView<R>, config: &ClientConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(view)),
            fetcher: Arc::new(fetcher),
            sequencer: RequestSequencer::new(),
            debouncer: Debouncer::new(config.search_debounce),
        }
    }

    fn state(&self) -> MutexGuard<'_, CollectionView<R>> {
        lock(&self.state)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `query` and, if still the latest request when it resolves,
    /// replace the collection.
    ///
    /// A failed latest request keeps the previous records and records the
    /// error in `load_state`; the error is also returned. Failures of
    /// superseded requests are discarded like their successes.
    pub async fn load(&self, query: FetchQuery) -> Result<LoadOutcome, FetchError> {
        if self.sequencer.is_closed() {
            return Ok(LoadOutcome::Discarded);
        }
        let ticket = self.sequencer.issue();
        debug!(resource = R::RESOURCE, ticket = ticket.value(), ?query, "load issued");
        self.state().begin_load(query.clone());

        let result = self.fetcher.fetch_page(&query).await;

        // Checked under the state lock so no newer ticket can be issued
        // between the check and the commit.
        let mut state = self.state();
        if !self.sequencer.is_current(&ticket) {
            debug!(
                resource = R::RESOURCE,
                ticket = ticket.value(),
                "discarding stale response"
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let count = page.items.len();
                state.apply_page(page);
                debug!(resource = R::RESOURCE, count, "load applied");
                Ok(LoadOutcome::Applied { count })
            }
            Err(err) => {
                warn!(resource = R::RESOURCE, error = %err, "load failed, keeping previous records");
                state.fail_load(err.clone());
                Err(err)
            }
        }
    }

    /// Repeat the last issued query (the retry affordance). Loads the first
    /// bulk window if nothing was loaded yet.
    pub async fn reload(&self) -> Result<LoadOutcome, FetchError> {
        let query = self
            .state()
            .last_query()
            .cloned()
            .unwrap_or_else(FetchQuery::new);
        self.load(query).await
    }

    /// Debounced text search. Only the last call in a burst is applied.
    ///
    /// Must be called from within a tokio runtime. Once the view is closed
    /// nothing is scheduled and the handle resolves to `false`.
    pub fn search(&self, text: impl Into<String>) -> JoinHandle<bool> {
        if self.sequencer.is_closed() {
            return tokio::spawn(async { false });
        }
        let state = Arc::clone(&self.state);
        let sequencer = self.sequencer.clone();
        let text = text.into();
        self.debouncer.schedule(move || {
            let mut state = lock(&state);
            if !sequencer.is_closed() {
                state.set_predicates(PredicatePatch::new().search(text));
            }
        })
    }

    /// Apply a search immediately, cancelling any pending debounced search.
    pub fn search_now(&self, text: impl Into<String>) -> bool {
        self.debouncer.cancel();
        if self.sequencer.is_closed() {
            return false;
        }
        self.state()
            .set_predicates(PredicatePatch::new().search(text))
    }

    pub fn set_predicates(&self, patch: PredicatePatch) -> bool {
        self.state().set_predicates(patch)
    }

    pub fn predicates(&self) -> PredicateSet {
        self.state().predicates().clone()
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.state().set_sort(sort);
    }

    pub fn go_to_page(&self, page: usize) {
        self.state().go_to_page(page);
    }

    pub fn load_state(&self) -> LoadState {
        self.state().load_state().clone()
    }

    /// Shared handle to the raw collection currently displayed.
    pub fn records(&self) -> Arc<[R]> {
        self.state().snapshot()
    }

    /// Compute the visible page from the current state.
    pub fn derive(&self) -> DerivedView<R> {
        self.state().derive()
    }

    /// Run `f` against the underlying view state.
    pub fn with_view<T>(&self, f: impl FnOnce(&mut CollectionView<R>) -> T) -> T {
        f(&mut self.state())
    }

    /// Unmount: drop pending searches, discard in-flight loads and clear
    /// the collection. Loads issued afterwards are discarded as well.
    pub fn close(&self) {
        self.debouncer.cancel();
        self.sequencer.close();
        self.state().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.sequencer.is_closed()
    }
}

/// Lock the view state, recovering the guard from a poisoned mutex.
fn lock<R>(state: &Mutex<CollectionView<R>>) -> MutexGuard<'_, CollectionView<R>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
