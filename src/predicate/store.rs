//! PredicateStore - owns a view's predicate set and tracks its changes.

use super::{PredicatePatch, PredicateSet};

/// Holds the current predicate set for one view.
///
/// Every effective change bumps `generation`, which lets the view detect
/// "predicates changed since the cursor was last reset".
#[derive(Debug, Clone, Default)]
pub struct PredicateStore {
    current: PredicateSet,
    generation: u64,
}

impl PredicateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(current: PredicateSet) -> Self {
        Self {
            current,
            generation: 0,
        }
    }

    pub fn get(&self) -> &PredicateSet {
        &self.current
    }

    /// Apply a partial update. Returns true if the predicate set changed.
    pub fn set(&mut self, patch: PredicatePatch) -> bool {
        let changed = self.current.apply(patch);
        if changed {
            self.generation += 1;
        }
        changed
    }

    /// Replace the whole set. Returns true if it differs from the current one.
    pub fn replace(&mut self, next: PredicateSet) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        self.generation += 1;
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
