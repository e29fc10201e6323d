//! CollectionCache - fetch once, share read-only snapshots across views.
//!
//! The cache is the single writer for every collection it holds, keyed by
//! `Record::RESOURCE`. Readers get an `Arc<[R]>` snapshot they cannot
//! mutate; a refresh replaces the snapshot wholesale and bumps its version.
//!
//! ## Example
//!
//! ```ignore
//! let cache = CollectionCache::new();
//! let vehicles = cache.get_or_refresh::<Vehicle, _>(&api, &FetchQuery::bulk(100)).await?;
//! // ... after an admin action
//! cache.refresh::<Vehicle, _>(&api, &FetchQuery::bulk(100)).await?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::fetch::{FetchQuery, RemoteFetcher};
use crate::Record;

/// A value tagged with the cache version it was stored at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Read-only view of a cached collection.
pub type Snapshot<R> = Versioned<Arc<[R]>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Two record types claim the same resource key.
    #[error("cached collection '{resource}' holds a different record type")]
    TypeMismatch { resource: &'static str },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Internal stored representation of a collection.
struct StoredCollection {
    records: Box<dyn Any + Send + Sync>,
    version: u64,
}

#[derive(Default)]
struct Storage {
    collections: HashMap<&'static str, StoredCollection>,
    /// Highest write ticket applied or invalidated per resource. Writes
    /// carrying an older ticket are stale.
    watermarks: HashMap<&'static str, u64>,
    /// Ticket of the last `invalidate_all`; applies to every resource,
    /// including ones not cached yet.
    invalidated_at: u64,
}

/// Shared snapshot cache. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct CollectionCache {
    storage: Arc<RwLock<Storage>>,
    tickets: Arc<AtomicU64>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current snapshot for `R`, if cached.
    pub fn get<R: Record>(&self) -> Result<Option<Snapshot<R>>, CacheError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| CacheError::LockPoisoned("get"))?;

        match storage.collections.get(R::RESOURCE) {
            Some(stored) => Ok(Some(downcast::<R>(stored)?)),
            None => Ok(None),
        }
    }

    /// Replace the collection for `R` wholesale.
    pub fn put<R: Record>(&self, records: impl Into<Arc<[R]>>) -> Result<Snapshot<R>, CacheError> {
        let ticket = self.next_ticket();
        let records = records.into();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| CacheError::LockPoisoned("put"))?;
        Ok(store(&mut storage, ticket, records))
    }

    /// Drop the collection for `R`. Refreshes already in flight will not
    /// repopulate it. Returns true if it was cached.
    pub fn invalidate<R: Record>(&self) -> Result<bool, CacheError> {
        let ticket = self.next_ticket();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| CacheError::LockPoisoned("invalidate"))?;
        storage.watermarks.insert(R::RESOURCE, ticket);
        let existed = storage.collections.remove(R::RESOURCE).is_some();
        debug!(resource = R::RESOURCE, existed, "cache invalidated");
        Ok(existed)
    }

    /// Drop every cached collection. Refreshes already in flight, for any
    /// resource, will not repopulate the cache.
    pub fn invalidate_all(&self) -> Result<(), CacheError> {
        let ticket = self.next_ticket();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| CacheError::LockPoisoned("invalidate_all"))?;
        storage.invalidated_at = ticket;
        storage.collections.clear();
        debug!(ticket, "cache invalidated for every resource");
        Ok(())
    }

    /// Fetch `query` and replace the cached collection with the result.
    ///
    /// If a newer write for `R` landed while this fetch was in flight, the
    /// result is dropped and the newer snapshot is returned instead. On
    /// failure the cached snapshot is left untouched.
    pub async fn refresh<R, F>(&self, fetcher: &F, query: &FetchQuery) -> Result<Snapshot<R>, CacheError>
    where
        R: Record,
        F: RemoteFetcher<R>,
    {
        let ticket = self.next_ticket();
        let page = fetcher.fetch_page(query).await?;
        let count = page.items.len();

        let mut storage = self
            .storage
            .write()
            .map_err(|_| CacheError::LockPoisoned("refresh"))?;

        let watermark = storage
            .watermarks
            .get(R::RESOURCE)
            .copied()
            .unwrap_or(0)
            .max(storage.invalidated_at);
        if ticket < watermark {
            debug!(resource = R::RESOURCE, ticket, watermark, "dropping stale refresh");
            return match storage.collections.get(R::RESOURCE) {
                Some(stored) => downcast::<R>(stored),
                // Invalidated after this refresh started: hand back the
                // fetched data without caching it.
                None => Ok(Versioned {
                    data: Arc::from(page.items),
                    version: 0,
                }),
            };
        }

        let snapshot = store(&mut storage, ticket, Arc::from(page.items));
        info!(resource = R::RESOURCE, count, version = snapshot.version, "cache refreshed");
        Ok(snapshot)
    }

    /// Cached snapshot for `R`, fetching it first if absent.
    pub async fn get_or_refresh<R, F>(&self, fetcher: &F, query: &FetchQuery) -> Result<Snapshot<R>, CacheError>
    where
        R: Record,
        F: RemoteFetcher<R>,
    {
        if let Some(snapshot) = self.get::<R>()? {
            return Ok(snapshot);
        }
        self.refresh(fetcher, query).await
    }
}

fn store<R: Record>(storage: &mut Storage, ticket: u64, records: Arc<[R]>) -> Snapshot<R> {
    let version = storage
        .collections
        .get(R::RESOURCE)
        .map(|s| s.version + 1)
        .unwrap_or(1);

    storage.watermarks.insert(R::RESOURCE, ticket);
    storage.collections.insert(
        R::RESOURCE,
        StoredCollection {
            records: Box::new(Arc::clone(&records)),
            version,
        },
    );

    Versioned {
        data: records,
        version,
    }
}

fn downcast<R: Record>(stored: &StoredCollection) -> Result<Snapshot<R>, CacheError> {
    let records = stored
        .records
        .downcast_ref::<Arc<[R]>>()
        .ok_or(CacheError::TypeMismatch {
            resource: R::RESOURCE,
        })?;
    Ok(Versioned {
        data: Arc::clone(records),
        version: stored.version,
    })
}
