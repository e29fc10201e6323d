extern crate self as marketview;

mod cache;
mod config;
mod error;
mod fetch;
mod predicate;
mod record;
mod view;

pub mod chat;
pub mod checkout;
pub mod domain;
pub mod moderation;
pub mod pipeline;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod wizard;

pub use cache::{CacheError, CollectionCache, Snapshot, Versioned};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::{FetchError, ValidationError, GENERIC_FAILURE_MESSAGE};
pub use fetch::{ApiClient, FetchQuery, FetchedPage, RemoteFetcher, RetryPolicy};
pub use pipeline::{DerivedView, PageCursor, SortKey};
pub use predicate::{Choice, PredicatePatch, PredicateSet, PredicateStore};
pub use record::{parse_number, parse_recency, Amount, NumericField, RecencyField, Record, TextField};
pub use view::{
    CollectionView, Debouncer, LiveView, LoadOutcome, LoadState, RequestSequencer, SourceWindow,
    Ticket,
};

// Derive macro for `Record`
pub use marketview_macros::Record;
