//! Remote fetching - the only asynchronous stage of a collection view.
//!
//! A `RemoteFetcher` turns a `FetchQuery` into one page of records. The
//! HTTP implementation lives in `ApiClient`; tests and demos plug in their
//! own fetchers.
//!
//! ## Wire format
//!
//! ```text
//! GET /<resource>?page=1&limit=12&status=ACTIVE
//! { "success": true,
//!   "data": { "items": [...], "page": 1, "totalPages": 4, "totalResults": 41 },
//!   "message": null }
//! ```

mod http;
mod retry;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::Record;

pub use http::ApiClient;
pub use retry::RetryPolicy;

/// Optional pagination and server-side filters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl FetchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// One server page.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            limit: Some(limit),
            status: None,
        }
    }

    /// A capped bulk request for client-side filtering.
    pub fn bulk(limit: u32) -> Self {
        Self::page(1, limit)
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        let status = status.into();
        self.status = if status.trim().is_empty() || status.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(status)
        };
        self
    }
}

/// One page of records as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedPage<R> {
    #[serde(alias = "results")]
    pub items: Vec<R>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<R> FetchedPage<R> {
    pub fn new(items: Vec<R>) -> Self {
        let total_results = items.len() as u64;
        Self {
            items,
            page: 1,
            total_pages: 1,
            total_results,
        }
    }

    /// True when the backend holds more records than this page carries, so
    /// client-side filtering over it only sees part of the dataset.
    pub fn is_truncated(&self) -> bool {
        self.total_results > self.items.len() as u64
    }
}

/// Source of record pages for one record type.
pub trait RemoteFetcher<R: Record>: Send + Sync {
    fn fetch_page(
        &self,
        query: &FetchQuery,
    ) -> impl Future<Output = Result<FetchedPage<R>, FetchError>> + Send;
}

/// `{ success, data?, message? }` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a response body: non-2xx and `success: false` are server errors.
///
/// Returns the `data` payload (which may be absent) and the optional message.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<(Option<T>, Option<String>), FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(FetchError::Server { status, message });
    }

    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|e| FetchError::server(status, format!("malformed response: {e}")))?;

    if !envelope.success {
        return Err(FetchError::Server {
            status,
            message: envelope.message,
        });
    }

    Ok((envelope.data, envelope.message))
}

/// Decode a page response.
pub(crate) fn decode_page<R: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<FetchedPage<R>, FetchError> {
    let (data, _) = decode_envelope::<FetchedPage<R>>(status, body)?;
    data.ok_or_else(|| FetchError::server(status, "malformed response: missing data"))
}
