//! HTTP transport for the marketplace REST API, built on reqwest.
//!
//! ## Example
//!
//! ```ignore
//! use marketview::{ApiClient, ClientConfig, FetchQuery, RemoteFetcher};
//! use marketview::domain::Vehicle;
//!
//! let api = ApiClient::new(ClientConfig::from_env()?)?;
//! let page: FetchedPage<Vehicle> = api.fetch_page(&FetchQuery::page(1, 12)).await?;
//! ```

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{decode_envelope, decode_page, FetchQuery, FetchedPage, RemoteFetcher};
use crate::config::{ClientConfig, ConfigError};
use crate::error::FetchError;
use crate::Record;

/// Shared HTTP client for fetches, mutations, wallet and chat calls.
///
/// Cheap to clone: reqwest's `Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Use a preconfigured reqwest client (custom TLS, proxies, auth headers).
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the request built by `build`, retrying network failures per the
    /// configured `RetryPolicy`. Returns the status code and raw body.
    async fn execute<B>(&self, build: B) -> Result<(u16, Vec<u8>), FetchError>
    where
        B: Fn() -> RequestBuilder + Send + Sync,
    {
        let policy = self.config.retry;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response
                        .bytes()
                        .await
                        .map_err(|e| FetchError::Network(e.to_string()))?;
                    return Ok((status, body.to_vec()));
                }
                Err(e) => {
                    if !policy.should_retry(attempt) {
                        warn!(attempt, error = %e, "request failed");
                        return Err(FetchError::Network(e.to_string()));
                    }
                    let delay = policy.backoff(attempt);
                    warn!(attempt, ?delay, error = %e, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// GET a `{ success, data }` endpoint and decode `data`.
    pub(crate) async fn get_data<T, Q>(&self, path: &str, query: &Q) -> Result<Option<T>, FetchError>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync + ?Sized,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        let (status, body) = self
            .execute(|| self.client.get(&url).query(query))
            .await?;
        decode_envelope::<T>(status, &body).map(|(data, _)| data)
    }

    /// Send a JSON body and decode the `{ success, data?, message? }` reply.
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(Option<T>, Option<String>), FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.config.endpoint(path);
        debug!(%url, %method, "sending");
        let (status, reply) = self
            .execute(|| self.client.request(method.clone(), &url).json(body))
            .await?;
        decode_envelope::<T>(status, &reply)
    }
}

impl<R: Record> RemoteFetcher<R> for ApiClient {
    async fn fetch_page(&self, query: &FetchQuery) -> Result<FetchedPage<R>, FetchError> {
        let url = self.config.endpoint(R::RESOURCE);
        debug!(resource = R::RESOURCE, ?query, "fetching page");
        let (status, body) = self
            .execute(|| self.client.get(&url).query(query))
            .await?;
        let page = decode_page::<R>(status, &body);
        if let Err(err) = &page {
            warn!(resource = R::RESOURCE, error = %err, "fetch rejected");
        }
        page
    }
}
