//! Moderation - admin and staff actions on marketplace records.
//!
//! An action is validated locally, sent to the backend, and on success the
//! affected collection is fetched again so the view reflects the server.
//!
//! ```text
//! PATCH /<resource>/<id>/<action>
//! { "reason": "..." }        // Reject and Lock only
//! ```

mod http;

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheError, CollectionCache, Snapshot};
use crate::error::{FetchError, ValidationError};
use crate::fetch::{FetchQuery, RemoteFetcher};
use crate::view::LiveView;
use crate::Record;

/// A state change requested by a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Verify,
    Unverify,
    Approve,
    Reject { reason: String },
    Lock { reason: String },
    Unlock,
}

impl ModerationAction {
    /// Path segment appended to `/<resource>/<id>/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Verify => "verify",
            ModerationAction::Unverify => "unverify",
            ModerationAction::Approve => "approve",
            ModerationAction::Reject { .. } => "reject",
            ModerationAction::Lock { .. } => "lock",
            ModerationAction::Unlock => "unlock",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ModerationAction::Reject { reason } | ModerationAction::Lock { reason } => {
                Some(reason.as_str())
            }
            _ => None,
        }
    }

    /// Reject and Lock need a non-blank reason.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.reason() {
            Some(reason) if reason.trim().is_empty() => Err(ValidationError::new(
                "reason",
                format!("a reason is required to {}", self.as_str()),
            )),
            _ => Ok(()),
        }
    }

    pub(crate) fn body(&self) -> ActionBody<'_> {
        ActionBody {
            reason: self.reason().map(str::trim),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ActionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

/// Server acknowledgement of a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationReceipt {
    pub message: Option<String>,
}

/// Sends moderation actions to the backend.
pub trait MutationClient: Send + Sync {
    fn apply(
        &self,
        resource: &str,
        id: &str,
        action: &ModerationAction,
    ) -> impl Future<Output = Result<MutationReceipt, FetchError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("invalid action: {0}")]
    Validation(#[from] ValidationError),
    /// The backend rejected the action. Nothing changed.
    #[error("action failed: {0}")]
    Rejected(#[from] FetchError),
    /// The action succeeded but reloading the view failed.
    #[error("action applied but reload failed: {source}")]
    Reload {
        receipt: MutationReceipt,
        #[source]
        source: FetchError,
    },
    /// The action succeeded but refreshing the cached collection failed.
    #[error("action applied but refresh failed: {source}")]
    Refetch {
        receipt: MutationReceipt,
        #[source]
        source: CacheError,
    },
}

async fn submit<R, C>(client: &C, id: &str, action: &ModerationAction) -> Result<MutationReceipt, ModerationError>
where
    R: Record,
    C: MutationClient,
{
    action.validate()?;
    if id.trim().is_empty() {
        return Err(ValidationError::new("id", "record id is required").into());
    }

    match client.apply(R::RESOURCE, id, action).await {
        Ok(receipt) => {
            info!(resource = R::RESOURCE, id, action = action.as_str(), "moderation applied");
            Ok(receipt)
        }
        Err(err) => {
            warn!(resource = R::RESOURCE, id, action = action.as_str(), error = %err, "moderation rejected");
            Err(err.into())
        }
    }
}

/// Apply `action` to record `id`, then reload `view` with its last query.
pub async fn moderate<R, F, C>(
    view: &LiveView<R, F>,
    client: &C,
    id: &str,
    action: &ModerationAction,
) -> Result<MutationReceipt, ModerationError>
where
    R: Record,
    F: RemoteFetcher<R>,
    C: MutationClient,
{
    let receipt = submit::<R, C>(client, id, action).await?;
    match view.reload().await {
        Ok(_) => Ok(receipt),
        Err(source) => Err(ModerationError::Reload { receipt, source }),
    }
}

/// Apply `action` to record `id`, then refresh the cached collection.
pub async fn moderate_cached<R, F, C>(
    cache: &CollectionCache,
    fetcher: &F,
    client: &C,
    id: &str,
    action: &ModerationAction,
    query: &FetchQuery,
) -> Result<(MutationReceipt, Snapshot<R>), ModerationError>
where
    R: Record,
    F: RemoteFetcher<R>,
    C: MutationClient,
{
    let receipt = submit::<R, C>(client, id, action).await?;
    match cache.refresh::<R, F>(fetcher, query).await {
        Ok(snapshot) => Ok((receipt, snapshot)),
        Err(source) => Err(ModerationError::Refetch { receipt, source }),
    }
}
