use reqwest::Method;

use super::{ModerationAction, MutationClient, MutationReceipt};
use crate::error::FetchError;
use crate::fetch::ApiClient;

impl MutationClient for ApiClient {
    async fn apply(
        &self,
        resource: &str,
        id: &str,
        action: &ModerationAction,
    ) -> Result<MutationReceipt, FetchError> {
        let path = format!("{resource}/{id}/{}", action.as_str());
        let (_, message) = self
            .send_json::<serde_json::Value, _>(Method::PATCH, &path, &action.body())
            .await?;
        Ok(MutationReceipt { message })
    }
}
