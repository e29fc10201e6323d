use serde::{Deserialize, Serialize};

use crate::Record;

/// A marketplace account as seen by admin views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "users")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub full_name: String,
    #[record(search)]
    pub email: String,
    #[record(search)]
    #[serde(default)]
    pub phone: Option<String>,
    /// "MEMBER", "STAFF" or "ADMIN".
    #[record(kind)]
    pub role: String,
    /// "ACTIVE" or "LOCKED".
    #[record(status)]
    pub status: String,
    #[serde(default)]
    pub lock_reason: Option<String>,
    #[record(date)]
    #[serde(default)]
    pub created_at: Option<String>,
}
