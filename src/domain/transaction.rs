use serde::{Deserialize, Serialize};

use crate::{Amount, Record};

/// A wallet ledger entry. The ledger itself is owned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "transactions")]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: String,
    /// "DEPOSIT", "WITHDRAW", "PAYMENT", "REFUND", ...
    #[record(kind)]
    pub transaction_type: String,
    #[record(price)]
    pub amount: Amount,
    #[record(status)]
    pub status: String,
    #[record(name, search)]
    #[serde(default)]
    pub description: Option<String>,
    #[record(search)]
    #[serde(default)]
    pub user_name: Option<String>,
    #[record(date)]
    pub created_at: String,
}
