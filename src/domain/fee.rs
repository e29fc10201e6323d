use serde::{Deserialize, Serialize};

use crate::{Amount, Record};

/// A configured platform fee. Fee computation stays server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "fees")]
pub struct Fee {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub name: String,
    /// "LISTING", "COMMISSION", "AUCTION_DEPOSIT", ...
    #[record(kind)]
    pub fee_type: String,
    #[record(price)]
    #[serde(default)]
    pub amount: Amount,
    /// Percentage rate in [0, 1] for rate-based fees.
    #[serde(default)]
    pub rate: Option<f64>,
    #[record(status)]
    pub status: String,
    #[record(date)]
    #[serde(default)]
    pub updated_at: Option<String>,
}
