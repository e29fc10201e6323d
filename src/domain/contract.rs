use serde::{Deserialize, Serialize};

use crate::{Amount, Record};

/// A sale contract between buyer and seller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "contracts")]
pub struct Contract {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub contract_number: String,
    #[record(search)]
    pub buyer_name: String,
    #[record(search)]
    pub seller_name: String,
    #[record(price)]
    pub total_amount: Amount,
    /// "DRAFT", "SIGNED", "COMPLETED", "CANCELLED".
    #[record(status)]
    pub status: String,
    #[record(date)]
    #[serde(default)]
    pub signed_at: Option<String>,
}
