use serde::{Deserialize, Serialize};

use crate::{Amount, Record};

/// A traction battery pack offered for sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "batteries")]
pub struct Battery {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub title: String,
    #[record(brand, search)]
    pub brand: String,
    pub capacity_kwh: f64,
    /// Remaining state of health, 0-100.
    #[serde(default)]
    pub health_percent: Option<u32>,
    #[record(price)]
    pub price: Amount,
    /// Chemistry, e.g. "LFP" or "NMC".
    #[record(kind)]
    #[serde(default)]
    pub battery_type: Option<String>,
    #[record(status)]
    #[serde(default)]
    pub status: Option<String>,
    #[record(search)]
    #[serde(default)]
    pub seller_name: Option<String>,
    #[record(rating)]
    #[serde(default)]
    pub rating: Option<f64>,
    #[record(date)]
    #[serde(default)]
    pub created_at: Option<String>,
}
