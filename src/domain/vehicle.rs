use serde::{Deserialize, Serialize};

use crate::{Amount, Record};

/// An electric vehicle offered for sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "vehicles")]
pub struct Vehicle {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub title: String,
    #[record(brand, search)]
    pub brand: String,
    #[record(search)]
    #[serde(default)]
    pub model: String,
    #[record(date)]
    pub year: i32,
    #[record(price)]
    pub price: Amount,
    #[serde(default)]
    pub mileage_km: Option<u32>,
    #[serde(default)]
    pub battery_capacity_kwh: Option<f64>,
    /// "car", "motorbike", "scooter", ...
    #[record(kind)]
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[record(status)]
    #[serde(default)]
    pub status: Option<String>,
    #[record(search)]
    #[serde(default)]
    pub seller_name: Option<String>,
    #[record(rating)]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
}
