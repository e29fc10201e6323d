use serde::{Deserialize, Serialize};

use crate::{Amount, Record, TextField};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Vehicle,
    Battery,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Vehicle => "VEHICLE",
            ProductType::Battery => "BATTERY",
        }
    }
}

impl TextField for ProductType {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Moderation state of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Pending,
    Active,
    Sold,
    Rejected,
    Hidden,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "PENDING",
            ListingStatus::Active => "ACTIVE",
            ListingStatus::Sold => "SOLD",
            ListingStatus::Rejected => "REJECTED",
            ListingStatus::Hidden => "HIDDEN",
        }
    }
}

impl TextField for ListingStatus {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// A sale listing wrapping either a vehicle or a battery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "listings")]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: String,
    #[record(name, search)]
    pub title: String,
    #[record(kind)]
    pub product_type: ProductType,
    #[record(brand, search)]
    #[serde(default)]
    pub brand: Option<String>,
    #[record(price)]
    pub price: Amount,
    #[record(status)]
    pub status: ListingStatus,
    #[record(search)]
    #[serde(default)]
    pub seller_name: Option<String>,
    #[record(date)]
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}
