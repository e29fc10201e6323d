use serde::{Deserialize, Serialize};

use crate::{Amount, Record, TextField};

/// Review state of an auction request. Transitions happen server-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Ended,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Pending => "PENDING",
            AuctionStatus::Approved => "APPROVED",
            AuctionStatus::Rejected => "REJECTED",
            AuctionStatus::Active => "ACTIVE",
            AuctionStatus::Ended => "ENDED",
        }
    }
}

impl TextField for AuctionStatus {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// A seller's request to auction one of their listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(resource = "auction-requests")]
pub struct AuctionRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub listing_id: String,
    #[record(name, search)]
    pub title: String,
    #[record(search)]
    #[serde(default)]
    pub seller_name: Option<String>,
    #[record(price)]
    pub starting_price: Amount,
    #[serde(default)]
    pub reserve_price: Option<Amount>,
    #[record(status)]
    pub status: AuctionStatus,
    #[record(date)]
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}
