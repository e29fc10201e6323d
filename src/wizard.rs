//! Multi-step auction request form.
//!
//! A seller picks a listing, sets pricing, then a schedule, and reviews the
//! request before it is sent. Each step validates only its own fields so
//! the form can report errors where the seller is looking.

use reqwest::Method;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::AuctionRequest;
use crate::error::{FetchError, ValidationError};
use crate::fetch::ApiClient;
use crate::Record;

pub const MIN_DURATION_HOURS: u32 = 1;
pub const MAX_DURATION_HOURS: u32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Item,
    Pricing,
    Schedule,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Item,
        WizardStep::Pricing,
        WizardStep::Schedule,
        WizardStep::Review,
    ];

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Item => Some(WizardStep::Pricing),
            WizardStep::Pricing => Some(WizardStep::Schedule),
            WizardStep::Schedule => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Item => None,
            WizardStep::Pricing => Some(WizardStep::Item),
            WizardStep::Schedule => Some(WizardStep::Pricing),
            WizardStep::Review => Some(WizardStep::Schedule),
        }
    }
}

/// Payload for `POST /auction-requests`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRequestInput {
    pub listing_id: String,
    pub starting_price: f64,
    pub bid_increment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub duration_hours: u32,
    pub deposit_rate: f64,
}

/// In-progress auction request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionDraft {
    step: WizardStep,
    pub listing_id: String,
    pub starting_price: f64,
    pub bid_increment: f64,
    pub reserve_price: Option<f64>,
    /// `None` starts the auction as soon as it is approved.
    pub start_time: Option<OffsetDateTime>,
    pub duration_hours: u32,
    /// Share of the starting price bidders deposit to join.
    pub deposit_rate: f64,
}

impl Default for AuctionDraft {
    fn default() -> Self {
        Self {
            step: WizardStep::Item,
            listing_id: String::new(),
            starting_price: 0.0,
            bid_increment: 0.0,
            reserve_price: None,
            start_time: None,
            duration_hours: 24,
            deposit_rate: 0.1,
        }
    }
}

impl AuctionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_listing(listing_id: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Every problem with the fields owned by `step`.
    pub fn validate_step(&self, step: WizardStep) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match step {
            WizardStep::Item => {
                if self.listing_id.trim().is_empty() {
                    errors.push(ValidationError::new("listingId", "select an item to auction"));
                }
            }
            WizardStep::Pricing => {
                if !positive(self.starting_price) {
                    errors.push(ValidationError::new("startingPrice", "must be greater than zero"));
                }
                if !positive(self.bid_increment) {
                    errors.push(ValidationError::new("bidIncrement", "must be greater than zero"));
                }
                if let Some(reserve) = self.reserve_price {
                    if !reserve.is_finite() || reserve < self.starting_price {
                        errors.push(ValidationError::new(
                            "reservePrice",
                            "must not be below the starting price",
                        ));
                    }
                }
            }
            WizardStep::Schedule => {
                if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&self.duration_hours) {
                    errors.push(ValidationError::new(
                        "durationHours",
                        format!("must be between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS}"),
                    ));
                }
                if !(0.0..=1.0).contains(&self.deposit_rate) {
                    errors.push(ValidationError::new("depositRate", "must be between 0 and 1"));
                }
            }
            WizardStep::Review => {}
        }
        errors
    }

    /// Move to the next step if the current one is valid.
    pub fn advance(&mut self) -> Result<WizardStep, Vec<ValidationError>> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Validate every step and build the request payload.
    pub fn submit(&self) -> Result<AuctionRequestInput, Vec<ValidationError>> {
        let errors: Vec<ValidationError> = WizardStep::ALL
            .iter()
            .flat_map(|step| self.validate_step(*step))
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let start_time = match self.start_time {
            Some(at) => Some(at.format(&Rfc3339).map_err(|e| {
                vec![ValidationError::new("startTime", e.to_string())]
            })?),
            None => None,
        };

        Ok(AuctionRequestInput {
            listing_id: self.listing_id.trim().to_string(),
            starting_price: self.starting_price,
            bid_increment: self.bid_increment,
            reserve_price: self.reserve_price,
            start_time,
            duration_hours: self.duration_hours,
            deposit_rate: self.deposit_rate,
        })
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl ApiClient {
    /// Send a completed draft. Returns the created request when the backend
    /// echoes it.
    pub async fn create_auction_request(
        &self,
        input: &AuctionRequestInput,
    ) -> Result<Option<AuctionRequest>, FetchError> {
        let (created, _) = self
            .send_json::<AuctionRequest, _>(Method::POST, AuctionRequest::RESOURCE, input)
            .await?;
        info!(listing_id = %input.listing_id, "auction request submitted");
        Ok(created)
    }
}
