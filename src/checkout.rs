//! Checkout planning and wallet top-up polling.
//!
//! Wallet payments debit the buyer's balance directly; when it is short the
//! buyer tops up through an external gateway and the client polls the
//! balance until the deposit lands. MoMo payments always redirect.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{FetchError, ValidationError};
use crate::fetch::ApiClient;
use crate::record::NumericField;
use crate::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Wallet,
    Momo,
}

/// What the client should do to complete a purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutPlan {
    /// The wallet covers the total.
    PayFromWallet { amount: f64, remaining: f64 },
    /// The wallet is short by `shortfall`; a top-up must land first.
    TopUpRequired { shortfall: f64 },
    /// Hand off to the external payment gateway.
    Redirect,
}

/// Decide how to pay `total` given the buyer's wallet `balance`.
pub fn plan_checkout(method: PaymentMethod, total: f64, balance: f64) -> Result<CheckoutPlan, ValidationError> {
    if !total.is_finite() || total <= 0.0 {
        return Err(ValidationError::new("total", "must be greater than zero"));
    }

    match method {
        PaymentMethod::Momo => Ok(CheckoutPlan::Redirect),
        PaymentMethod::Wallet => {
            let balance = if balance.is_finite() { balance.max(0.0) } else { 0.0 };
            if balance >= total {
                Ok(CheckoutPlan::PayFromWallet {
                    amount: total,
                    remaining: balance - total,
                })
            } else {
                Ok(CheckoutPlan::TopUpRequired {
                    shortfall: total - balance,
                })
            }
        }
    }
}

/// Anything that can report the current wallet balance.
pub trait WalletSource: Send + Sync {
    fn balance(&self) -> impl Future<Output = Result<f64, FetchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct WalletBalance {
    #[serde(default)]
    balance: Amount,
}

impl WalletSource for ApiClient {
    async fn balance(&self) -> Result<f64, FetchError> {
        let no_query: [(&str, &str); 0] = [];
        let wallet = self
            .get_data::<WalletBalance, _>("wallet/balance", &no_query)
            .await?;
        Ok(wallet.map(|w| w.balance.number()).unwrap_or(0.0))
    }
}

/// Backoff schedule for balance polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl PollPolicy {
    /// Delay after the `attempt`-th poll (1-based): doubles, capped at `max_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PollError {
    #[error("balance did not reach {target} after {attempts} checks")]
    TimedOut {
        target: f64,
        attempts: u32,
        last_balance: Option<f64>,
        last_error: Option<FetchError>,
    },
}

/// Poll `source` until the balance reaches `target`.
///
/// Fetch failures count as attempts and polling continues; the last one is
/// reported if the attempts run out.
pub async fn wait_for_balance<S>(source: &S, target: f64, policy: PollPolicy) -> Result<f64, PollError>
where
    S: WalletSource,
{
    let mut last_balance = None;
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match source.balance().await {
            Ok(balance) if balance >= target => {
                info!(attempt, balance, target, "wallet balance reached target");
                return Ok(balance);
            }
            Ok(balance) => {
                debug!(attempt, balance, target, "wallet balance below target");
                last_balance = Some(balance);
            }
            Err(err) => {
                warn!(attempt, error = %err, "wallet balance check failed");
                last_error = Some(err);
            }
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay(attempt)).await;
        }
    }

    Err(PollError::TimedOut {
        target,
        attempts: policy.max_attempts,
        last_balance,
        last_error,
    })
}
