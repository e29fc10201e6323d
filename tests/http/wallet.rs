use std::time::Duration;

use marketview::checkout::{plan_checkout, wait_for_balance, CheckoutPlan, PaymentMethod, PollPolicy, WalletSource};
use marketview::domain::AuctionStatus;
use marketview::wizard::AuctionDraft;

use crate::support::{client, seeded};

fn fast_poll(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}

#[tokio::test]
async fn top_up_flow() {
    let backend = seeded();
    let api = client(backend.clone()).await;

    let balance = api.balance().await.unwrap();
    let plan = plan_checkout(PaymentMethod::Wallet, 3_000_000.0, balance).unwrap();
    assert_eq!(plan, CheckoutPlan::TopUpRequired { shortfall: 2_000_000.0 });

    let balance = wait_for_balance(&api, 3_000_000.0, fast_poll(5)).await.unwrap();
    assert_eq!(balance, 5_000_000.0);
    assert_eq!(backend.lock().unwrap().balance_checks, 3);

    let plan = plan_checkout(PaymentMethod::Wallet, 3_000_000.0, balance).unwrap();
    assert_eq!(
        plan,
        CheckoutPlan::PayFromWallet {
            amount: 3_000_000.0,
            remaining: 2_000_000.0
        }
    );
}

#[tokio::test]
async fn polling_gives_up() {
    let api = client(seeded()).await;
    let err = wait_for_balance(&api, 9_000_000.0, fast_poll(2)).await.unwrap_err();
    assert!(err.to_string().contains("after 2 checks"));
}

#[tokio::test]
async fn submits_auction_request() {
    let api = client(seeded()).await;
    let mut draft = AuctionDraft::for_listing("listing-9");
    draft.advance().unwrap();
    draft.starting_price = 500_000_000.0;
    draft.bid_increment = 5_000_000.0;
    draft.advance().unwrap();
    draft.duration_hours = 48;
    draft.advance().unwrap();

    let input = draft.submit().unwrap();
    let created = api.create_auction_request(&input).await.unwrap().unwrap();

    assert_eq!(created.listing_id, "listing-9");
    assert_eq!(created.status, AuctionStatus::Pending);
    assert_eq!(created.duration_hours, Some(48));
}
