use marketview::domain::Vehicle;
use marketview::moderation::{moderate, moderate_cached, ModerationAction, ModerationError};
use marketview::{ClientConfig, CollectionCache, FetchQuery, LiveView};
use serde_json::json;

use crate::support::{client, seeded};

#[tokio::test]
async fn verify_then_refetch() {
    let backend = seeded();
    let api = client(backend.clone()).await;
    let view: LiveView<Vehicle, _> = LiveView::new(api.clone(), &ClientConfig::default());
    view.load(FetchQuery::bulk(100)).await.unwrap();
    assert!(!view.records()[0].is_verified);

    let receipt = moderate(&view, &api, "v1", &ModerationAction::Verify).await.unwrap();

    assert_eq!(receipt.message.as_deref(), Some("Vehicle verify done"));
    assert!(view.records()[0].is_verified);
    let backend = backend.lock().unwrap();
    assert_eq!(backend.vehicle_fetches, 2);
    assert_eq!(backend.mutations, vec![("v1".to_string(), "verify".to_string(), json!({}))]);
}

#[tokio::test]
async fn reject_sends_reason() {
    let backend = seeded();
    let api = client(backend.clone()).await;
    let cache = CollectionCache::new();
    let query = FetchQuery::bulk(100);

    let action = ModerationAction::Reject {
        reason: "Photos do not match the listing".into(),
    };
    let (_, snapshot) = moderate_cached::<Vehicle, _, _>(&cache, &api, &api, "v3", &action, &query)
        .await
        .unwrap();

    let rejected = snapshot.data.iter().find(|v| v.id == "v3").unwrap();
    assert_eq!(rejected.status.as_deref(), Some("REJECTED"));
    let backend = backend.lock().unwrap();
    assert_eq!(backend.mutations[0].2, json!({ "reason": "Photos do not match the listing" }));
}

#[tokio::test]
async fn lock_without_reason_never_reaches_server() {
    let backend = seeded();
    let api = client(backend.clone()).await;
    let view: LiveView<Vehicle, _> = LiveView::new(api.clone(), &ClientConfig::default());

    let err = moderate(&view, &api, "v1", &ModerationAction::Lock { reason: " ".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, ModerationError::Validation(_)));
    assert!(backend.lock().unwrap().mutations.is_empty());
}

#[tokio::test]
async fn unknown_record_is_rejected_without_refetch() {
    let backend = seeded();
    let api = client(backend.clone()).await;
    let view: LiveView<Vehicle, _> = LiveView::new(api.clone(), &ClientConfig::default());

    let err = moderate(&view, &api, "missing", &ModerationAction::Approve)
        .await
        .unwrap_err();

    match err {
        ModerationError::Rejected(fetch) => assert_eq!(fetch.user_message(), "Vehicle missing not found"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.lock().unwrap().vehicle_fetches, 0);
}
