use marketview::domain::{Battery, User, Vehicle};
use marketview::{
    ClientConfig, CollectionCache, FetchError, FetchQuery, FetchedPage, LiveView, LoadState,
    RemoteFetcher, RetryPolicy, SortKey,
};

use crate::support::{client, seeded, unreachable_client};

#[tokio::test]
async fn fetches_and_decodes_a_page() {
    let api = client(seeded()).await;
    let page: FetchedPage<Vehicle> = api.fetch_page(&FetchQuery::bulk(100)).await.unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total_results, 3);
    assert!(!page.is_truncated());
    assert_eq!(page.items[0].id, "v1");
}

#[tokio::test]
async fn sends_status_and_limit() {
    let api = client(seeded()).await;
    let page: FetchedPage<Vehicle> = api
        .fetch_page(&FetchQuery::page(1, 1).with_status("ACTIVE"))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_results, 2);
    assert!(page.is_truncated());
}

#[tokio::test]
async fn non_2xx_is_a_server_error_with_message() {
    let api = client(seeded()).await;
    let err = RemoteFetcher::<Battery>::fetch_page(&api, &FetchQuery::new())
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::server(503, "Battery service is down"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn success_false_is_a_server_error() {
    let api = client(seeded()).await;
    let err = RemoteFetcher::<User>::fetch_page(&api, &FetchQuery::new())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Admin role required");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = unreachable_client(RetryPolicy::attempts(2, 10)).await;
    let err = RemoteFetcher::<Vehicle>::fetch_page(&api, &FetchQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn live_view_over_http() {
    let api = client(seeded()).await;
    let view: LiveView<Vehicle, _> = LiveView::new(api, &ClientConfig::default());

    view.load(FetchQuery::bulk(100)).await.unwrap();
    view.set_sort(SortKey::PriceHigh);
    let page = view.derive();

    let ids: Vec<&str> = page.items.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "v2", "v3"]);
    assert_eq!(view.load_state(), LoadState::Ready);
}

#[tokio::test]
async fn cache_fetches_once_until_refreshed() {
    let backend = seeded();
    let api = client(backend.clone()).await;
    let cache = CollectionCache::new();
    let query = FetchQuery::bulk(100);

    let first = cache.get_or_refresh::<Vehicle, _>(&api, &query).await.unwrap();
    let second = cache.get_or_refresh::<Vehicle, _>(&api, &query).await.unwrap();
    assert_eq!(first.version, 1);
    assert!(std::sync::Arc::ptr_eq(&first.data, &second.data));
    assert_eq!(backend.lock().unwrap().vehicle_fetches, 1);

    let refreshed = cache.refresh::<Vehicle, _>(&api, &query).await.unwrap();
    assert_eq!(refreshed.version, 2);
    assert_eq!(backend.lock().unwrap().vehicle_fetches, 2);
}

#[tokio::test]
async fn failed_refresh_keeps_cached_snapshot() {
    let api = client(seeded()).await;
    let cache = CollectionCache::new();
    cache.put::<Battery>(Vec::new()).unwrap();

    let err = cache
        .refresh::<Battery, _>(&api, &FetchQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, marketview::CacheError::Fetch(_)));
    assert_eq!(cache.get::<Battery>().unwrap().unwrap().version, 1);
}
