//! Vehicle fixtures and a scripted fetcher with per-call latency.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use marketview::domain::Vehicle;
use marketview::{Amount, FetchError, FetchQuery, FetchedPage, RemoteFetcher};

pub fn vehicle(id: &str, title: &str, brand: &str, price: f64) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        title: title.to_string(),
        brand: brand.to_string(),
        model: String::new(),
        year: 2023,
        price: Amount::from(price),
        mileage_km: None,
        battery_capacity_kwh: None,
        vehicle_type: Some("car".to_string()),
        status: Some("ACTIVE".to_string()),
        seller_name: None,
        rating: None,
        is_verified: false,
    }
}

/// `count` vehicles priced 0, 1, 2, ... with ids `v00`, `v01`, ...
pub fn numbered(count: usize) -> Vec<Vehicle> {
    (0..count)
        .map(|i| vehicle(&format!("v{i:02}"), &format!("Vehicle {i:02}"), "VinFast", i as f64))
        .collect()
}

pub fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
    vehicles.iter().map(|v| v.id.as_str()).collect()
}

type Reply = (Duration, Result<FetchedPage<Vehicle>, FetchError>);

/// Answers each call with the next scripted reply after its delay.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: Mutex<VecDeque<Reply>>,
    pub queries: Mutex<Vec<FetchQuery>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, delay_ms: u64, items: Vec<Vehicle>) -> Self {
        self.push(delay_ms, Ok(FetchedPage::new(items)))
    }

    pub fn err(self, delay_ms: u64, error: FetchError) -> Self {
        self.push(delay_ms, Err(error))
    }

    fn push(self, delay_ms: u64, reply: Result<FetchedPage<Vehicle>, FetchError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(delay_ms), reply));
        self
    }
}

impl RemoteFetcher<Vehicle> for ScriptedFetcher {
    async fn fetch_page(&self, query: &FetchQuery) -> Result<FetchedPage<Vehicle>, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let (delay, reply) = next.unwrap_or((Duration::ZERO, Ok(FetchedPage::new(Vec::new()))));
        tokio::time::sleep(delay).await;
        reply
    }
}
