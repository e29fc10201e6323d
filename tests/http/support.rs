//! In-memory marketplace backend served by axum.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use marketview::{ApiClient, ClientConfig, RetryPolicy};

#[derive(Default)]
pub struct Backend {
    pub vehicles: Vec<Value>,
    pub mutations: Vec<(String, String, Value)>,
    pub balance_checks: u32,
    pub vehicle_fetches: u32,
}

pub type Shared = Arc<Mutex<Backend>>;

pub fn seeded() -> Shared {
    let vehicles = vec![
        json!({ "_id": "v1", "title": "VinFast VF 8", "brand": "VinFast", "year": 2023,
                "price": "1,050,000,000", "status": "ACTIVE", "isVerified": false }),
        json!({ "_id": "v2", "title": "Tesla Model 3", "brand": "Tesla", "year": 2022,
                "price": 980000000, "status": "ACTIVE", "isVerified": true }),
        json!({ "_id": "v3", "title": "Nissan Leaf", "brand": "Nissan", "year": 2019,
                "price": 420000000, "status": "SOLD", "isVerified": false }),
    ];
    Arc::new(Mutex::new(Backend {
        vehicles,
        ..Backend::default()
    }))
}

async fn list_vehicles(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut backend = backend.lock().unwrap();
    backend.vehicle_fetches += 1;

    let items: Vec<Value> = backend
        .vehicles
        .iter()
        .filter(|v| match params.get("status") {
            Some(status) => v["status"] == status.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(items.len());
    let total = items.len();
    let page: Vec<Value> = items.into_iter().take(limit).collect();

    Json(json!({
        "success": true,
        "data": { "items": page, "page": 1, "totalPages": 1, "totalResults": total }
    }))
}

async fn list_batteries() -> (StatusCode, Json<Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "success": false, "message": "Battery service is down" })),
    )
}

async fn list_users() -> Json<Value> {
    Json(json!({ "success": false, "message": "Admin role required" }))
}

async fn moderate_vehicle(
    State(backend): State<Shared>,
    Path((id, action)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut backend = backend.lock().unwrap();
    let Some(vehicle) = backend.vehicles.iter_mut().find(|v| v["_id"] == id.as_str()) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": format!("Vehicle {id} not found") })),
        );
    };
    match action.as_str() {
        "verify" => vehicle["isVerified"] = json!(true),
        "unverify" => vehicle["isVerified"] = json!(false),
        "reject" => vehicle["status"] = json!("REJECTED"),
        _ => {}
    }
    backend.mutations.push((id, action.clone(), body));
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": format!("Vehicle {action} done") })),
    )
}

async fn wallet_balance(State(backend): State<Shared>) -> Json<Value> {
    let mut backend = backend.lock().unwrap();
    backend.balance_checks += 1;
    // The top-up lands on the third check.
    let balance = if backend.balance_checks >= 3 { 5_000_000 } else { 1_000_000 };
    Json(json!({ "success": true, "data": { "balance": balance } }))
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let question = body["message"].as_str().unwrap_or_default();
    let reply = if question.contains("VinFast") {
        "Try the [VinFast VF 8](/vehicles/v1) or browse /auctions/a7."
    } else {
        "I can help you find vehicles and batteries."
    };
    Json(json!({ "success": true, "data": { "reply": reply } }))
}

async fn create_auction_request(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "_id": "ar1",
            "listingId": body["listingId"],
            "title": "VinFast VF 8",
            "startingPrice": body["startingPrice"],
            "status": "PENDING",
            "durationHours": body["durationHours"]
        }
    }))
}

pub fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/:id/:action", patch(moderate_vehicle))
        .route("/api/batteries", get(list_batteries))
        .route("/api/users", get(list_users))
        .route("/api/wallet/balance", get(wallet_balance))
        .route("/api/chat", post(chat))
        .route("/api/auction-requests", post(create_auction_request))
        .with_state(backend)
}

/// Bind to port 0 and return the API base URL.
pub async fn start_server(backend: Shared) -> String {
    let app = router(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub async fn client(backend: Shared) -> ApiClient {
    let base = start_server(backend).await;
    ApiClient::new(ClientConfig::new(base).unwrap()).unwrap()
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_client(retry: RetryPolicy) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ClientConfig::new(format!("http://{addr}/api")).unwrap().with_retry(retry);
    ApiClient::new(config).unwrap()
}
