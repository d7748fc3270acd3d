//! HTTP surface checks: routing, serialization, and error mapping,
//! exercised against the real router with an in-process database.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use backflow_api::{config::AppConfig, AppState};
use common::TestApp;

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 18080,
        environment: "test".into(),
        log_level: "warn".into(),
        log_json: false,
        auto_migrate: false,
        event_buffer: 64,
    }
}

fn router_for(app: &TestApp) -> Router {
    let state = AppState {
        db: app.db.clone(),
        config: test_config(),
        event_sender: app.event_sender.clone(),
        services: app.services.clone(),
    };
    backflow_api::app_router(state)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = TestApp::new().await;
    let router = router_for(&app);

    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn purchase_order_round_trip_over_http() {
    let app = TestApp::new().await;
    let router = router_for(&app);

    let payload = json!({
        "company_id": app.company_id,
        "supplier_id": Uuid::new_v4(),
        "currency": "USD",
        "lines": [
            {
                "description": "Laptops",
                "quantity": "4",
                "unit_price": "1200",
                "discount_pct": "0",
                "tax_pct": "0"
            }
        ]
    });
    let (status, body) = send(&router, Method::POST, "/api/v1/purchase-orders", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["total_amount"], "4800");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/v1/purchase-orders/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lines"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/v1/purchase-orders/{id}/submit"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
}

#[tokio::test]
async fn missing_documents_map_to_404() {
    let app = TestApp::new().await;
    let router = router_for(&app);

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/v1/invoices/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn illegal_transitions_map_to_422() {
    let app = TestApp::new().await;
    let router = router_for(&app);

    let payload = json!({
        "company_id": app.company_id,
        "bank_account_id": app.seed_bank_account("Ops", rust_decimal_macros::dec!(0)).await,
        "amount": "100",
        "transacted_at": chrono::Utc::now(),
    });
    let (status, body) = send(&router, Method::POST, "/api/v1/bank-transactions", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Draft straight to posted is refused by the state machine.
    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/v1/bank-transactions/{id}/post"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid state transition"));
    assert_eq!(body["details"], "current_state=draft requested_state=posted");
}
