#![allow(dead_code)]
use std::{net::SocketAddr, sync::Arc};

use timeoff_backend::{api, dates::ShiftPolicy, store::MemoryDocumentStore, AppState};

/// Spin up the real Axum router on a random port over a fresh in-memory
/// store, returning its address. Every test gets its own store, so no
/// cleanup is needed.
pub async fn setup_test_app() -> SocketAddr {
    setup_test_app_with_policy(ShiftPolicy::default()).await
}

pub async fn setup_test_app_with_policy(policy: ShiftPolicy) -> SocketAddr {
    let store = Arc::new(MemoryDocumentStore::new());
    let app = api::router(AppState::new(store, policy));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Build a reqwest client (reusable across requests in a test).
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}/api{}", addr, path)
}

pub fn employee_form(email: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", "Test User".to_string()),
        ("position", "Analyst".to_string()),
        ("email", email.to_string()),
        ("salary", "4200".to_string()),
        ("phone", "+1 555 0100".to_string()),
        ("status", "true".to_string()),
    ]
}

/// Create an employee through the HTTP API. Returns its id.
pub async fn create_employee(addr: SocketAddr, email: &str) -> String {
    let resp = http_client()
        .post(url(addr, "/employees/create"))
        .form(&employee_form(email))
        .send()
        .await
        .expect("Create employee request failed");

    assert_eq!(resp.status(), 201, "Employee create should return 201");
    created_id(resp).await
}

/// Create a request category through the HTTP API. Returns its id.
pub async fn create_category(addr: SocketAddr, name: &str) -> String {
    let resp = http_client()
        .post(url(addr, "/requestCategories/create"))
        .form(&[("name", name)])
        .send()
        .await
        .expect("Create category request failed");

    assert_eq!(resp.status(), 201, "Category create should return 201");
    created_id(resp).await
}

pub async fn created_id(resp: reqwest::Response) -> String {
    let body: serde_json::Value = resp.json().await.expect("Failed to parse create response");
    body["id"]
        .as_str()
        .expect("Response should contain id")
        .to_string()
}
