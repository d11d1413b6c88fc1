#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use invention_service::config::InventionConfig;
use invention_service::services::providers::mock::MockTextProvider;
use invention_service::services::{InventionService, TextProvider};
use invention_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration for tests: random port, no OTLP, crate `static/` directory.
pub fn test_config(api_key: &str) -> InventionConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ENVIRONMENT", "test".to_string()),
        ("GOOGLE_API_KEY", api_key.to_string()),
    ]);
    let common = CoreConfig {
        port: 0,
        log_level: "debug".to_string(),
    };
    InventionConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn test_router(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState {
        config: test_config("test-api-key"),
        invention: InventionService::new(provider),
    })
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("Body is not JSON")
}

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockTextProvider>,
}

impl TestApp {
    /// Run the full application on a random port with `provider` behind it.
    pub async fn spawn(provider: MockTextProvider) -> Self {
        let provider = Arc::new(provider);
        let app = Application::build_with_provider(test_config("test-api-key"), provider.clone())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, provider }
    }
}
