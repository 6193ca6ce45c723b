//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per bridge endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.get("/").await
    }

    /// GET /health
    pub async fn health(&self) -> Response {
        self.get("/health").await
    }

    /// GET /services
    pub async fn services(&self) -> Response {
        self.get("/services").await
    }

    /// GET /mcp/{service}/tools
    pub async fn tools(&self, service: &str) -> Response {
        self.get(&format!("/mcp/{}/tools", service)).await
    }

    /// POST /mcp/postgresql with a `{method, params}` envelope
    pub async fn post_postgresql(&self, method: &str, params: Value) -> Response {
        self.post_json("/mcp/postgresql", &json!({"method": method, "params": params}))
            .await
    }

    /// POST /mcp/mongodb with a `{method, params}` envelope
    pub async fn post_mongodb(&self, method: &str, params: Value) -> Response {
        self.post_json("/mcp/mongodb", &json!({"method": method, "params": params}))
            .await
    }

    /// POST an arbitrary JSON body
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST a raw body with a JSON content type, for malformed payloads
    pub async fn post_raw(&self, path: &str, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("POST request failed")
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }
}
