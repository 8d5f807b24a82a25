//! Mock Data Provider
//!
//! Canned JSON per path for tests. Unknown paths answer 404.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DataProvider, Endpoint};
use crate::error::{ApiError, Result};

#[derive(Clone, Debug)]
enum Canned {
    Json(serde_json::Value),
    Status(u16),
    Network,
}

/// Mock provider keyed by endpoint path (query ignored)
#[derive(Default)]
pub struct MockDataProvider {
    routes: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<String>>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(self, path: &str, canned: Canned) -> Self {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert(path.to_string(), canned);
        }
        self
    }

    /// Answer `path` with a JSON body
    pub fn with_json(self, path: &str, body: serde_json::Value) -> Self {
        self.route(path, Canned::Json(body))
    }

    /// Answer `path` with an error status
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.route(path, Canned::Status(status))
    }

    /// Fail `path` as if the connection dropped
    pub fn with_network_error(self, path: &str) -> Self {
        self.route(path, Canned::Network)
    }

    /// Every request so far, as path plus query
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn get_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(endpoint.path_and_query());
        }
        let canned = self
            .routes
            .lock()
            .ok()
            .and_then(|r| r.get(&endpoint.path).cloned());

        match canned {
            Some(Canned::Json(body)) => Ok(body),
            Some(Canned::Status(status)) => Err(ApiError::from_status(status)),
            Some(Canned::Network) => Err(ApiError::Network("connection reset".into())),
            None => Err(ApiError::NotFound(404)),
        }
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vybe_core::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_routes_and_calls() {
        let provider = MockDataProvider::new()
            .with_json("/token/A", json!({"symbol": "AAA"}))
            .with_status("/token/B", 403);

        assert_eq!(
            provider.get_json(&Endpoint::token("A")).await.unwrap(),
            json!({"symbol": "AAA"})
        );
        let denied = provider.get_json(&Endpoint::token("B")).await.unwrap_err();
        assert_eq!(denied.kind(), ErrorKind::AccessDenied);
        let missing = provider.get_json(&Endpoint::token("C")).await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        assert_eq!(provider.calls(), vec!["/token/A", "/token/B", "/token/C"]);
    }
}
