//! Shared test utilities for domain testing
//!
//! - `TestDataBuilder`: deterministic test data derived from the test name
//! - `http`: request builders and body readers for router tests
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, http::{json_request, read_json}};
//! use tower::ServiceExt;
//!
//! #[tokio::test]
//! async fn my_handler_test() {
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let login = builder.login("main");
//!
//!     let response = app
//!         .oneshot(json_request("POST", "/", &serde_json::json!({ "login": login })))
//!         .await
//!         .unwrap();
//!     let body: serde_json::Value = read_json(response).await;
//! }
//! ```

use uuid::Uuid;

/// Builder for test data with deterministic values
///
/// Values depend only on the seed, so a failing test reproduces with the
/// same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic UUID; `n` distinguishes several ids within one test
    pub fn id(&self, n: u64) -> Uuid {
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        uuid_bytes[8..].copy_from_slice(&n.to_le_bytes());
        Uuid::from_bytes(uuid_bytes)
    }

    /// Unique name, e.g. `test-board-12345-main`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("board", "main"), "test-board-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique user login
    pub fn login(&self, suffix: &str) -> String {
        format!("user{}{}", self.seed, suffix)
    }
}

/// Helpers for driving an `axum::Router` with `tower::ServiceExt::oneshot`
pub mod http {
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde::{Serialize, de::DeserializeOwned};

    /// Request with a JSON body
    pub fn json_request(method: &str, uri: &str, body: &impl Serialize) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    /// Request with a raw body string, for malformed-JSON cases
    pub fn raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Request without a body
    pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn read_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    /// Assert that two UUIDs are equal with a nice error message
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert an error body carries the expected `error` identifier
    pub fn assert_error_body(body: &serde_json::Value, expected_error: &str) {
        assert_eq!(
            body["error"], expected_error,
            "unexpected error body: {}",
            body
        );
        assert!(body["message"].is_string(), "missing message: {}", body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.id(1), builder2.id(1));
        assert_eq!(builder1.login("a"), builder2.login("a"));
    }

    #[test]
    fn test_ids_differ_by_index() {
        let builder = TestDataBuilder::from_test_name("ids");
        assert_ne!(builder.id(1), builder.id(2));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.id(0), builder2.id(0));
        assert_ne!(builder1.login("x"), builder2.login("x"));
    }
}
