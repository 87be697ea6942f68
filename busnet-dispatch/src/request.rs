//! Transport-agnostic description of a backend request.

use http::Method;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A request to one of the backend's endpoints.
///
/// Paths are relative to the backend base URL (ex: `/move_bus`).
/// Query pairs are sent in order, unencoded here; encoding is the transport's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    /// JSON body. Only ever set for `POST` requests.
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    /// A bodyless `GET` request.
    pub fn get(path: &'static str) -> ApiRequest {
        ApiRequest {
            method: Method::GET,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// A `POST` request with a JSON body.
    pub fn post<T: Serialize>(path: &'static str, body: &T) -> ApiRequest {
        #[expect(clippy::missing_panics_doc)]
        let body = serde_json::to_value(body).expect("Programming error: either Serialize is incorrectly implemented, or the structure contains a map with non-string keys.");

        ApiRequest {
            method: Method::POST,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> ApiRequest {
        self.query.push((key, value.into()));
        self
    }
}
