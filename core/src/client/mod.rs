//! Stateless HTTP request builders and response parsers, one per service.
//!
//! # Design
//! Each client holds only its parsed base URL and carries no mutable state
//! between calls. Every operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between, so
//! this layer stays deterministic and free of I/O.
//!
//! Parsing follows the same rules everywhere: any 2xx is success, list
//! endpoints treat an empty body as an empty list, and failure messages come
//! from the response body when it has one, else from the operation's fixed
//! fallback text.

mod adoption;
mod animals;
mod auth;
mod cart;
mod catalog;
mod orders;

pub use adoption::AdoptionClient;
pub use animals::AnimalClient;
pub use auth::AuthClient;
pub use cart::CartClient;
pub use catalog::CatalogClient;
pub use orders::OrderClient;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Bearer credential for admin-only operations, issued by the auth service
/// at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parsed base URL of one service.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    base: Url,
}

impl Endpoint {
    pub(crate) fn parse(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base })
    }

    /// Absolute URL for `segments` under the base path. Segments and query
    /// values are percent-encoded.
    pub(crate) fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url.to_string()
    }
}

pub(crate) fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

pub(crate) fn delete(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        path,
        headers: Vec::new(),
        body: None,
    }
}

/// A bodyless PUT, used for state transitions such as cancel and adopt.
pub(crate) fn put_empty(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Put,
        path,
        headers: Vec::new(),
        body: None,
    }
}

pub(crate) fn json<B: Serialize>(method: HttpMethod, path: String, body: &B) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

pub(crate) fn with_bearer(mut request: HttpRequest, token: &AdminToken) -> HttpRequest {
    request
        .headers
        .push(("authorization".to_string(), format!("Bearer {}", token.as_str())));
    request
}

/// Fail on any non-2xx status with the body's message or `fallback`.
pub(crate) fn check_status(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(
        response.status,
        error_message(&response.body, fallback),
    ))
}

/// Parse a single entity. An empty 2xx body is a failure.
pub(crate) fn expect_json<T: DeserializeOwned>(response: HttpResponse, fallback: &str) -> Result<T, ApiError> {
    check_status(&response, fallback)?;
    if is_blank_body(&response.body) {
        return Err(ApiError::MissingBody(fallback.to_string()));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Parse a list. An empty or `null` 2xx body is an empty list.
pub(crate) fn expect_list<T: DeserializeOwned>(response: HttpResponse, fallback: &str) -> Result<Vec<T>, ApiError> {
    check_status(&response, fallback)?;
    if is_blank_body(&response.body) {
        return Ok(Vec::new());
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

pub(crate) fn expect_empty(response: HttpResponse, fallback: &str) -> Result<(), ApiError> {
    check_status(&response, fallback)
}

fn is_blank_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed == "null"
}

/// Best human-readable message in an error body: a JSON `message` or `error`
/// field, a JSON string, or the raw text.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error", "mensaje"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .filter(|msg| !msg.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        Ok(serde_json::Value::String(msg)) if !msg.trim().is_empty() => msg,
        Ok(_) => fallback.to_string(),
        Err(_) => trimmed.to_string(),
    }
}
