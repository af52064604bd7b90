//! Executes `HttpRequest`s built by the service clients.
//!
//! # Design
//! `Transport` is the single seam between the deterministic build/parse
//! layer and the network. Repositories hold an `Arc<dyn Transport>`, so a
//! host can plug in its own HTTP stack and tests can script responses.
//! `UreqTransport` is the default: a blocking agent with one uniform timeout
//! that returns every HTTP status as data and leaves status interpretation
//! to the clients.

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Perform one round-trip. Only failures to get a response at all are
    /// errors; non-2xx statuses come back as `Ok`.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        debug!(method = method.as_str(), url = %path, "sending request");
        if let Some(body) = &body {
            trace!(%body, "request body");
        }
        let started = Instant::now();

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&path), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&path), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(&path), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(&path), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| {
            let err = map_ureq_error(e);
            warn!(method = method.as_str(), url = %path, error = %err, "request failed");
            err
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(map_ureq_error)?;

        debug!(
            method = method.as_str(),
            url = %path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        trace!(%body, "response body");

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout(err.to_string()),
        other => ApiError::Transport(other.to_string()),
    }
}
