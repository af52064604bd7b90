//! Scripted transport for unit tests of repositories and view-models.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) const BASE: &str = "http://svc.test";

pub(crate) fn config() -> ApiConfig {
    ApiConfig::single_host(BASE)
}

struct Script {
    method: HttpMethod,
    path: String,
    replies: VecDeque<Result<HttpResponse, ApiError>>,
}

/// Answers requests by exact method and path (relative to `BASE`). The last
/// queued reply for a route repeats; unscripted routes fail as transport
/// errors.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<Vec<Script>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }),
        );
    }

    pub(crate) fn fail(&self, method: HttpMethod, path: &str, err: ApiError) {
        self.push(method, path, Err(err));
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Result<HttpResponse, ApiError>) {
        let mut scripts = self.scripts.lock().unwrap();
        if let Some(script) = scripts.iter_mut().find(|s| s.method == method && s.path == path) {
            script.replies.push_back(reply);
        } else {
            scripts.push(Script {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: HttpMethod, path: &str) -> usize {
        let full = format!("{BASE}{path}");
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let path = request.path.strip_prefix(BASE).unwrap_or(&request.path).to_string();
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts
            .iter_mut()
            .find(|s| s.method == request.method && s.path == path)
            .ok_or_else(|| ApiError::Transport(format!("unscripted {} {path}", request.method.as_str())))?;
        if script.replies.len() > 1 {
            script.replies.pop_front().unwrap_or_else(|| Err(ApiError::Transport("empty script".into())))
        } else {
            script
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ApiError::Transport("empty script".into())))
        }
    }
}
