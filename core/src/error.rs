//! Error taxonomy for the service clients and repositories.
//!
//! # Design
//! Every failure a screen can see is one `ApiError`. Variants separate the
//! causes a caller may want to react to differently: the network being
//! unreachable, a timeout, missing authorization, a missing resource, a
//! request the service refused, and a broken server. Each variant still
//! renders a single human-readable message (`message()`), which is what the
//! view-models surface in their `error` fields.

use thiserror::Error;

/// Errors returned by `parse_*` methods, transports and repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed: DNS, connect, TLS or I/O failure.
    #[error("{0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("{0}")]
    Timeout(String),

    /// A configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    /// 401 or 403.
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// 404.
    #[error("{message}")]
    NotFound { message: String },

    /// The service refused the request: a 4xx other than 401/403/404, or a
    /// 2xx body carrying a business failure such as `success: false`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 5xx or any other unexpected status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response without the entity the operation returns.
    #[error("{0}")]
    MissingBody(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A client-side precondition failed before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// The human-readable message shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// True for failures where the request never got an answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout(_))
    }

    /// Build the error for a non-2xx status, classifying by code.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status, message },
            404 => ApiError::NotFound { message },
            400..=499 => ApiError::Rejected { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    /// Same classification, different message. Network failures keep theirs.
    pub(crate) fn with_message(self, message: &str) -> Self {
        let message = message.to_string();
        match self {
            ApiError::Unauthorized { status, .. } => ApiError::Unauthorized { status, message },
            ApiError::NotFound { .. } => ApiError::NotFound { message },
            ApiError::Rejected { status, .. } => ApiError::Rejected { status, message },
            ApiError::Server { status, .. } => ApiError::Server { status, message },
            ApiError::MissingBody(_) => ApiError::MissingBody(message),
            ApiError::Deserialization(_) => ApiError::Deserialization(message),
            other => other,
        }
    }
}
