//! Service locations and the uniform request timeout.
//!
//! Defaults point each service at its own local port (auth on 8090 through
//! orders on 8095). `from_env` lets a host or a test run redirect any of
//! them without recompiling.

use std::env;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub auth_url: String,
    pub catalog_url: String,
    pub cart_url: String,
    pub animals_url: String,
    pub adoption_url: String,
    pub orders_url: String,
    /// Applied to every call; there is no per-operation override.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:8090/".to_string(),
            catalog_url: "http://localhost:8091/".to_string(),
            cart_url: "http://localhost:8092/".to_string(),
            animals_url: "http://localhost:8093/".to_string(),
            adoption_url: "http://localhost:8094/".to_string(),
            orders_url: "http://localhost:8095/".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// All six services behind one base URL, as the mock server serves them.
    pub fn single_host(base_url: &str) -> Self {
        let base = base_url.to_string();
        Self {
            auth_url: base.clone(),
            catalog_url: base.clone(),
            cart_url: base.clone(),
            animals_url: base.clone(),
            adoption_url: base.clone(),
            orders_url: base,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults overridden by `ADOPT_AUTH_URL`, `ADOPT_CATALOG_URL`,
    /// `ADOPT_CART_URL`, `ADOPT_ANIMALS_URL`, `ADOPT_ADOPTION_URL`,
    /// `ADOPT_ORDERS_URL` and `ADOPT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        let urls = [
            ("ADOPT_AUTH_URL", &mut config.auth_url),
            ("ADOPT_CATALOG_URL", &mut config.catalog_url),
            ("ADOPT_CART_URL", &mut config.cart_url),
            ("ADOPT_ANIMALS_URL", &mut config.animals_url),
            ("ADOPT_ADOPTION_URL", &mut config.adoption_url),
            ("ADOPT_ORDERS_URL", &mut config.orders_url),
        ];
        for (key, slot) in urls {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
        if let Some(raw) = lookup("ADOPT_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Validation(format!("ADOPT_TIMEOUT_SECS must be a whole number, got {raw:?}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
