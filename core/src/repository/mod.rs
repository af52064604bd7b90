//! One repository per service: a client plus the shared transport.
//!
//! Every method performs its HTTP call(s) and hands back a `Result`; no
//! failure escapes any other way. Failed calls are logged here once, so the
//! view-models only decide what to show.

mod adoption;
mod animals;
mod auth;
mod cart;
mod orders;
mod products;

pub use adoption::AdoptionRepository;
pub use animals::AnimalRepository;
pub use auth::{AuthRepository, PROFILE_LOOKUP_FAILED};
pub use cart::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Execute one built request and parse its response.
pub(crate) fn call<T>(
    transport: &dyn Transport,
    operation: &'static str,
    request: Result<HttpRequest, ApiError>,
    parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let result = request
        .and_then(|request| transport.execute(request))
        .and_then(parse);
    if let Err(err) = &result {
        warn!(operation, status = ?err.status(), error = %err, "call failed");
    }
    result
}
