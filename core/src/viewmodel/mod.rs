//! Per-screen state holders.
//!
//! # Design
//! A view-model owns one or more `Observable`s and exposes blocking action
//! methods. Each action calls its repository, then publishes the outcome
//! into state; nothing is returned to the caller and no error escapes. Hosts
//! run actions off their UI thread and render from `get()`/`subscribe()`.
//! Calling `close()` when the screen goes away makes any still-running
//! action's final update a no-op.
//!
//! The data layer does not serialize actions: a screen is expected to keep
//! an action's trigger disabled while its loading flag is set.

mod admin;
mod adoption;
mod animals;
mod auth;
mod cart;
mod orders;
mod products;
mod profile;

pub use admin::{AdminState, AdminViewModel};
pub use adoption::{AdoptionFormViewModel, AdoptionRequestsViewModel};
pub use animals::AnimalViewModel;
pub use auth::AuthViewModel;
pub use cart::{CartState, CartViewModel, PendingClears};
pub use orders::{format_order_date, OrderHistoryViewModel, OrderSummary};
pub use products::ProductViewModel;
pub use profile::{ProfileState, ProfileViewModel};

use crate::session::SessionStore;

pub const NOT_AUTHENTICATED: &str = "Usuario no autenticado";

fn session_user(session: &SessionStore) -> Result<i64, String> {
    session.user_id().ok_or_else(|| NOT_AUTHENTICATED.to_string())
}
