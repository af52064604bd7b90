//! Client core for the pet-adoption and pet-supply shop.
//!
//! # Overview
//! Six REST services (auth, catalog, cart, animals, adoption forms, orders)
//! sit behind per-service clients that only build `HttpRequest`s and parse
//! `HttpResponse`s. A `Transport` performs the round-trip; repositories pair
//! the two and return `Result`s; view-models turn those results into
//! observable per-screen state. The host renders that state and calls the
//! view-models' actions from a worker thread.
//!
//! # Design
//! - Clients are stateless and deterministic; all I/O goes through
//!   `Transport`, so tests can script responses.
//! - Every failure is an `ApiError` with a user-facing message; the variant
//!   says whether the network, authorization, a missing resource, or the
//!   service itself was at fault.
//! - Admin-only calls carry a bearer token issued at login.
//! - The session is an explicit `SessionStore` shared by `Arc`, persisted
//!   as a JSON file when the host gives it a directory.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod repository;
pub mod routes;
pub mod session;
pub mod state;
pub mod transport;
pub mod types;
pub mod validation;
pub mod viewmodel;

#[cfg(test)]
mod testing;

pub use app::AppContext;
pub use client::AdminToken;
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use routes::Route;
pub use session::{SessionError, SessionStore};
pub use state::{ListState, Observable, Phase};
pub use transport::{Transport, UreqTransport};
