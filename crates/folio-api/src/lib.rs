//! Typed REST client for the Folio backend.
//!
//! [`ApiClient`] implements the gateway traits defined in `folio-core`,
//! one module per backend resource. Request/response envelopes are private
//! serde structs; the public surface speaks core domain types only.
//!
//! Authenticated requests pull the bearer token from the core
//! [`TokenSource`](folio_core::session::TokenSource) seam; a missing token
//! is rejected locally, before any network dispatch.

mod auth;
mod blog;
mod client;
mod comment;
mod config;
mod user;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
