//! Session domain module.
//!
//! This module contains the authentication credential model, the repository
//! interface used to persist credentials across restarts, and the gateway
//! trait for the backend's authentication endpoints.
//!
//! # Module Structure
//!
//! - `model`: Credential domain models (`SessionCredentials`, `AuthSession`)
//! - `repository`: Persistence trait (`CredentialRepository`) and the
//!   read-only token seam (`TokenSource`)
//! - `gateway`: Backend authentication operations (`AuthGateway`)

mod gateway;
mod model;
mod repository;

// Re-export public API
pub use gateway::AuthGateway;
pub use model::{AuthSession, RegisterRequest, SessionCredentials};
pub use repository::{CredentialRepository, TokenSource};
