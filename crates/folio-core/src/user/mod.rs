//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User records and profile payloads
//! - `gateway`: Backend profile operations (`ProfileGateway`)

mod gateway;
mod model;

// Re-export public API
pub use gateway::ProfileGateway;
pub use model::{AuthorProfile, OwnProfile, ProfileUpdate, User, validate_profile_update};
