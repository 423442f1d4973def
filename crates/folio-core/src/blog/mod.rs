//! Blog domain module.
//!
//! # Module Structure
//!
//! - `model`: Article records and mutation payloads
//! - `gateway`: Backend blog operations (`BlogGateway`)

mod gateway;
mod model;

// Re-export public API
pub use gateway::BlogGateway;
pub use model::{
    Blog, BlogAuthor, BlogDraft, BlogUpdate, FavouriteState, LoveState, Reactions,
    validate_blog_draft,
};
