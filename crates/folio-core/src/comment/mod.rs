//! Comment domain module.
//!
//! # Module Structure
//!
//! - `model`: Flat comment record as delivered by the backend (`Comment`,
//!   `CommentAuthor`) plus content validation
//! - `tree`: The comment tree composer (`CommentForest`) converting flat
//!   records into a nested reply forest and applying incremental updates
//! - `gateway`: Backend comment operations (`CommentGateway`)

mod gateway;
mod model;
mod tree;

// Re-export public API
pub use gateway::CommentGateway;
pub use model::{Comment, CommentAuthor, MAX_COMMENT_CONTENT_LEN, validate_comment_content};
pub use tree::{CommentForest, CommentNode, MAX_REPLY_DEPTH, ReplyPlacement};
