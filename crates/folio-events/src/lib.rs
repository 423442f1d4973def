//! User-facing notice stream for Folio.
//!
//! Failures in this client degrade to dismissible notices, never crashes.
//! This crate provides the bridge: a `tracing` layer that captures WARN and
//! ERROR events anywhere in the client and forwards them to a channel the
//! view layer renders from.

mod notice;

pub use notice::{Notice, NoticeLayer, NoticeLevel, notice_channel};
