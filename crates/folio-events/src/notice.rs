//! Tracing layer that turns WARN/ERROR events into user-facing notices.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A dismissible, non-fatal notice for the view layer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Human-readable message (the tracing event's `message` field).
    pub message: String,
    /// Event target (e.g., "folio_application::comment_usecase").
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// A tracing layer that forwards WARN/ERROR events as [`Notice`]s.
///
/// Send is non-blocking; if the receiver has been dropped the notice is
/// discarded and logging continues unaffected.
pub struct NoticeLayer {
    sender: mpsc::UnboundedSender<Notice>,
}

impl NoticeLayer {
    /// Creates a new layer with the given channel sender.
    pub fn new(sender: mpsc::UnboundedSender<Notice>) -> Self {
        Self { sender }
    }
}

/// Creates a connected layer/receiver pair.
///
/// Compose the layer into a `tracing_subscriber` registry and drain the
/// receiver from the view layer.
pub fn notice_channel() -> (NoticeLayer, mpsc::UnboundedReceiver<Notice>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (NoticeLayer::new(sender), receiver)
}

impl<S> Layer<S> for NoticeLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = match *event.metadata().level() {
            Level::ERROR => NoticeLevel::Error,
            Level::WARN => NoticeLevel::Warning,
            _ => return,
        };

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        if message.is_empty() {
            return;
        }

        let notice = Notice {
            level,
            message,
            source: event.metadata().target().to_string(),
            timestamp: Utc::now(),
        };

        let _ = self.sender.send(notice);
    }
}

/// Extracts the `message` field of a tracing event.
struct MessageVisitor<'a>(&'a mut String);

impl<'a> tracing::field::Visit for MessageVisitor<'a> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.push_str(&format!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_warn_and_error_events_become_notices() {
        let (layer, mut receiver) = notice_channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("network hiccup");
            tracing::error!("backend rejected request");
            tracing::info!("not a notice");
        });

        let first = receiver.try_recv().unwrap();
        assert_eq!(first.level, NoticeLevel::Warning);
        assert_eq!(first.message, "network hiccup");

        let second = receiver.try_recv().unwrap();
        assert_eq!(second.level, NoticeLevel::Error);
        assert_eq!(second.message, "backend rejected request");

        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (layer, receiver) = notice_channel();
        drop(receiver);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("nobody listening");
        });
    }
}
