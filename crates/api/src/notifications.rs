//! Moderation "status changed" notification hook.
//!
//! Handlers call [`dispatch`] after an effective status transition. Delivery
//! runs on a detached task: the HTTP response never waits for it and a
//! failing notifier cannot roll back the transition.

use std::sync::Arc;

use alumni_core::moderation::ModerationStatus;
use alumni_core::types::DbId;
use async_trait::async_trait;
use serde::Serialize;

/// A moderated record moved from one status to another.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeEvent {
    /// Record kind (`achievements`, `blogs`, `registration_requests`).
    pub kind: &'static str,
    pub record_id: DbId,
    pub author_identity: String,
    pub from: ModerationStatus,
    pub to: ModerationStatus,
    /// Administrator who made the change.
    pub reviewed_by: DbId,
}

/// Receiver of moderation status changes.
#[async_trait]
pub trait StatusNotifier: Send + Sync {
    async fn status_changed(&self, event: StatusChangeEvent);
}

/// Notifier that records each change in the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl StatusNotifier for LogNotifier {
    async fn status_changed(&self, event: StatusChangeEvent) {
        tracing::info!(
            kind = event.kind,
            record_id = event.record_id,
            author = %event.author_identity,
            from = %event.from,
            to = %event.to,
            reviewed_by = event.reviewed_by,
            "Moderation status changed",
        );
    }
}

/// Deliver `event` to `notifier` on a background task.
pub fn dispatch(notifier: Arc<dyn StatusNotifier>, event: StatusChangeEvent) {
    tokio::spawn(async move {
        notifier.status_changed(event).await;
    });
}
