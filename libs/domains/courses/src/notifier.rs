//! Seam between course/lesson mutations and the notification queue.
//!
//! Services call [`UpdateNotifier::course_updated`] after a confirmed save.
//! The call is fire-and-forget: there is no result channel back to the
//! mutation handler, and implementations must absorb enqueue failures
//! (log and move on) rather than surface them.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[async_trait]
pub trait UpdateNotifier: Send + Sync {
    /// Announce that `course_id` changed (directly or via one of its lessons).
    async fn course_updated(&self, course_id: Uuid);
}

/// Notifier that drops every announcement. For tools and tests that do not
/// care about notifications.
#[derive(Debug, Default, Clone)]
pub struct NoopNotifier;

#[async_trait]
impl UpdateNotifier for NoopNotifier {
    async fn course_updated(&self, _course_id: Uuid) {}
}

/// Notifier that records announced course ids, in order. Test double.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    announced: Arc<Mutex<Vec<Uuid>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All course ids announced so far, in announcement order
    pub async fn announced(&self) -> Vec<Uuid> {
        self.announced.lock().await.clone()
    }
}

#[async_trait]
impl UpdateNotifier for RecordingNotifier {
    async fn course_updated(&self, course_id: Uuid) {
        self.announced.lock().await.push(course_id);
    }
}
