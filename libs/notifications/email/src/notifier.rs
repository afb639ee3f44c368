//! Queue-backed implementation of the course update seam.

use crate::job::CourseUpdateJob;
use async_trait::async_trait;
use domain_courses::UpdateNotifier;
use stream_worker::StreamProducer;
use tracing::{debug, warn};
use uuid::Uuid;

/// Enqueues a [`CourseUpdateJob`] onto the Redis stream.
///
/// Enqueue failures are logged and swallowed. Losing a notification must
/// never fail the write that triggered it.
pub struct QueueUpdateNotifier {
    producer: StreamProducer,
}

impl QueueUpdateNotifier {
    pub fn new(producer: StreamProducer) -> Self {
        Self { producer }
    }
}

#[async_trait]
impl UpdateNotifier for QueueUpdateNotifier {
    async fn course_updated(&self, course_id: Uuid) {
        let job = CourseUpdateJob::new(course_id);
        match self.producer.send(&job).await {
            Ok(stream_id) => {
                debug!(%course_id, job_id = %job.id, %stream_id, "enqueued course update notification");
            }
            Err(e) => {
                warn!(%course_id, error = %e, "failed to enqueue course update notification");
            }
        }
    }
}
