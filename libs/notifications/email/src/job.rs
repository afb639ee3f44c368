//! Course update job payload carried on the Redis stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stream_worker::StreamJob;
use uuid::Uuid;

/// Enqueued when a course or one of its lessons changes.
///
/// The payload carries only the course id. Subscribers and course details
/// are resolved at processing time, so a subscription created between
/// enqueue and processing still receives the notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUpdateJob {
    pub id: Uuid,
    pub course_id: Uuid,
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
}

impl CourseUpdateJob {
    pub fn new(course_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            course_id,
            retry_count: 0,
            created_at: Utc::now(),
        }
    }
}

impl StreamJob for CourseUpdateJob {
    fn job_id(&self) -> String {
        self.id.to_string()
    }

    fn retry_count(&self) -> u32 {
        self.retry_count
    }

    fn with_retry(&self) -> Self {
        Self {
            id: Uuid::now_v7(),
            retry_count: self.retry_count + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_gets_fresh_id() {
        let job = CourseUpdateJob::new(Uuid::now_v7());
        let retried = job.with_retry();

        assert_ne!(retried.id, job.id);
        assert_eq!(retried.course_id, job.course_id);
        assert_eq!(retried.retry_count, 1);
    }
}
