//! Stream definition for course update notifications.

use stream_worker::StreamDef;

/// Redis stream carrying [`crate::CourseUpdateJob`] payloads.
pub struct CourseUpdateStream;

impl StreamDef for CourseUpdateStream {
    const STREAM_NAME: &'static str = "courses:updates";
    const CONSUMER_GROUP: &'static str = "notify_workers";
    const DLQ_STREAM: &'static str = "courses:updates:dlq";
}
