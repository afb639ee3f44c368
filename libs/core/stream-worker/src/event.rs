//! Stream event wrapper
//!
//! Pairs a job with its Redis stream entry metadata.

use crate::worker::StreamJob;
use chrono::{DateTime, Utc};

/// A stream event containing job data and metadata
#[derive(Debug, Clone)]
pub struct StreamEvent<J: StreamJob> {
    /// Redis stream entry ID (e.g., "1234567890123-0")
    pub stream_id: String,

    /// The job payload
    pub job: J,

    /// When the event was created (parsed from the stream ID)
    pub timestamp: DateTime<Utc>,
}

impl<J: StreamJob> StreamEvent<J> {
    pub fn new(stream_id: String, job: J) -> Self {
        let timestamp = Self::parse_timestamp(&stream_id);
        Self {
            stream_id,
            job,
            timestamp,
        }
    }

    /// Stream IDs are "timestamp_ms-sequence"; fall back to now if malformed.
    fn parse_timestamp(stream_id: &str) -> DateTime<Utc> {
        stream_id
            .split('-')
            .next()
            .and_then(|ts| ts.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now)
    }

    pub fn job_id(&self) -> String {
        self.job.job_id()
    }

    pub fn retry_count(&self) -> u32 {
        self.job.retry_count()
    }

    /// How long ago the entry was added to the stream
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Serialize, Deserialize, Debug)]
    struct TestJob {
        id: String,
        retry_count: u32,
    }

    impl StreamJob for TestJob {
        fn job_id(&self) -> String {
            self.id.clone()
        }
        fn retry_count(&self) -> u32 {
            self.retry_count
        }
        fn with_retry(&self) -> Self {
            Self {
                id: self.id.clone(),
                retry_count: self.retry_count + 1,
            }
        }
    }

    #[test]
    fn parses_timestamp_from_stream_id() {
        let job = TestJob {
            id: "test-1".to_string(),
            retry_count: 0,
        };

        let now_ms = Utc::now().timestamp_millis();
        let event = StreamEvent::new(format!("{}-0", now_ms), job);

        assert!(event.age().num_milliseconds() < 1000);
        assert_eq!(event.job_id(), "test-1");
    }

    #[test]
    fn malformed_stream_id_falls_back_to_now() {
        let job = TestJob {
            id: "test-2".to_string(),
            retry_count: 1,
        };

        let event = StreamEvent::new("garbage".to_string(), job);
        assert!(event.age().num_seconds() < 2);
        assert_eq!(event.retry_count(), 1);
    }
}
