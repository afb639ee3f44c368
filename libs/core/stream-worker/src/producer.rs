//! Stream producer for job enqueuing
//!
//! Generic producer used by any service to queue jobs for background
//! processing.
//!
//! # Example
//!
//! ```rust,ignore
//! use stream_worker::{StreamProducer, StreamDef};
//!
//! let producer = StreamProducer::from_stream_def::<CourseUpdateStream>(redis);
//! let message_id = producer.send(&job).await?;
//! ```

use crate::error::StreamError;
use crate::registry::StreamDef;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tracing::debug;

/// Generic stream producer for enqueuing jobs.
pub struct StreamProducer {
    redis: Arc<ConnectionManager>,
    stream_name: String,
    max_length: i64,
}

impl StreamProducer {
    /// Create a new StreamProducer for a specific stream.
    pub fn new(redis: ConnectionManager, stream_name: impl Into<String>) -> Self {
        Self {
            redis: Arc::new(redis),
            stream_name: stream_name.into(),
            max_length: 100_000,
        }
    }

    /// Create a producer from a `StreamDef` implementation.
    ///
    /// Preferred: keeps the stream name and max length consistent with
    /// the worker side.
    pub fn from_stream_def<S: StreamDef>(redis: ConnectionManager) -> Self {
        Self {
            redis: Arc::new(redis),
            stream_name: S::STREAM_NAME.to_string(),
            max_length: S::MAX_LENGTH,
        }
    }

    /// Set the maximum stream length (MAXLEN ~).
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = max_length;
        self
    }

    /// Get the stream name.
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Enqueue a job.
    ///
    /// Returns the Redis stream message ID.
    pub async fn send<J: serde::Serialize>(&self, job: &J) -> Result<String, StreamError> {
        let mut conn = (*self.redis).clone();

        let job_json = serde_json::to_string(job)?;

        // MAXLEN ~ trims approximately, which is cheaper than exact trimming
        let stream_id: String = redis::cmd("XADD")
            .arg(&self.stream_name)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_length)
            .arg("*")
            .arg("job") // field name the consumer looks for
            .arg(&job_json)
            .query_async(&mut conn)
            .await?;

        debug!(
            stream = %self.stream_name,
            stream_id = %stream_id,
            "Enqueued job"
        );

        Ok(stream_id)
    }

    /// Get the current stream length.
    pub async fn stream_length(&self) -> Result<i64, StreamError> {
        let mut conn = (*self.redis).clone();
        let len: i64 = conn.xlen(&self.stream_name).await?;
        Ok(len)
    }
}

impl Clone for StreamProducer {
    fn clone(&self) -> Self {
        Self {
            redis: self.redis.clone(),
            stream_name: self.stream_name.clone(),
            max_length: self.max_length,
        }
    }
}
