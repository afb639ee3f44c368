//! Stream consumer for Redis operations
//!
//! Handles reading, acknowledging, and re-queueing messages via consumer
//! groups.

use crate::config::WorkerConfig;
use crate::error::StreamError;
use crate::event::StreamEvent;
use crate::worker::StreamJob;
use redis::RedisResult;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stream consumer for Redis operations
pub struct StreamConsumer {
    redis: Arc<ConnectionManager>,
    config: WorkerConfig,
}

impl StreamConsumer {
    pub fn new(redis: Arc<ConnectionManager>, config: WorkerConfig) -> Self {
        Self { redis, config }
    }

    pub fn redis(&self) -> Arc<ConnectionManager> {
        self.redis.clone()
    }

    pub fn stream_name(&self) -> &str {
        &self.config.stream_name
    }

    pub fn consumer_group(&self) -> &str {
        &self.config.consumer_group
    }

    pub fn consumer_id(&self) -> &str {
        &self.config.consumer_id
    }

    /// Initialize the consumer group if it doesn't exist
    pub async fn init_consumer_group(&self) -> Result<(), StreamError> {
        let mut conn = (*self.redis).clone();

        let result: RedisResult<()> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg("0") // start from the beginning
            .arg("MKSTREAM") // create stream if it doesn't exist
            .query_async(&mut conn)
            .await;

        match result {
            Ok(_) => {
                info!(
                    stream = %self.config.stream_name,
                    group = %self.config.consumer_group,
                    "Created consumer group"
                );
            }
            Err(e) if e.to_string().contains("BUSYGROUP") => {
                debug!(
                    stream = %self.config.stream_name,
                    group = %self.config.consumer_group,
                    "Consumer group already exists"
                );
            }
            Err(e) => return Err(StreamError::Redis(e)),
        }

        Ok(())
    }

    /// Read messages delivered to this consumer but not yet acknowledged
    pub async fn read_pending<J: StreamJob>(
        &self,
        count: usize,
    ) -> Result<Vec<StreamEvent<J>>, StreamError> {
        let mut conn = (*self.redis).clone();

        let result: RedisResult<Vec<(String, Vec<(String, Vec<(String, String)>)>)>> =
            redis::cmd("XREADGROUP")
                .arg("GROUP")
                .arg(&self.config.consumer_group)
                .arg(&self.config.consumer_id)
                .arg("COUNT")
                .arg(count)
                .arg("STREAMS")
                .arg(&self.config.stream_name)
                .arg("0") // pending entries
                .query_async(&mut conn)
                .await;

        match result {
            Ok(streams) => self.parse_stream_response(streams),
            Err(e) if e.to_string().contains("NOGROUP") => Ok(vec![]),
            Err(e) => Err(StreamError::Redis(e)),
        }
    }

    /// Read new messages from the stream
    pub async fn read_new<J: StreamJob>(
        &self,
        count: usize,
    ) -> Result<Vec<StreamEvent<J>>, StreamError> {
        let mut conn = (*self.redis).clone();

        let mut cmd = redis::cmd("XREADGROUP");
        cmd.arg("GROUP")
            .arg(&self.config.consumer_group)
            .arg(&self.config.consumer_id);

        if let Some(timeout) = self.config.blocking_timeout_ms {
            cmd.arg("BLOCK").arg(timeout);
        }

        cmd.arg("COUNT")
            .arg(count)
            .arg("STREAMS")
            .arg(&self.config.stream_name)
            .arg(">"); // only new messages

        let result: RedisResult<Option<Vec<(String, Vec<(String, Vec<(String, String)>)>)>>> =
            cmd.query_async(&mut conn).await;

        match result {
            Ok(Some(streams)) => self.parse_stream_response(streams),
            Ok(None) => Ok(vec![]), // blocking timeout, no messages
            Err(e) if e.to_string().contains("NOGROUP") => Ok(vec![]),
            Err(e) => Err(StreamError::Redis(e)),
        }
    }

    /// Acknowledge a message
    pub async fn ack(&self, stream_id: &str) -> Result<(), StreamError> {
        let mut conn = (*self.redis).clone();

        let _: i64 = redis::cmd("XACK")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg(stream_id)
            .query_async(&mut conn)
            .await?;

        debug!(stream_id = %stream_id, "Acknowledged message");
        Ok(())
    }

    /// Re-enqueue a job (e.g. with an incremented retry count)
    pub async fn requeue<J: StreamJob>(&self, job: &J) -> Result<(), StreamError> {
        let mut conn = (*self.redis).clone();
        let job_json = serde_json::to_string(job)?;

        let _: String = redis::cmd("XADD")
            .arg(&self.config.stream_name)
            .arg("*")
            .arg("job")
            .arg(&job_json)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    /// Move a failed job to the dead letter queue
    pub async fn move_to_dlq<J: StreamJob>(
        &self,
        job: &J,
        error: &str,
    ) -> Result<(), StreamError> {
        let mut conn = (*self.redis).clone();
        let job_json = serde_json::to_string(job)?;

        let _: String = redis::cmd("XADD")
            .arg(&self.config.dlq_stream)
            .arg("*")
            .arg("job")
            .arg(&job_json)
            .arg("error")
            .arg(error)
            .query_async(&mut conn)
            .await?;

        warn!(
            job_id = %job.job_id(),
            dlq = %self.config.dlq_stream,
            "Moved job to DLQ"
        );

        Ok(())
    }

    /// Claim messages abandoned by other consumers
    pub async fn claim_abandoned<J: StreamJob>(
        &self,
        count: usize,
    ) -> Result<Vec<StreamEvent<J>>, StreamError> {
        let mut conn = (*self.redis).clone();

        let pending: RedisResult<Vec<(String, String, i64, i64)>> = redis::cmd("XPENDING")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg("-")
            .arg("+")
            .arg(count)
            .query_async(&mut conn)
            .await;

        let pending = match pending {
            Ok(p) => p,
            Err(e) if e.to_string().contains("NOGROUP") => return Ok(vec![]),
            Err(e) => return Err(StreamError::Redis(e)),
        };

        let claim_ids: Vec<String> = pending
            .iter()
            .filter(|(_, _, idle_time, _)| *idle_time > self.config.claim_timeout_ms as i64)
            .map(|(id, _, _, _)| id.clone())
            .collect();

        if claim_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut cmd = redis::cmd("XCLAIM");
        cmd.arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg(&self.config.consumer_id)
            .arg(self.config.claim_timeout_ms);

        for id in &claim_ids {
            cmd.arg(id);
        }

        let result: RedisResult<Vec<(String, Vec<(String, String)>)>> =
            cmd.query_async(&mut conn).await;

        match result {
            Ok(entries) => {
                let events = self.parse_entries(entries)?;
                if !events.is_empty() {
                    warn!(count = events.len(), "Claimed abandoned messages");
                }
                Ok(events)
            }
            Err(e) => Err(StreamError::Redis(e)),
        }
    }

    fn parse_stream_response<J: StreamJob>(
        &self,
        streams: Vec<(String, Vec<(String, Vec<(String, String)>)>)>,
    ) -> Result<Vec<StreamEvent<J>>, StreamError> {
        let mut events = Vec::new();

        for (_stream_name, entries) in streams {
            let parsed = self.parse_entries(entries)?;
            events.extend(parsed);
        }

        Ok(events)
    }

    fn parse_entries<J: StreamJob>(
        &self,
        entries: Vec<(String, Vec<(String, String)>)>,
    ) -> Result<Vec<StreamEvent<J>>, StreamError> {
        let mut events = Vec::new();

        for (stream_id, fields) in entries {
            let job_data = fields
                .iter()
                .find(|(k, _)| k == "job")
                .map(|(_, v)| v.as_str());

            if let Some(json) = job_data {
                match serde_json::from_str::<J>(json) {
                    Ok(job) => {
                        events.push(StreamEvent::new(stream_id, job));
                    }
                    Err(e) => {
                        warn!(
                            stream_id = %stream_id,
                            error = %e,
                            "Failed to parse job, skipping"
                        );
                    }
                }
            } else {
                warn!(
                    stream_id = %stream_id,
                    fields = ?fields.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
                    "Missing 'job' field in message"
                );
            }
        }

        Ok(events)
    }
}
