//! Core worker traits and the generic StreamWorker implementation.
//!
//! This module provides:
//! - `StreamJob` trait for job payloads
//! - `StreamProcessor` trait for job processors
//! - `StreamWorker` struct running the consume/ack loop

use crate::config::WorkerConfig;
use crate::consumer::StreamConsumer;
use crate::error::StreamError;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Trait for stream job payloads.
///
/// # Example
///
/// ```rust,ignore
/// use stream_worker::StreamJob;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct CourseUpdateJob {
///     id: Uuid,
///     course_id: Uuid,
///     retry_count: u32,
/// }
///
/// impl StreamJob for CourseUpdateJob {
///     fn job_id(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn retry_count(&self) -> u32 {
///         self.retry_count
///     }
///
///     fn with_retry(&self) -> Self {
///         Self {
///             retry_count: self.retry_count + 1,
///             ..self.clone()
///         }
///     }
/// }
/// ```
pub trait StreamJob: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the job ID for logging and tracking.
    fn job_id(&self) -> String;

    /// Returns the current retry count.
    fn retry_count(&self) -> u32;

    /// Creates a new job with an incremented retry count.
    fn with_retry(&self) -> Self;

    /// Maximum retries allowed before moving to DLQ.
    /// Default: 3 retries.
    fn max_retries(&self) -> u32 {
        3
    }

    /// Check if the job has exceeded max retries.
    fn exceeded_max_retries(&self, max_retries: u32) -> bool {
        self.retry_count() >= max_retries
    }
}

/// Trait for job processors.
///
/// # Example
///
/// ```rust,ignore
/// use stream_worker::{StreamProcessor, StreamError};
///
/// struct CourseUpdateProcessor { /* repositories, email provider */ }
///
/// #[async_trait]
/// impl StreamProcessor<CourseUpdateJob> for CourseUpdateProcessor {
///     async fn process(&self, job: &CourseUpdateJob) -> Result<(), StreamError> {
///         // fan out notification emails
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "CourseUpdateProcessor"
///     }
/// }
/// ```
#[async_trait]
pub trait StreamProcessor<J: StreamJob>: Send + Sync {
    /// Process a single job.
    ///
    /// Return `Ok(())` for success, `Err` for failure. Failed jobs are
    /// retried or moved to the DLQ based on the error category.
    async fn process(&self, job: &J) -> Result<(), StreamError>;

    /// Get the processor name for logging.
    fn name(&self) -> &'static str;

    /// Health check for the processor.
    ///
    /// Override to check external services. Default: always healthy.
    async fn health_check(&self) -> Result<bool, StreamError> {
        Ok(true)
    }
}

/// Generic stream worker that processes jobs using a processor.
///
/// Encapsulates the worker loop with:
/// - Consumer group management
/// - Pending message recovery
/// - Retry logic driven by error categories
/// - Dead letter queue handling
/// - Graceful shutdown via a watch channel
pub struct StreamWorker<J, P>
where
    J: StreamJob,
    P: StreamProcessor<J>,
{
    consumer: StreamConsumer,
    processor: Arc<P>,
    config: WorkerConfig,
    _phantom: PhantomData<J>,
}

impl<J, P> StreamWorker<J, P>
where
    J: StreamJob + 'static,
    P: StreamProcessor<J> + 'static,
{
    /// Create a new stream worker.
    pub fn new(redis: ConnectionManager, processor: P, config: WorkerConfig) -> Self {
        let consumer = StreamConsumer::new(Arc::new(redis), config.clone());

        Self {
            consumer,
            processor: Arc::new(processor),
            config,
            _phantom: PhantomData,
        }
    }

    /// Create a new stream worker with an already shared processor.
    pub fn with_arc_processor(
        redis: ConnectionManager,
        processor: Arc<P>,
        config: WorkerConfig,
    ) -> Self {
        let consumer = StreamConsumer::new(Arc::new(redis), config.clone());

        Self {
            consumer,
            processor,
            config,
            _phantom: PhantomData,
        }
    }

    /// Get a reference to the consumer for health checks.
    pub fn consumer(&self) -> &StreamConsumer {
        &self.consumer
    }

    /// Run the worker loop.
    ///
    /// Continuously reads jobs from the stream and processes them. Use
    /// the shutdown receiver to stop the worker gracefully.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), StreamError> {
        info!(
            consumer_id = %self.config.consumer_id,
            stream = %self.config.stream_name,
            group = %self.config.consumer_group,
            processor = %self.processor.name(),
            "Starting stream worker"
        );

        self.consumer.init_consumer_group().await?;

        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let claim_interval = Duration::from_millis(self.config.claim_timeout_ms * 2);
        let mut last_claim = std::time::Instant::now();
        let is_blocking = self.config.blocking_timeout_ms.is_some();

        let mut consecutive_errors: u32 = 0;
        const MAX_BACKOFF_SECS: u64 = 30;

        loop {
            if *shutdown.borrow() {
                info!("Received shutdown signal, stopping worker");
                break;
            }

            match self.process_batch().await {
                Ok(_) => {
                    if consecutive_errors > 0 {
                        info!("Connection recovered after {} errors", consecutive_errors);
                        consecutive_errors = 0;
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    let backoff_secs =
                        std::cmp::min(2u64.pow(consecutive_errors.min(5)), MAX_BACKOFF_SECS);
                    warn!(
                        error = %e,
                        consecutive_errors = %consecutive_errors,
                        backoff_secs = %backoff_secs,
                        "Error processing batch, backing off"
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    continue;
                }
            }

            // Periodically claim abandoned messages from dead consumers
            if last_claim.elapsed() >= claim_interval {
                match self.consumer.claim_abandoned::<J>(self.config.batch_size).await {
                    Ok(claimed) => {
                        for event in claimed {
                            self.process_job(&event.stream_id, &event.job).await;
                        }
                    }
                    Err(e) => debug!(error = %e, "Error claiming abandoned messages"),
                }
                last_claim = std::time::Instant::now();
            }

            // In blocking mode, Redis BLOCK handles waiting; in polling
            // mode, wait before the next poll
            if !is_blocking {
                tokio::select! {
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            info!("Received shutdown signal, stopping worker");
                            break;
                        }
                    }
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
        }

        info!("Stream worker stopped");
        Ok(())
    }

    /// Process one batch of pending and new messages.
    async fn process_batch(&self) -> Result<(), StreamError> {
        let pending = self.consumer.read_pending::<J>(self.config.batch_size).await?;
        let new_events = self.consumer.read_new::<J>(self.config.batch_size).await?;

        for event in pending.into_iter().chain(new_events) {
            self.process_job(&event.stream_id, &event.job).await;
        }

        Ok(())
    }

    /// Process a single job and ack, retry, or DLQ it.
    async fn process_job(&self, message_id: &str, job: &J) {
        debug!(
            message_id = %message_id,
            job_id = %job.job_id(),
            "Processing job"
        );

        match self.processor.process(job).await {
            Ok(()) => {
                if let Err(e) = self.consumer.ack(message_id).await {
                    error!(message_id = %message_id, error = %e, "Failed to ACK message");
                }
            }
            Err(e) => {
                warn!(
                    message_id = %message_id,
                    job_id = %job.job_id(),
                    error = %e,
                    error_category = ?e.category(),
                    "Job processing failed"
                );

                if let Err(handler_err) = self.handle_job_error(job, message_id, e).await {
                    error!(
                        message_id = %message_id,
                        error = %handler_err,
                        "Failed to handle job error"
                    );
                    // Still ACK to prevent an infinite redelivery loop
                    let _ = self.consumer.ack(message_id).await;
                }
            }
        }
    }

    /// Retry or DLQ a failed job based on its error category.
    async fn handle_job_error(
        &self,
        job: &J,
        message_id: &str,
        error: StreamError,
    ) -> Result<(), StreamError> {
        let category = error.category();
        let max_retries = category.max_retries().max(job.max_retries());

        // Permanent errors skip retries entirely
        if !error.should_retry(job.retry_count()) {
            if job.exceeded_max_retries(max_retries) {
                warn!(
                    job_id = %job.job_id(),
                    max_retries = %max_retries,
                    "Job exceeded max retries, moving to DLQ"
                );
            } else {
                warn!(
                    job_id = %job.job_id(),
                    error_category = ?category,
                    "Permanent error, moving to DLQ without retry"
                );
            }

            self.consumer.move_to_dlq(job, &error.to_string()).await?;
            self.consumer.ack(message_id).await?;
            return Ok(());
        }

        let attempt = job.retry_count();
        let delay_ms = error.backoff_delay_ms(attempt);

        info!(
            job_id = %job.job_id(),
            retry_attempt = %(attempt + 1),
            delay_ms = %delay_ms,
            error_category = ?category,
            "Scheduling job retry with backoff"
        );

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let retry_job = job.with_retry();
        self.consumer.requeue(&retry_job).await?;
        self.consumer.ack(message_id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
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
                retry_count: self.retry_count + 1,
                ..self.clone()
            }
        }
    }

    #[test]
    fn stream_job_trait_defaults() {
        let job = TestJob {
            id: "job-1".to_string(),
            retry_count: 0,
        };

        assert_eq!(job.job_id(), "job-1");
        assert_eq!(job.retry_count(), 0);
        assert_eq!(job.max_retries(), 3);
        assert!(!job.exceeded_max_retries(3));

        let retry = job.with_retry();
        assert_eq!(retry.retry_count(), 1);
    }
}
