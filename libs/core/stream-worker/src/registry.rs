//! Stream definitions.
//!
//! Each domain implements [`StreamDef`] to pin down its stream name,
//! consumer group, and DLQ in one place, keeping producer and worker in
//! agreement.

/// Stream definition trait.
///
/// # Example
///
/// ```rust,ignore
/// use stream_worker::StreamDef;
///
/// pub struct CourseUpdateStream;
///
/// impl StreamDef for CourseUpdateStream {
///     const STREAM_NAME: &'static str = "courses:updates";
///     const CONSUMER_GROUP: &'static str = "notify_workers";
///     const DLQ_STREAM: &'static str = "courses:updates:dlq";
/// }
/// ```
pub trait StreamDef: Send + Sync {
    /// The Redis stream name (e.g., "courses:updates").
    const STREAM_NAME: &'static str;

    /// The consumer group name for this stream.
    const CONSUMER_GROUP: &'static str;

    /// The dead letter queue stream name for failed jobs.
    const DLQ_STREAM: &'static str;

    /// Maximum stream length before auto-trim (MAXLEN).
    /// Default: 100,000 entries.
    const MAX_LENGTH: i64 = 100_000;

    /// Poll interval when reads are non-blocking. Default: 1s.
    const POLL_INTERVAL_MS: u64 = 1000;

    /// Batch size for reading messages. Default: 10.
    const BATCH_SIZE: usize = 10;

    /// Idle time before an abandoned message may be claimed. Default: 30s.
    const CLAIM_TIMEOUT_MS: u64 = 30_000;

    /// Get the stream name.
    fn stream_name() -> &'static str {
        Self::STREAM_NAME
    }

    /// Get the consumer group name.
    fn consumer_group() -> &'static str {
        Self::CONSUMER_GROUP
    }

    /// Get the DLQ stream name.
    fn dlq_stream() -> &'static str {
        Self::DLQ_STREAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestStream;
    impl StreamDef for TestStream {
        const STREAM_NAME: &'static str = "test:stream";
        const CONSUMER_GROUP: &'static str = "test_workers";
        const DLQ_STREAM: &'static str = "test:dlq";
    }

    #[test]
    fn stream_def_defaults() {
        assert_eq!(TestStream::stream_name(), "test:stream");
        assert_eq!(TestStream::consumer_group(), "test_workers");
        assert_eq!(TestStream::dlq_stream(), "test:dlq");
        assert_eq!(TestStream::MAX_LENGTH, 100_000);
        assert_eq!(TestStream::BATCH_SIZE, 10);
    }
}
