use std::time::Duration;

/// Configuration for the sync pool
#[derive(Debug, Clone)]
pub struct SyncPoolConfig {
    /// Maximum character passes running at once.
    ///
    /// Each pass holds at most one database connection at a time, keep this below the
    /// connection pool size.
    pub max_concurrent_passes: usize,

    /// Maximum time a single character pass may run before it is cancelled (seconds).
    pub pass_timeout_seconds: u64,
}

impl SyncPoolConfig {
    /// Create a new configuration with the default pass timeout
    ///
    /// # Arguments
    /// * `max_concurrent_passes` - Maximum concurrent passes, at least 1
    pub fn new(max_concurrent_passes: usize) -> Self {
        Self {
            max_concurrent_passes: max_concurrent_passes.max(1),
            pass_timeout_seconds: 300, // 5 minutes
        }
    }

    pub fn with_pass_timeout(mut self, timeout: Duration) -> Self {
        self.pass_timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Get pass timeout as Duration
    pub fn pass_timeout(&self) -> Duration {
        Duration::from_secs(self.pass_timeout_seconds)
    }
}

impl Default for SyncPoolConfig {
    fn default() -> Self {
        Self::new(4)
    }
}
