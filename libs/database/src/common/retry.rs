use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff for startup connection attempts.
///
/// The default allows 3 retries, waiting 100ms, then 200ms, then 400ms,
/// each scaled by a jitter factor in [0.5, 1.0).
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Waits between attempts, before jitter: doubling, capped at `max_delay`.
    fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        std::iter::successors(Some(self.initial_delay), |delay| {
            Some((*delay * 2).min(self.max_delay))
        })
        .take(self.max_retries as usize)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            use_jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or every retry has failed.
///
/// The error of the final attempt is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = config.delays();
    let mut attempt: u32 = 1;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        let Some(delay) = delays.next() else {
            warn!(attempts = attempt, %error, "Giving up");
            return Err(error);
        };
        let delay = if config.use_jitter { jitter(delay) } else { delay };

        warn!(attempt, %error, retry_in_ms = delay.as_millis() as u64, "Attempt failed, retrying");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

fn jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = RandomState::new().hash_one(std::time::SystemTime::now()) % 50 + 50;
    delay * percent as u32 / 100
}
