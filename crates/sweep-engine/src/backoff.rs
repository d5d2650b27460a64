use std::time::Duration;

/// Source of jitter draws for the backoff computation.
///
/// Injected so retry timing is reproducible under test.
pub trait JitterSource: Send + Sync + 'static {
    /// Draw one sample in `[0, 1)` seconds.
    fn sample(&self) -> f64;
}

/// Uniform jitter from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn sample(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Exponential backoff with a fixed ceiling.
///
/// `next_delay` doubles the previous delay and adds the jitter draw,
/// capped at `max`. The sequence is non-decreasing for any jitter in
/// `[0, 1)` and never exceeds the ceiling.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Hard ceiling on any computed delay.
    pub max: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            first: Duration::from_secs(1),
            max: Duration::from_secs(60),
        }
    }
}

impl BackoffPolicy {
    /// Compute the delay following `previous` for the given jitter draw.
    pub fn next_delay(&self, previous: Duration, jitter: f64) -> Duration {
        let jitter = jitter.clamp(0.0, 1.0);
        let next = previous.as_secs_f64() * 2.0 + jitter;
        Duration::from_secs_f64(next.min(self.max.as_secs_f64()))
    }
}
