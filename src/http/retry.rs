//! Retry configuration for transport calls.

use std::time::Duration;

/// Configuration for retry behavior.
///
/// Retryable outcomes are transport-level failures, HTTP 429, and any 5xx
/// (see [`HttpError::is_retryable`](crate::error::HttpError::is_retryable));
/// everything else fails on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total transport attempts for one logical call, including the first.
    /// Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Delay before the first re-attempt.
    pub initial_delay: Duration,
    /// Cap applied to the computed delay.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Config with the given total attempt count and defaults otherwise.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Disable retries entirely: one attempt per logical call.
    pub fn none() -> Self {
        Self::new(1)
    }

    /// Set the delay before the first re-attempt.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Disable jitter (deterministic delays).
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay taken after failed attempt number `attempt` (1-indexed).
    ///
    /// Pure function of the attempt number: base × factor^(attempt−1),
    /// capped at `max_delay`, jittered when enabled. Schedules are
    /// testable without sleeping.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16) as i32;
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(exponent);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_api_guidance() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay.as_millis(), 500);
        assert_eq!(config.max_delay.as_secs(), 4);
        assert!(config.jitter);
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let config = RetryConfig::new(5)
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(10))
            .without_jitter();
        assert_eq!(config.delay_for_attempt(1).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 400);
        assert_eq!(config.delay_for_attempt(4).as_millis(), 800);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig::new(8)
            .with_initial_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(4))
            .without_jitter();
        assert_eq!(config.delay_for_attempt(10).as_millis(), 4000);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let config = RetryConfig::new(3).with_initial_delay(Duration::from_millis(400));
        for _ in 0..100 {
            let ms = config.delay_for_attempt(1).as_millis() as f64;
            assert!((300.0..=500.0).contains(&ms), "delay out of bounds: {ms}");
        }
    }
}
