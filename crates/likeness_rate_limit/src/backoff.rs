//! Exponential backoff schedule for rate-limited requests.

use crate::RefinementConfig;
use rand::Rng;
use std::time::Duration;

/// Delay schedule `2^attempt * base + uniform jitter in [0, max_jitter)`.
///
/// `attempt` counts from 1, so the first delay is twice the base. The
/// iterator yields one delay fewer than the attempt budget: a budget of 5
/// attempts produces 4 delays.
///
/// # Examples
///
/// ```
/// use likeness_rate_limit::RateLimitBackoff;
/// use std::time::Duration;
///
/// let delays: Vec<_> = RateLimitBackoff::new(5, 1000, 0).collect();
/// assert_eq!(
///     delays,
///     vec![
///         Duration::from_millis(2000),
///         Duration::from_millis(4000),
///         Duration::from_millis(8000),
///         Duration::from_millis(16000),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RateLimitBackoff {
    attempt: u32,
    max_attempts: u32,
    base_delay_ms: u64,
    max_jitter_ms: u64,
}

impl RateLimitBackoff {
    /// Schedule for `max_attempts` total attempts.
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_jitter_ms: u64) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            base_delay_ms,
            max_jitter_ms,
        }
    }

    /// Schedule described by the refinement configuration.
    pub fn from_config(config: &RefinementConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.base_delay_ms,
            config.max_jitter_ms,
        )
    }

    fn jitter(&self) -> u64 {
        if self.max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.max_jitter_ms)
        }
    }
}

impl Iterator for RateLimitBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.attempt + 1 >= self.max_attempts {
            return None;
        }
        self.attempt += 1;
        let exponential = 2_u64
            .saturating_pow(self.attempt)
            .saturating_mul(self.base_delay_ms);
        Some(Duration::from_millis(
            exponential.saturating_add(self.jitter()),
        ))
    }
}
