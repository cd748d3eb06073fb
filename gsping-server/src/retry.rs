//! Exponential backoff policy and retry driver
//!
//! The policy is pure: it only answers "may I try again?" and "how long do I
//! wait?". [`retry`] applies it to an async operation.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Default delay before the first retry.
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Default growth factor between consecutive delays.
const DEFAULT_MULTIPLIER: f64 = 1.5;

/// Default ceiling for a single delay.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

/// Exponential backoff policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Backoff multiplier (e.g., 2.0 doubles the delay every attempt).
    pub multiplier: f64,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Total attempts allowed, `None` for unbounded.
    pub max_attempts: Option<u32>,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            max_delay: DEFAULT_MAX_DELAY,
            max_attempts: None,
        }
    }
}

impl ExponentialBackoff {
    /// Unbounded policy with default timings.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Limit the policy to `attempts` total attempts (minimum 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay to wait after `attempt` failed attempts (1-based).
    ///
    /// Grows as `initial_delay * multiplier^(attempt - 1)`, clamped to `max_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);

        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }

        Duration::from_secs_f64(secs.max(0.0))
    }

    /// Whether another attempt may follow `attempt` failed attempts.
    pub fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempt < max)
    }
}

/// Returned by [`retry`] when the policy runs out of attempts.
#[derive(Debug)]
pub struct Exhausted<E> {
    /// Attempts made, including the final one.
    pub attempts: u32,
    /// Error from the final attempt.
    pub last_error: E,
}

/// Run `op` until it succeeds or `policy` is exhausted.
///
/// `op` receives the 1-based attempt number. Failures are logged at `warn`
/// together with the delay before the next attempt.
pub async fn retry<T, E, F, Fut>(policy: &ExponentialBackoff, mut op: F) -> Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u32 = 0;

    loop {
        attempt = attempt.saturating_add(1);

        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, "operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if policy.allows(attempt) => {
                let delay = policy.delay(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(Exhausted {
                    attempts: attempt,
                    last_error: e,
                });
            }
        }
    }
}
