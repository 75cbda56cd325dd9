//! Fixed-delay bounded retry
//!
//! A [`Retrier`] re-invokes a fallible operation until it succeeds or the
//! configured attempt count runs out, sleeping a fixed delay between
//! attempts. Exhaustion always re-surfaces as [`RetriesExhaustedError`]
//! wrapping the last underlying failure; the retrier never swallows a
//! terminal error into a default value.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::sleeper::{Sleeper, ThreadSleeper};
use crate::error::Diagnostic;

/// Boxed operation failure accepted by the retrier
pub type OperationError = Box<dyn std::error::Error + Send + Sync>;

/// Fixed-delay retry policy.
///
/// The delay is a literal constant between attempts: no backoff, no jitter.
/// Serializes with humantime durations so policies can sit in config files:
/// `{"max_attempts": 3, "delay": "250ms"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first (always >= 1)
    pub max_attempts: u32,
    /// Delay between attempts; never applied after the final failure
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy, clamping `max_attempts` to at least one attempt
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Exactly one attempt, no delay
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// Terminal failure raised once the configured attempt count is exhausted.
///
/// Always carries the last underlying error as its source, so downstream
/// handlers can inspect the original trigger rather than just the wrapper.
#[derive(Debug, Error)]
#[error("operation failed after {attempts} attempt(s)")]
pub struct RetriesExhaustedError {
    attempts: u32,
    #[source]
    source: OperationError,
}

impl RetriesExhaustedError {
    /// The configured attempt count that was exhausted
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The error caught on the final attempt
    pub fn last_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl Diagnostic for RetriesExhaustedError {
    fn kind(&self) -> &str {
        "retry.exhausted"
    }
}

/// Re-invokes a fallible operation until success or attempt exhaustion.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use recourse_core::{Retrier, RetryPolicy};
///
/// let retrier = Retrier::new(RetryPolicy::new(3, Duration::from_millis(50)));
/// let mut calls = 0;
/// let value = retrier.run(|| {
///     calls += 1;
///     if calls < 2 {
///         Err("warming up")
///     } else {
///         Ok(calls)
///     }
/// });
/// assert_eq!(value.unwrap(), 2);
/// ```
///
/// Retriers compose: an inner retrier's exhaustion is a single failure to an
/// outer one, consuming one of the outer's attempts.
#[derive(Debug, Clone)]
pub struct Retrier<S: Sleeper = ThreadSleeper> {
    policy: RetryPolicy,
    sleeper: S,
}

impl Retrier<ThreadSleeper> {
    /// Production retrier sleeping on the calling thread
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sleeper: ThreadSleeper,
        }
    }
}

impl<S: Sleeper> Retrier<S> {
    /// Retrier with an injected delay capability
    pub fn with_sleeper(policy: RetryPolicy, sleeper: S) -> Self {
        Self { policy, sleeper }
    }

    /// The configured policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The delay capability in use
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `operation` up to `max_attempts` times, sleeping the configured
    /// delay between attempts.
    ///
    /// Returns the first success immediately. After the final failure the
    /// last caught error is wrapped in [`RetriesExhaustedError`] with no
    /// trailing delay.
    pub fn run<T, E, F>(&self, mut operation: F) -> Result<T, RetriesExhaustedError>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<OperationError>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            match operation() {
                Ok(value) => {
                    if attempts > 0 {
                        debug!(attempts = attempts + 1, "operation succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    let error = error.into();
                    attempts += 1;
                    if attempts >= max_attempts {
                        warn!(attempts, error = %error, "retries exhausted");
                        return Err(RetriesExhaustedError {
                            attempts: max_attempts,
                            source: error,
                        });
                    }
                    debug!(
                        attempt = attempts,
                        max_attempts,
                        delay = ?self.policy.delay,
                        error = %error,
                        "attempt failed, retrying"
                    );
                    self.sleeper.sleep(self.policy.delay);
                }
            }
        }
    }
}

/// Convenience wrapper for a one-off retried call with the production
/// sleeper
pub fn retry<T, E, F>(policy: RetryPolicy, operation: F) -> Result<T, RetriesExhaustedError>
where
    F: FnMut() -> Result<T, E>,
    E: Into<OperationError>,
{
    Retrier::new(policy).run(operation)
}
