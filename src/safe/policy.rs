//! Retry policy types and configuration.

use std::time::Duration;

/// How many times to retry, and how long to wait in between.
///
/// Policies are pure data: they describe retry behavior without executing
/// it, which keeps them easy to clone, compare, and load from configuration.
///
/// `attempts` counts retries, not the initial run: `with_attempts(3)` allows
/// up to 4 executions. The default policy never retries.
///
/// The blocking executor only looks at `attempts`. Delay, backoff and jitter
/// apply to the asynchronous executor.
///
/// # Examples
///
/// ```rust
/// use okresult::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::exponential(Duration::from_millis(100))
///     .with_attempts(3);
///
/// assert_eq!(policy.attempts(), 3);
/// assert_eq!(policy.backoff(), Backoff::Exponential);
/// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    attempts: u32,
    #[cfg_attr(feature = "serde", serde(rename = "delay_ms", with = "duration_ms"))]
    delay: Duration,
    backoff: Backoff,
    jitter: JitterStrategy,
}

/// How the delay grows from one retry to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Backoff {
    /// Same delay before every retry.
    #[default]
    Constant,
    /// Delay = base * (retry + 1).
    Linear,
    /// Delay = base * 2^retry.
    Exponential,
}

/// Strategy for adding randomness to delays.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum JitterStrategy {
    /// No jitter applied.
    #[default]
    None,
    /// Add ±percentage randomness to delay.
    Proportional(f64),
    /// Random delay between 0 and calculated delay.
    Full,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retry up to `n` times without waiting.
    pub fn times(n: u32) -> Self {
        Self::new().with_attempts(n)
    }

    /// Create a policy with constant delay between retries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okresult::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::constant(Duration::from_millis(500)).with_attempts(3);
    ///
    /// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(500));
    /// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(500));
    /// ```
    pub fn constant(delay: Duration) -> Self {
        Self::new().with_delay(delay)
    }

    /// Create a policy with linearly increasing delay.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okresult::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::linear(Duration::from_millis(100)).with_attempts(5);
    ///
    /// // Delay increases: 100ms, 200ms, 300ms, ...
    /// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_retry(1), Duration::from_millis(200));
    /// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(300));
    /// ```
    pub fn linear(base: Duration) -> Self {
        Self::new().with_delay(base).with_backoff(Backoff::Linear)
    }

    /// Create a policy with exponentially increasing delay.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okresult::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(Duration::from_millis(100)).with_attempts(5);
    ///
    /// // Delay doubles: 100ms, 200ms, 400ms, ...
    /// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_retry(1), Duration::from_millis(200));
    /// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(400));
    /// ```
    pub fn exponential(base: Duration) -> Self {
        Self::new().with_delay(base).with_backoff(Backoff::Exponential)
    }

    /// Set the maximum number of retries (not counting the initial attempt).
    pub fn with_attempts(mut self, n: u32) -> Self {
        self.attempts = n;
        self
    }

    /// Set the base delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Add proportional jitter to delays.
    ///
    /// The factor determines the range of randomness. For example, `0.25` means
    /// the actual delay will be ±25% of the calculated delay.
    ///
    /// The factor is clamped to `0.0..=1.0`; a non-finite factor means no jitter.
    ///
    /// **Note**: Requires the `jitter` feature. Without it, this method does nothing.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 0.0 };
        self.jitter = JitterStrategy::Proportional(factor);
        self
    }

    /// Use full jitter: a random delay between 0 and the calculated delay.
    ///
    /// **Note**: Requires the `jitter` feature. Without it, this method does nothing.
    pub fn with_full_jitter(mut self) -> Self {
        self.jitter = JitterStrategy::Full;
        self
    }

    /// Get the maximum number of retries.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Get the base delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Get the backoff strategy.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Get the jitter strategy.
    pub fn jitter(&self) -> &JitterStrategy {
        &self.jitter
    }

    /// Calculate the delay before retry `retry` (0-indexed).
    ///
    /// Retry 0 is the wait between the first and second attempts. The
    /// result does not depend on `attempts`; arithmetic saturates.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::Constant => self.delay,
            Backoff::Linear => self.delay.saturating_mul(retry.saturating_add(1)),
            Backoff::Exponential => self.delay.saturating_mul(2u32.saturating_pow(retry)),
        }
    }

    /// Calculate the delay with jitter applied.
    ///
    /// This is used internally by the async executor.
    #[doc(hidden)]
    pub fn delay_with_jitter(&self, retry: u32) -> Duration {
        self.jitter.apply(self.delay_for_retry(retry))
    }
}

impl JitterStrategy {
    /// Apply jitter to a calculated delay.
    pub fn apply(&self, base_delay: Duration) -> Duration {
        match self {
            JitterStrategy::None => base_delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Proportional(factor) => {
                use rand::Rng;
                let base_millis = base_delay.as_millis() as f64;
                let jitter_range = base_millis * factor;
                let min = (base_millis - jitter_range).max(0.0);
                let max = base_millis + jitter_range;
                if !max.is_finite() || max <= min {
                    return base_delay;
                }
                let jittered_millis = rand::rng().random_range(min..=max);
                Duration::from_millis(jittered_millis as u64)
            }
            #[cfg(not(feature = "jitter"))]
            JitterStrategy::Proportional(_) => base_delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Full => {
                use rand::Rng;
                let max_millis = base_delay.as_millis() as u64;
                if max_millis == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_millis(rand::rng().random_range(0..=max_millis))
                }
            }
            #[cfg(not(feature = "jitter"))]
            JitterStrategy::Full => base_delay,
        }
    }
}

/// Decides whether a given error should trigger another attempt.
///
/// Implemented by [`AlwaysRetry`] (the default) and [`RetryIf`]. Must be
/// total: a panic here is escalated as a [`Defect`](crate::Defect).
pub trait RetryPredicate<E> {
    /// Returns true to retry after `error`.
    fn should_retry(&mut self, error: &E) -> bool;
}

/// The default predicate: retry on every error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<E> RetryPredicate<E> for AlwaysRetry {
    fn should_retry(&mut self, _error: &E) -> bool {
        true
    }
}

/// A predicate backed by a closure.
///
/// Created by `retry_if` on the executors.
#[derive(Debug, Clone, Copy)]
pub struct RetryIf<P>(pub P);

impl<E, P> RetryPredicate<E> for RetryIf<P>
where
    P: FnMut(&E) -> bool,
{
    fn should_retry(&mut self, error: &E) -> bool {
        (self.0)(error)
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(delay.as_millis().min(u128::from(u64::MAX)) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
