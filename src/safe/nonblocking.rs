//! The asynchronous safe executor.

use std::future::Future;
use std::time::Duration;

use crate::outcome::Outcome;
use crate::safe::catch::{AsyncCatch, CatchWith, SafeOptions, Unhandled};
use crate::safe::error::{Fault, TimeoutError, UnhandledException};
use crate::safe::guard::{self, CATCH_PANICKED, PREDICATE_PANICKED};
use crate::safe::policy::{AlwaysRetry, RetryIf, RetryPolicy, RetryPredicate};

/// Runs an asynchronous operation and captures its failure as an [`Outcome`].
///
/// The async counterpart of [`Safe`](crate::Safe). The operation is a
/// factory: each attempt calls it again to get a fresh future. Between
/// attempts the executor sleeps for the policy's delay (skipped when zero).
///
/// Dropping the future returned by [`run`](SafeAsync::run) cancels the
/// execution, including any pending delay.
///
/// # Example
///
/// ```rust
/// use okresult::{Outcome, RetryPolicy, SafeAsync};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let mut calls = 0;
/// let outcome = SafeAsync::new(|| {
///     calls += 1;
///     let n = calls;
///     async move { if n < 3 { Err("flaky") } else { Ok(n) } }
/// })
/// .catch(|fault| async move { fault.into_raised().unwrap_or("panicked") })
/// .retry(RetryPolicy::exponential(Duration::from_millis(1)).with_attempts(5))
/// .run()
/// .await;
///
/// assert_eq!(outcome, Outcome::Ok(3));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct SafeAsync<F, C = Unhandled, P = AlwaysRetry> {
    op: F,
    catch: C,
    policy: RetryPolicy,
    predicate: P,
}

impl<F> SafeAsync<F> {
    /// Wrap an operation factory; faults become [`UnhandledException`].
    pub fn new(op: F) -> Self {
        SafeAsync {
            op,
            catch: Unhandled,
            policy: RetryPolicy::default(),
            predicate: AlwaysRetry,
        }
    }
}

impl<F, G> From<SafeOptions<F, G>> for SafeAsync<F, CatchWith<G>> {
    fn from(options: SafeOptions<F, G>) -> Self {
        SafeAsync {
            op: options.try_,
            catch: CatchWith(options.catch),
            policy: RetryPolicy::default(),
            predicate: AlwaysRetry,
        }
    }
}

impl<F, C, P> SafeAsync<F, C, P> {
    /// Map faults through an asynchronous `catch` transform.
    ///
    /// A panic while creating or polling the transform's future is a
    /// [`Defect`](crate::Defect).
    pub fn catch<Fut, A, X, G, CFut>(self, catch: G) -> SafeAsync<F, CatchWith<G>, P>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<A, X>>,
        G: FnMut(Fault<X>) -> CFut,
        CFut: Future,
    {
        SafeAsync {
            op: self.op,
            catch: CatchWith(catch),
            policy: self.policy,
            predicate: self.predicate,
        }
    }

    /// Set the retry policy.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Only retry errors for which `predicate` returns true.
    ///
    /// The predicate is synchronous and sees the error after the catch
    /// transform.
    pub fn retry_if<Fut, A, X, Q>(self, predicate: Q) -> SafeAsync<F, C, RetryIf<Q>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<A, X>>,
        C: AsyncCatch<X>,
        Q: FnMut(&C::Error) -> bool,
    {
        SafeAsync {
            op: self.op,
            catch: self.catch,
            policy: self.policy,
            predicate: RetryIf(predicate),
        }
    }

    /// Execute, retrying per policy with delays, and return the last outcome.
    pub async fn run<Fut, A, X>(mut self) -> Outcome<A, C::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<A, X>>,
        C: AsyncCatch<X>,
        P: RetryPredicate<C::Error>,
    {
        let mut outcome = self.attempt().await;

        for retry in 0..self.policy.attempts() {
            let proceed = match &outcome {
                Outcome::Ok(_) => break,
                Outcome::Err(error) => {
                    let predicate = &mut self.predicate;
                    guard::or_defect(PREDICATE_PANICKED, || predicate.should_retry(error))
                }
            };
            if !proceed {
                #[cfg(feature = "tracing")]
                tracing::debug!(retry, "retry predicate declined, keeping error");
                break;
            }

            let delay = self.policy.delay_with_jitter(retry);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                retry,
                attempt = retry + 2,
                delay_ms = delay.as_millis() as u64,
                "retrying after failure"
            );

            pause(delay).await;
            outcome = self.attempt().await;
        }

        outcome
    }

    /// Like [`run`](SafeAsync::run), bounded by an overall time limit.
    ///
    /// The limit covers every attempt and delay. On expiry the in-flight
    /// attempt is dropped and no further attempts start.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::SafeAsync;
    /// use std::convert::Infallible;
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let result = SafeAsync::new(|| async {
    ///     tokio::time::sleep(Duration::from_secs(10)).await;
    ///     Ok::<_, Infallible>(())
    /// })
    /// .run_with_timeout(Duration::from_millis(10))
    /// .await;
    ///
    /// assert!(result.is_err());
    /// # });
    /// ```
    pub async fn run_with_timeout<Fut, A, X>(
        self,
        limit: Duration,
    ) -> Result<Outcome<A, C::Error>, TimeoutError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<A, X>>,
        C: AsyncCatch<X>,
        P: RetryPredicate<C::Error>,
    {
        match tokio::time::timeout(limit, self.run()).await {
            Ok(outcome) => Ok(outcome),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(limit_ms = limit.as_millis() as u64, "safe execution timed out");
                Err(TimeoutError::new(limit))
            }
        }
    }

    async fn attempt<Fut, A, X>(&mut self) -> Outcome<A, C::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<A, X>>,
        C: AsyncCatch<X>,
    {
        let fault = match guard::capture_async(&mut self.op).await {
            Ok(Ok(value)) => return Outcome::Ok(value),
            Ok(Err(raised)) => Fault::Raised(raised),
            Err(payload) => Fault::Panicked(payload),
        };
        let catch = &mut self.catch;
        Outcome::Err(guard::or_defect_async(CATCH_PANICKED, || catch.catch(fault)).await)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Run an async operation once, wrapping any fault in [`UnhandledException`].
///
/// # Example
///
/// ```rust
/// use okresult::safe_async;
///
/// # tokio_test::block_on(async {
/// let outcome = safe_async(|| async { "42".parse::<i32>() }).await;
/// assert_eq!(outcome.unwrap(), 42);
/// # });
/// ```
pub async fn safe_async<A, X, F, Fut>(op: F) -> Outcome<A, UnhandledException<X>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<A, X>>,
{
    SafeAsync::new(op).run().await
}

/// Run an async operation once, mapping any fault through its async catch transform.
pub async fn safe_async_with<A, X, F, Fut, G, CFut>(
    options: SafeOptions<F, G>,
) -> Outcome<A, CFut::Output>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<A, X>>,
    G: FnMut(Fault<X>) -> CFut,
    CFut: Future,
{
    let safe: SafeAsync<F, CatchWith<G>> = options.into();
    safe.run().await
}
