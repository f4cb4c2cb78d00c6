//! The blocking safe executor.

use crate::outcome::Outcome;
use crate::safe::catch::{Catch, CatchWith, SafeOptions, Unhandled};
use crate::safe::error::{Fault, UnhandledException};
use crate::safe::guard::{self, CATCH_PANICKED, PREDICATE_PANICKED};
use crate::safe::policy::{AlwaysRetry, RetryIf, RetryPolicy, RetryPredicate};

/// Runs a fallible operation and captures its failure as an [`Outcome`].
///
/// Built with [`Safe::new`] (or from [`SafeOptions`]) and configured with
/// [`catch`](Safe::catch), [`retry`](Safe::retry) and
/// [`retry_if`](Safe::retry_if). Nothing runs until [`run`](Safe::run).
///
/// The operation is retried from scratch while retries remain, the latest
/// attempt failed, and the predicate approves. The blocking executor never
/// waits between attempts; only `attempts` of the policy is used.
///
/// # Example
///
/// ```rust
/// use okresult::{Outcome, RetryPolicy, Safe};
///
/// let mut calls = 0;
/// let outcome = Safe::new(|| {
///     calls += 1;
///     if calls < 3 { Err("flaky") } else { Ok(calls) }
/// })
/// .catch(|fault| fault.into_raised().unwrap_or("panicked"))
/// .retry(RetryPolicy::times(5))
/// .run();
///
/// assert_eq!(outcome, Outcome::Ok(3));
/// ```
#[derive(Debug, Clone)]
pub struct Safe<F, C = Unhandled, P = AlwaysRetry> {
    op: F,
    catch: C,
    policy: RetryPolicy,
    predicate: P,
}

impl<F> Safe<F> {
    /// Wrap an operation; faults become [`UnhandledException`] and nothing is retried.
    pub fn new(op: F) -> Self {
        Safe {
            op,
            catch: Unhandled,
            policy: RetryPolicy::default(),
            predicate: AlwaysRetry,
        }
    }
}

impl<F, G> From<SafeOptions<F, G>> for Safe<F, CatchWith<G>> {
    fn from(options: SafeOptions<F, G>) -> Self {
        Safe {
            op: options.try_,
            catch: CatchWith(options.catch),
            policy: RetryPolicy::default(),
            predicate: AlwaysRetry,
        }
    }
}

impl<F, C, P> Safe<F, C, P> {
    /// Map faults through `catch` instead of wrapping them.
    ///
    /// A panic inside `catch` is a [`Defect`](crate::Defect): it unwinds out
    /// of [`run`](Safe::run) and is never retried.
    pub fn catch<A, X, E, G>(self, catch: G) -> Safe<F, CatchWith<G>, P>
    where
        F: FnMut() -> Result<A, X>,
        G: FnMut(Fault<X>) -> E,
    {
        Safe {
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
    /// The predicate sees the error as it will be returned, i.e. after the
    /// catch transform, so set [`catch`](Safe::catch) first. A panic inside
    /// the predicate is a [`Defect`](crate::Defect).
    pub fn retry_if<A, X, Q>(self, predicate: Q) -> Safe<F, C, RetryIf<Q>>
    where
        F: FnMut() -> Result<A, X>,
        C: Catch<X>,
        Q: FnMut(&C::Error) -> bool,
    {
        Safe {
            op: self.op,
            catch: self.catch,
            policy: self.policy,
            predicate: RetryIf(predicate),
        }
    }

    /// Execute, retrying per policy, and return the last outcome.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn run<A, X>(mut self) -> Outcome<A, C::Error>
    where
        F: FnMut() -> Result<A, X>,
        C: Catch<X>,
        P: RetryPredicate<C::Error>,
    {
        let mut outcome = self.attempt();

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

            #[cfg(feature = "tracing")]
            tracing::debug!(retry, attempt = retry + 2, "retrying after failure");

            outcome = self.attempt();
        }

        outcome
    }

    fn attempt<A, X>(&mut self) -> Outcome<A, C::Error>
    where
        F: FnMut() -> Result<A, X>,
        C: Catch<X>,
    {
        let fault = match guard::capture(&mut self.op) {
            Ok(Ok(value)) => return Outcome::Ok(value),
            Ok(Err(raised)) => Fault::Raised(raised),
            Err(payload) => Fault::Panicked(payload),
        };
        let catch = &mut self.catch;
        Outcome::Err(guard::or_defect(CATCH_PANICKED, || catch.catch(fault)))
    }
}

/// Run `op` once, wrapping any fault in [`UnhandledException`].
///
/// # Example
///
/// ```rust
/// use okresult::safe;
/// use std::convert::Infallible;
///
/// let divisor = std::hint::black_box(0);
/// let outcome = safe(|| Ok::<_, Infallible>(1 / divisor));
///
/// let unhandled = outcome.unwrap_err();
/// assert!(unhandled.cause().panic_message().unwrap().contains("divide by zero"));
/// ```
pub fn safe<A, X, F>(op: F) -> Outcome<A, UnhandledException<X>>
where
    F: FnMut() -> Result<A, X>,
{
    Safe::new(op).run()
}

/// Run an operation once, mapping any fault through its catch transform.
pub fn safe_with<A, X, E, F, G>(options: SafeOptions<F, G>) -> Outcome<A, E>
where
    F: FnMut() -> Result<A, X>,
    G: FnMut(Fault<X>) -> E,
{
    let safe: Safe<F, CatchWith<G>> = options.into();
    safe.run()
}
