//! Safe execution: run fallible code and get an [`Outcome`](crate::Outcome) back.
//!
//! An operation can fail by returning `Err` or by panicking. Both are
//! captured as a [`Fault`], passed through the catch transform (or wrapped in
//! [`UnhandledException`] when there is none) and delivered as `Err`, never
//! as an unwinding panic.
//!
//! # Quick Start
//!
//! ```rust
//! use okresult::{safe_with, Outcome, SafeOptions};
//!
//! let outcome = safe_with(SafeOptions {
//!     try_: || "x".parse::<i32>(),
//!     catch: |_| "bad input",
//! });
//! assert_eq!(outcome, Outcome::Err("bad input"));
//! ```
//!
//! # Retrying
//!
//! - [`Safe`] re-runs a blocking operation immediately, up to
//!   `RetryPolicy::attempts` more times.
//! - [`SafeAsync`] re-runs an async operation and sleeps between attempts
//!   according to the policy's delay and [`Backoff`].
//!
//! ```rust
//! use okresult::{RetryPolicy, SafeAsync};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let outcome = SafeAsync::new(|| async { Err::<(), _>("unavailable") })
//!     .catch(|fault| async move { fault.to_string() })
//!     .retry(RetryPolicy::constant(Duration::from_millis(1)).with_attempts(2))
//!     .retry_if(|e: &String| e.contains("unavailable"))
//!     .run()
//!     .await;
//!
//! assert_eq!(outcome.unwrap_err(), "unavailable");
//! # });
//! ```
//!
//! # Defects
//!
//! The catch transform and the retry predicate must not panic. If one does,
//! the executor stops and unwinds with a [`Defect`] payload instead of
//! returning. Defects are never retried and never turned into `Err`.

mod blocking;
mod catch;
mod error;
mod guard;
#[cfg(feature = "async")]
mod nonblocking;
mod policy;

pub use blocking::{safe, safe_with, Safe};
pub use catch::{AsyncCatch, Catch, CatchWith, SafeOptions, Unhandled};
pub use error::{Defect, Fault, PanicPayload, TimeoutError, UnhandledException};
#[cfg(feature = "async")]
pub use nonblocking::{safe_async, safe_async_with, SafeAsync};
pub use policy::{AlwaysRetry, Backoff, JitterStrategy, RetryIf, RetryPolicy, RetryPredicate};
