//! # okresult
//!
//! Explicit `Ok`/`Err` outcomes, and safe execution of code that may fail.
//!
//! ## Philosophy
//!
//! Failures are data. An operation that returns `Err` or panics is turned
//! into an [`Outcome`] value the caller can map, chain, fold, or retry, so
//! nothing unwinds through your business logic. The only panics left are the
//! explicit `unwrap`/`expect` escape hatches and [`Defect`]s: bugs in your own
//! catch transform or retry predicate.
//!
//! ## Quick Example
//!
//! ```rust
//! use okresult::{Outcome, RetryPolicy, Safe};
//!
//! #[derive(Debug, PartialEq)]
//! enum ConfigError {
//!     Invalid(String),
//!     Crashed,
//! }
//!
//! let outcome = Safe::new(|| "8080".parse::<u16>())
//!     .catch(|fault| match fault.into_raised() {
//!         Some(e) => ConfigError::Invalid(e.to_string()),
//!         None => ConfigError::Crashed,
//!     })
//!     .retry(RetryPolicy::times(2))
//!     .run()
//!     .map(|port| port + 1);
//!
//! assert_eq!(outcome, Outcome::Ok(8081));
//! ```
//!
//! ## Modules
//!
//! - [`outcome`]: the [`Outcome`] type and its combinators
//! - [`curried`]: data-last forms of the combinators, for use with [`Outcome::pipe`]
//! - [`safe`]: blocking and async executors with retry and backoff
//! - [`testing`]: assertion macros and helpers for tests
//!
//! ## Features
//!
//! - `async` (default): [`SafeAsync`] and timeouts, backed by tokio
//! - `tracing`: debug events for retries, error events for defects
//! - `serde`: serialize [`Outcome`] and load [`RetryPolicy`] from config
//! - `jitter`: randomized retry delays
//! - `proptest`: `Arbitrary` for [`Outcome`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod curried;
pub mod outcome;
pub mod safe;
pub mod testing;

// Re-exports
pub use outcome::{Matcher, Outcome};
pub use safe::{
    safe, safe_with, AlwaysRetry, AsyncCatch, Backoff, Catch, CatchWith, Defect, Fault,
    JitterStrategy, PanicPayload, RetryIf, RetryPolicy, RetryPredicate, Safe, SafeOptions,
    TimeoutError, Unhandled, UnhandledException,
};
#[cfg(feature = "async")]
pub use safe::{safe_async, safe_async_with, SafeAsync};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::outcome::{Matcher, Outcome};
    pub use crate::safe::{
        safe, safe_with, Backoff, Defect, Fault, RetryPolicy, Safe, SafeOptions,
        UnhandledException,
    };
    #[cfg(feature = "async")]
    pub use crate::safe::{safe_async, safe_async_with, SafeAsync};
}
