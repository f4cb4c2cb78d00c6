//! Catch transforms: how a [`Fault`] becomes the `Err` payload.

use std::future::{self, Future, Ready};

use crate::safe::error::{Fault, UnhandledException};

/// Converts a fault raised by the operation into an error value.
///
/// Implemented by [`Unhandled`] (no transform supplied) and [`CatchWith`].
pub trait Catch<X> {
    /// The error type placed in `Outcome::Err`.
    type Error;

    /// Convert the fault.
    fn catch(&mut self, fault: Fault<X>) -> Self::Error;
}

/// Asynchronous counterpart of [`Catch`].
pub trait AsyncCatch<X> {
    /// The error type placed in `Outcome::Err`.
    type Error;
    /// Future yielding the error.
    type Future: Future<Output = Self::Error>;

    /// Start converting the fault.
    fn catch(&mut self, fault: Fault<X>) -> Self::Future;
}

/// No catch transform: faults are wrapped in [`UnhandledException`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unhandled;

/// A caller-supplied catch transform.
#[derive(Debug, Clone, Copy)]
pub struct CatchWith<G>(pub G);

impl<X> Catch<X> for Unhandled {
    type Error = UnhandledException<X>;

    fn catch(&mut self, fault: Fault<X>) -> Self::Error {
        UnhandledException::new(fault)
    }
}

impl<X, E, G> Catch<X> for CatchWith<G>
where
    G: FnMut(Fault<X>) -> E,
{
    type Error = E;

    fn catch(&mut self, fault: Fault<X>) -> E {
        (self.0)(fault)
    }
}

impl<X> AsyncCatch<X> for Unhandled {
    type Error = UnhandledException<X>;
    type Future = Ready<UnhandledException<X>>;

    fn catch(&mut self, fault: Fault<X>) -> Self::Future {
        future::ready(UnhandledException::new(fault))
    }
}

impl<X, G, Fut> AsyncCatch<X> for CatchWith<G>
where
    G: FnMut(Fault<X>) -> Fut,
    Fut: Future,
{
    type Error = Fut::Output;
    type Future = Fut;

    fn catch(&mut self, fault: Fault<X>) -> Fut {
        (self.0)(fault)
    }
}

/// An operation paired with its catch transform.
///
/// # Example
///
/// ```rust
/// use okresult::{safe_with, Outcome, SafeOptions};
///
/// let outcome = safe_with(SafeOptions {
///     try_: || "x".parse::<i32>(),
///     catch: |_| "bad input",
/// });
/// assert_eq!(outcome, Outcome::Err("bad input"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SafeOptions<F, G> {
    /// The operation.
    pub try_: F,
    /// Maps a fault raised by the operation to the error value.
    pub catch: G,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safe::error::PanicPayload;

    #[test]
    fn test_unhandled_wraps_fault_verbatim() {
        let err = Catch::catch(&mut Unhandled, Fault::Raised("io error"));
        assert_eq!(err.cause().raised(), Some(&"io error"));
    }

    #[test]
    fn test_catch_with_receives_fault() {
        let mut catch = CatchWith(|fault: Fault<&str>| match fault {
            Fault::Raised(msg) => format!("raised {}", msg),
            Fault::Panicked(p) => format!("panicked {}", p),
        });
        assert_eq!(Catch::catch(&mut catch, Fault::Raised("x")), "raised x");
        assert_eq!(
            Catch::catch(&mut catch, Fault::Panicked(PanicPayload::new(Box::new("y")))),
            "panicked y"
        );
    }

    #[tokio::test]
    async fn test_async_catch_forms() {
        let err = AsyncCatch::catch(&mut Unhandled, Fault::Raised(5u8)).await;
        assert_eq!(err.into_cause().into_raised(), Some(5));

        let mut catch = CatchWith(|fault: Fault<u8>| async move { fault.into_raised().unwrap_or(0) * 2 });
        assert_eq!(AsyncCatch::catch(&mut catch, Fault::Raised(21)).await, 42);
    }
}
