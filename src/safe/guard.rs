//! Panic capture for operations and defect escalation for handlers.

use std::any::Any;
#[cfg(feature = "async")]
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "async")]
use futures::FutureExt;

use crate::safe::error::{Defect, PanicPayload};

pub(crate) const CATCH_PANICKED: &str = "safe catch handler panicked";
pub(crate) const PREDICATE_PANICKED: &str = "retry predicate panicked";

/// Run an operation, turning a panic into a payload.
///
/// A `Defect` unwinding from a nested executor keeps unwinding.
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> Result<T, PanicPayload> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(pass_defects)
}

/// Async [`capture`]: covers both creating the future and polling it.
#[cfg(feature = "async")]
pub(crate) async fn capture_async<Fut>(
    make: impl FnOnce() -> Fut,
) -> Result<Fut::Output, PanicPayload>
where
    Fut: Future,
{
    let fut = capture(make)?;
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(pass_defects)
}

/// Run a handler that must not panic; escalate if it does.
pub(crate) fn or_defect<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => escalate(message, payload),
    }
}

/// Async [`or_defect`].
#[cfg(feature = "async")]
pub(crate) async fn or_defect_async<Fut>(
    message: &'static str,
    make: impl FnOnce() -> Fut,
) -> Fut::Output
where
    Fut: Future,
{
    let fut = or_defect(message, make);
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(value) => value,
        Err(payload) => escalate(message, payload),
    }
}

fn pass_defects(payload: Box<dyn Any + Send>) -> PanicPayload {
    if payload.is::<Defect>() {
        panic::resume_unwind(payload);
    }
    PanicPayload::new(payload)
}

fn escalate(message: &'static str, payload: Box<dyn Any + Send>) -> ! {
    if payload.is::<Defect>() {
        panic::resume_unwind(payload);
    }
    let cause = PanicPayload::new(payload);
    #[cfg(feature = "tracing")]
    tracing::error!(cause = %cause, "{}", message);
    panic::panic_any(Defect::new(message, cause))
}
