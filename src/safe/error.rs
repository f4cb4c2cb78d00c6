//! Failure and defect types for safe execution.

use std::any::Any;
use std::fmt;
use std::time::Duration;

/// The payload of a panic captured inside an operation.
///
/// Holds the boxed value handed to the panic machinery without interpreting
/// it. [`message`](PanicPayload::message) recovers the text of the usual
/// `panic!("...")` forms.
pub struct PanicPayload {
    payload: Box<dyn Any + Send>,
}

impl PanicPayload {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// The panic message, when the payload is a `&str` or `String`.
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            Some(*s)
        } else {
            self.payload.downcast_ref::<String>().map(String::as_str)
        }
    }

    /// Borrow the raw payload.
    pub fn as_any(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    /// Take the raw payload, e.g. to pass it to `std::panic::resume_unwind`.
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => f.debug_tuple("PanicPayload").field(&msg).finish(),
            None => f.write_str("PanicPayload(<non-string payload>)"),
        }
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or("<non-string panic payload>"))
    }
}

/// A failure raised by an operation.
///
/// Operations fail either by returning `Err(x)` or by panicking. Both reach
/// the catch transform (or [`UnhandledException`]) as a `Fault`.
#[derive(Debug)]
pub enum Fault<X> {
    /// The operation returned `Err`.
    Raised(X),
    /// The operation panicked.
    Panicked(PanicPayload),
}

impl<X> Fault<X> {
    /// Returns true if the operation returned an error.
    pub fn is_raised(&self) -> bool {
        matches!(self, Fault::Raised(_))
    }

    /// Returns true if the operation panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panicked(_))
    }

    /// Get the returned error if present.
    pub fn raised(&self) -> Option<&X> {
        match self {
            Fault::Raised(x) => Some(x),
            Fault::Panicked(_) => None,
        }
    }

    /// Take the returned error if present.
    pub fn into_raised(self) -> Option<X> {
        match self {
            Fault::Raised(x) => Some(x),
            Fault::Panicked(_) => None,
        }
    }

    /// The panic message, if the operation panicked with one.
    pub fn panic_message(&self) -> Option<&str> {
        match self {
            Fault::Raised(_) => None,
            Fault::Panicked(payload) => payload.message(),
        }
    }
}

impl<X: fmt::Display> fmt::Display for Fault<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Raised(x) => write!(f, "{}", x),
            Fault::Panicked(payload) => write!(f, "panicked: {}", payload),
        }
    }
}

/// Error value used when no catch transform was supplied.
///
/// Wraps the original [`Fault`] verbatim.
///
/// # Examples
///
/// ```rust
/// use okresult::safe;
///
/// let outcome = safe(|| "x".parse::<i32>());
/// let unhandled = outcome.unwrap_err();
/// assert!(unhandled.cause().is_raised());
/// assert_eq!(unhandled.to_string(), "unhandled exception: invalid digit found in string");
/// ```
#[derive(Debug)]
pub struct UnhandledException<X> {
    cause: Fault<X>,
}

impl<X> UnhandledException<X> {
    /// Wrap a fault.
    pub fn new(cause: Fault<X>) -> Self {
        Self { cause }
    }

    /// Borrow the original fault.
    pub fn cause(&self) -> &Fault<X> {
        &self.cause
    }

    /// Extract the original fault.
    pub fn into_cause(self) -> Fault<X> {
        self.cause
    }
}

impl<X: fmt::Display> fmt::Display for UnhandledException<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unhandled exception: {}", self.cause)
    }
}

impl<X: std::error::Error + 'static> std::error::Error for UnhandledException<X> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Fault::Raised(x) => Some(x),
            Fault::Panicked(_) => None,
        }
    }
}

/// A fatal defect: a catch transform or retry predicate panicked.
///
/// Never surfaces as an `Err`. It is the payload of the panic that unwinds
/// out of the executor, carrying which handler failed and the original panic.
/// Recover it with [`catch_defect`](crate::testing::catch_defect) or by
/// downcasting the payload returned by `std::panic::catch_unwind`.
pub struct Defect {
    message: &'static str,
    cause: PanicPayload,
}

impl Defect {
    pub(crate) fn new(message: &'static str, cause: PanicPayload) -> Self {
        Self { message, cause }
    }

    /// Which handler failed.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The panic raised by the handler.
    pub fn cause(&self) -> &PanicPayload {
        &self.cause
    }
}

impl fmt::Debug for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defect")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.cause)
    }
}

impl std::error::Error for Defect {}

/// Returned when a whole safe execution exceeded its time limit.
///
/// Sits outside the [`Outcome`](crate::Outcome): a timeout aborts the call
/// instead of becoming an error value, so it is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutError {
    /// The limit that was exceeded.
    pub duration: Duration,
}

impl TimeoutError {
    /// Create a timeout error.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation timed out after {:?}", self.duration)
    }
}

impl std::error::Error for TimeoutError {}

#[cfg(test)]
mod error_tests {
    use super::*;
    use std::error::Error as _;

    fn payload(value: impl Any + Send) -> PanicPayload {
        PanicPayload::new(Box::new(value))
    }

    #[test]
    fn test_panic_payload_message() {
        assert_eq!(payload("static").message(), Some("static"));
        assert_eq!(payload("owned".to_string()).message(), Some("owned"));
        assert_eq!(payload(17u8).message(), None);
    }

    #[test]
    fn test_panic_payload_debug() {
        assert_eq!(format!("{:?}", payload("boom")), "PanicPayload(\"boom\")");
        assert!(format!("{:?}", payload(1i32)).contains("non-string"));
    }

    #[test]
    fn test_fault_accessors() {
        let raised: Fault<&str> = Fault::Raised("bad");
        assert!(raised.is_raised());
        assert_eq!(raised.raised(), Some(&"bad"));
        assert_eq!(raised.panic_message(), None);

        let panicked: Fault<&str> = Fault::Panicked(payload("divide by zero"));
        assert!(panicked.is_panic());
        assert_eq!(panicked.panic_message(), Some("divide by zero"));
        assert_eq!(panicked.into_raised(), None);
    }

    #[test]
    fn test_unhandled_exception_display_and_source() {
        let parse_err = "x".parse::<i32>().unwrap_err();
        let err = UnhandledException::new(Fault::Raised(parse_err.clone()));
        assert_eq!(
            err.to_string(),
            format!("unhandled exception: {}", parse_err)
        );
        assert!(err.source().is_some());

        let err: UnhandledException<std::num::ParseIntError> =
            UnhandledException::new(Fault::Panicked(payload("boom")));
        assert_eq!(err.to_string(), "unhandled exception: panicked: boom");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unhandled_exception_preserves_cause() {
        let err = UnhandledException::new(Fault::Raised(vec![1, 2, 3]));
        assert_eq!(err.into_cause().into_raised(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_defect_display() {
        let defect = Defect::new("safe catch handler panicked", payload("handler bug"));
        assert_eq!(defect.message(), "safe catch handler panicked");
        assert_eq!(defect.cause().message(), Some("handler bug"));
        assert_eq!(defect.to_string(), "safe catch handler panicked: handler bug");
    }

    #[test]
    fn test_timeout_error_display() {
        let err = TimeoutError::new(Duration::from_secs(5));
        assert!(err.to_string().contains("timed out"));
        assert_eq!(err.duration, Duration::from_secs(5));
    }
}
