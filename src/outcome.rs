//! A two-variant container for explicit success or failure.
//!
//! # Outcome vs `std::result::Result`
//!
//! `Outcome<A, E>` carries the same information as `Result<A, E>`, but its
//! combinator set is deliberately closed: every transform touches only its
//! own rail, nothing mutates a payload in place, and the only operations that
//! can panic are the documented `unwrap`/`expect` escape hatches.
//!
//! Convert freely at the boundary with [`From`] and [`Outcome::into_result`],
//! so `?` stays available in code that works with plain `Result`.
//!
//! # Examples
//!
//! ```rust
//! use okresult::Outcome;
//!
//! fn parse_port(raw: &str) -> Outcome<u16, String> {
//!     Outcome::from(raw.parse::<u16>()).map_err(|e| format!("invalid port: {}", e))
//! }
//!
//! let port = parse_port("8080")
//!     .map(|p| p + 1)
//!     .unwrap_or(80);
//! assert_eq!(port, 8081);
//!
//! let described = parse_port("http").fold(|p| p.to_string(), |e| e);
//! assert!(described.starts_with("invalid port"));
//! ```

use std::future::Future;

/// The result of a computation: either `Ok(A)` or `Err(E)`.
///
/// Equality is structural. Two `Ok` values are equal when their payloads are,
/// likewise for `Err`, and an `Ok` never equals an `Err`.
///
/// # Example
///
/// ```rust
/// use okresult::Outcome;
///
/// let ok: Outcome<i32, &str> = Outcome::ok(5);
/// let err: Outcome<i32, &str> = Outcome::err("not found");
///
/// assert_eq!(ok.map(|x| x * 2), Outcome::Ok(10));
/// assert_eq!(err.map(|x| x * 2), Outcome::Err("not found"));
///
/// match ok {
///     Outcome::Ok(v) => println!("got {}", v),
///     Outcome::Err(e) => println!("failed: {}", e),
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome<A, E> {
    /// The success variant
    Ok(A),
    /// The failure variant
    Err(E),
}

/// Handlers for [`Outcome::match_with`].
///
/// Both branches produce the same type, so a match collapses the outcome
/// into a single value.
///
/// # Example
///
/// ```rust
/// use okresult::{Matcher, Outcome};
///
/// let message = Outcome::<u32, String>::err("timeout".to_string()).match_with(Matcher {
///     ok: |n: u32| format!("{} rows", n),
///     err: |e: String| format!("query failed: {}", e),
/// });
/// assert_eq!(message, "query failed: timeout");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Matcher<F, G> {
    /// Invoked with the payload of an `Ok`.
    pub ok: F,
    /// Invoked with the payload of an `Err`.
    pub err: G,
}

impl<A, E> Outcome<A, E> {
    // ========== Constructors ==========

    /// Create an `Ok` value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let o: Outcome<i32, String> = Outcome::ok(42);
    /// assert!(o.is_ok());
    /// ```
    #[inline]
    pub fn ok(value: A) -> Self {
        Outcome::Ok(value)
    }

    /// Create an `Err` value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let o: Outcome<i32, &str> = Outcome::err("boom");
    /// assert!(o.is_err());
    /// ```
    #[inline]
    pub fn err(error: E) -> Self {
        Outcome::Err(error)
    }

    /// Convert a standard `Result`.
    #[inline]
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(error) => Outcome::Err(error),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is an `Ok` value.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Returns `true` if this is an `Err` value.
    #[inline]
    pub fn is_err(&self) -> bool {
        matches!(self, Outcome::Err(_))
    }

    // ========== Extractors ==========

    /// Returns the success payload, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::ok(1).into_ok(), Some(1));
    /// assert_eq!(Outcome::<i32, &str>::err("e").into_ok(), None);
    /// ```
    #[inline]
    pub fn into_ok(self) -> Option<A> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    /// Returns the failure payload, if any.
    #[inline]
    pub fn into_err(self) -> Option<E> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(error) => Some(error),
        }
    }

    /// Convert to `Outcome<&A, &E>`.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&A, &E> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Err(error) => Outcome::Err(error),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let o = Outcome::<i32, &str>::ok(7);
    /// assert_eq!(o.into_result(), Ok(7));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(error) => Err(error),
        }
    }

    // ========== Transformations ==========

    /// Transform the success value, passing `Err` through untouched.
    ///
    /// `f` is never invoked on an `Err`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let doubled = Outcome::<i32, &str>::ok(5).map(|x| x * 2);
    /// assert_eq!(doubled, Outcome::Ok(10));
    /// ```
    #[inline]
    pub fn map<B, F>(self, f: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Err(error) => Outcome::Err(error),
        }
    }

    /// Transform the failure value, passing `Ok` through untouched.
    ///
    /// `f` is never invoked on an `Ok`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let err = Outcome::<i32, &str>::err("Not found").map_err(|e| format!("Error: {}", e));
    /// assert_eq!(err, Outcome::Err("Error: Not found".to_string()));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Outcome<A, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Err(error) => Outcome::Err(f(error)),
        }
    }

    /// Run a side effect on the success value and return `self` unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let mut seen = Vec::new();
    /// let o = Outcome::<i32, &str>::ok(3).tap(|v| seen.push(*v));
    /// assert_eq!(o, Outcome::Ok(3));
    /// assert_eq!(seen, vec![3]);
    /// ```
    #[inline]
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&A),
    {
        if let Outcome::Ok(value) = &self {
            f(value);
        }
        self
    }

    /// Await a side effect on the success value and return `self` unchanged.
    ///
    /// The returned future completes only after `f`'s future has completed.
    /// On `Err` nothing is called and nothing is awaited.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let o = Outcome::<i32, &str>::ok(3)
    ///     .tap_async(|v| {
    ///         let v = *v;
    ///         async move { println!("audit: {}", v) }
    ///     })
    ///     .await;
    /// assert_eq!(o, Outcome::Ok(3));
    /// # });
    /// ```
    pub async fn tap_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(&A) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Outcome::Ok(value) = &self {
            f(value).await;
        }
        self
    }

    /// Chain a computation that itself may fail.
    ///
    /// On `Ok(v)` the outcome of `f(v)` replaces this one. On `Err` the error
    /// is returned as-is and `f` is never invoked.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// fn half(n: i32) -> Outcome<i32, String> {
    ///     if n % 2 == 0 {
    ///         Outcome::ok(n / 2)
    ///     } else {
    ///         Outcome::err(format!("{} is odd", n))
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::ok(8).and_then(half).and_then(half), Outcome::Ok(2));
    /// assert_eq!(Outcome::ok(6).and_then(half).and_then(half), Outcome::Err("3 is odd".to_string()));
    /// ```
    #[inline]
    pub fn and_then<B, F>(self, f: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> Outcome<B, E>,
    {
        match self {
            Outcome::Ok(value) => f(value),
            Outcome::Err(error) => Outcome::Err(error),
        }
    }

    /// Async counterpart of [`and_then`](Outcome::and_then).
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let o = Outcome::<i32, String>::ok(20)
    ///     .and_then_async(|n| async move { Outcome::ok(n + 1) })
    ///     .await;
    /// assert_eq!(o, Outcome::Ok(21));
    /// # });
    /// ```
    pub async fn and_then_async<B, F, Fut>(self, f: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> Fut,
        Fut: Future<Output = Outcome<B, E>>,
    {
        match self {
            Outcome::Ok(value) => f(value).await,
            Outcome::Err(error) => Outcome::Err(error),
        }
    }

    // ========== Folding ==========

    /// Collapse both variants into one value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// let o = Outcome::<u32, &str>::err("disk full");
    /// assert_eq!(o.fold(|n| n.to_string(), |e| format!("error: {}", e)), "error: disk full");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, ok_fn: F, err_fn: G) -> T
    where
        F: FnOnce(A) -> T,
        G: FnOnce(E) -> T,
    {
        match self {
            Outcome::Ok(value) => ok_fn(value),
            Outcome::Err(error) => err_fn(error),
        }
    }

    /// Invoke exactly one of the handlers, depending on the variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::{Matcher, Outcome};
    ///
    /// let status = Outcome::<u16, String>::ok(200).match_with(Matcher {
    ///     ok: |code: u16| code < 400,
    ///     err: |_: String| false,
    /// });
    /// assert!(status);
    /// ```
    #[inline]
    pub fn match_with<T, F, G>(self, handlers: Matcher<F, G>) -> T
    where
        F: FnOnce(A) -> T,
        G: FnOnce(E) -> T,
    {
        self.fold(handlers.ok, handlers.err)
    }

    /// Apply a function to the whole outcome.
    ///
    /// Pairs with the data-last functions in [`curried`](crate::curried).
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::{curried, Outcome};
    ///
    /// let o = Outcome::<i32, &str>::ok(6)
    ///     .pipe(curried::map(|x| x * 2))
    ///     .pipe(curried::map(|x| x + 1));
    /// assert_eq!(o, Outcome::Ok(13));
    /// ```
    #[inline]
    pub fn pipe<T, F>(self, f: F) -> T
    where
        F: FnOnce(Self) -> T,
    {
        f(self)
    }

    // ========== Escape hatches ==========

    /// Extract the success value.
    ///
    /// # Panics
    ///
    /// Panics if the value is an `Err`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::ok(100).unwrap(), 100);
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> A {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Err(_) => panic!("called `Outcome::unwrap()` on an `Err` value"),
        }
    }

    /// Extract the success value with a custom panic message.
    ///
    /// # Panics
    ///
    /// Panics with exactly `msg` if the value is an `Err`.
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> A {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Err(_) => panic!("{}", msg),
        }
    }

    /// Extract the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the value is an `Ok`.
    #[inline]
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self {
            Outcome::Ok(_) => panic!("called `Outcome::unwrap_err()` on an `Ok` value"),
            Outcome::Err(error) => error,
        }
    }

    /// Extract the failure value with a custom panic message.
    ///
    /// # Panics
    ///
    /// Panics with exactly `msg` if the value is an `Ok`.
    #[inline]
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        match self {
            Outcome::Ok(_) => panic!("{}", msg),
            Outcome::Err(error) => error,
        }
    }

    /// Return the success value or `fallback`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use okresult::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::ok(100).unwrap_or(0), 100);
    /// assert_eq!(Outcome::<i32, &str>::err("Error").unwrap_or(0), 0);
    /// ```
    #[inline]
    pub fn unwrap_or(self, fallback: A) -> A {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Err(_) => fallback,
        }
    }

    /// Return the success value or compute one from the error.
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> A
    where
        F: FnOnce(E) -> A,
    {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Err(error) => f(error),
        }
    }
}

impl<A, E> From<Result<A, E>> for Outcome<A, E> {
    fn from(result: Result<A, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<A, E> From<Outcome<A, E>> for Result<A, E> {
    fn from(outcome: Outcome<A, E>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Outcome::<i32, ()>::ok(42), Outcome::Ok(42));
        assert_eq!(Outcome::<(), &str>::err("An error occurred"), Outcome::Err("An error occurred"));
    }

    #[test]
    fn test_unit_payload_is_still_ok() {
        let ok = Outcome::<(), &str>::ok(());
        assert!(ok.is_ok());
        let () = ok.unwrap();
    }

    #[test]
    fn test_predicates() {
        let ok: Outcome<i32, &str> = Outcome::ok(100);
        let err: Outcome<i32, &str> = Outcome::err("Error");

        assert!(ok.is_ok());
        assert!(!ok.is_err());
        assert!(err.is_err());
        assert!(!err.is_ok());
    }

    #[test]
    fn test_ok_never_equals_err() {
        assert_ne!(Outcome::<i32, i32>::Ok(1), Outcome::<i32, i32>::Err(1));
    }

    #[test]
    fn test_map() {
        assert_eq!(Outcome::<i32, &str>::ok(5).map(|x| x * 2), Outcome::Ok(10));
    }

    #[test]
    fn test_map_skips_err() {
        let mut called = false;
        let mapped = Outcome::<i32, &str>::err("fail").map(|x| {
            called = true;
            x * 3
        });
        assert_eq!(mapped, Outcome::Err("fail"));
        assert!(!called);
    }

    #[test]
    fn test_method_chaining() {
        let result = Outcome::<i32, ()>::ok(5)
            .map(|x| x * 2)
            .map(|x| x + 1)
            .map(|x| format!("Result: {}", x));
        assert_eq!(result.unwrap(), "Result: 11");
    }

    #[test]
    fn test_map_err() {
        let err = Outcome::<i32, &str>::err("Not found").map_err(|e| format!("Error: {}", e));
        assert_eq!(err, Outcome::Err("Error: Not found".to_string()));
    }

    #[test]
    fn test_map_err_skips_ok() {
        let mut called = false;
        let mapped = Outcome::<i32, &str>::ok(10).map_err(|e| {
            called = true;
            e.len()
        });
        assert_eq!(mapped, Outcome::Ok(10));
        assert!(!called);
    }

    #[test]
    fn test_tap() {
        let mut seen = None;
        let o = Outcome::<i32, &str>::ok(4).tap(|v| seen = Some(*v));
        assert_eq!(o, Outcome::Ok(4));
        assert_eq!(seen, Some(4));

        let mut calls = 0;
        let o = Outcome::<i32, &str>::err("nope").tap(|_| calls += 1);
        assert_eq!(o, Outcome::Err("nope"));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_tap_async_waits_for_effect() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let done = Arc::new(AtomicBool::new(false));
        let o = Outcome::<i32, &str>::ok(1)
            .tap_async(|_| {
                let done = done.clone();
                async move {
                    tokio::task::yield_now().await;
                    done.store(true, Ordering::SeqCst);
                }
            })
            .await;

        assert_eq!(o, Outcome::Ok(1));
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_tap_async_skips_err() {
        let mut calls = 0;
        let o = Outcome::<i32, &str>::err("x")
            .tap_async(|_| {
                calls += 1;
                async {}
            })
            .await;
        assert_eq!(o, Outcome::Err("x"));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_and_then() {
        let o = Outcome::<i32, &str>::ok(2).and_then(|x| Outcome::ok(x * 10));
        assert_eq!(o, Outcome::Ok(20));

        let o = Outcome::<i32, &str>::ok(2).and_then(|_| Outcome::<i32, _>::err("inner"));
        assert_eq!(o, Outcome::Err("inner"));

        let o = Outcome::<i32, &str>::err("outer").and_then(|x| Outcome::ok(x * 10));
        assert_eq!(o, Outcome::Err("outer"));
    }

    #[tokio::test]
    async fn test_and_then_async() {
        let o = Outcome::<i32, &str>::ok(2)
            .and_then_async(|x| async move { Outcome::ok(x + 1) })
            .await;
        assert_eq!(o, Outcome::Ok(3));

        let mut called = false;
        let o = Outcome::<i32, &str>::err("outer")
            .and_then_async(|x| {
                called = true;
                async move { Outcome::ok(x + 1) }
            })
            .await;
        assert_eq!(o, Outcome::Err("outer"));
        assert!(!called);
    }

    #[test]
    fn test_unwrap() {
        assert_eq!(Outcome::<i32, &str>::ok(100).unwrap(), 100);
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap()` on an `Err` value")]
    fn test_unwrap_panics() {
        Outcome::<i32, &str>::err("Error").unwrap();
    }

    #[test]
    #[should_panic(expected = "Custom message")]
    fn test_expect_panics_with_message() {
        Outcome::<i32, &str>::err("Error").expect("Custom message");
    }

    #[test]
    fn test_unwrap_err() {
        assert_eq!(Outcome::<i32, &str>::err("oops").unwrap_err(), "oops");
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap_err()` on an `Ok` value")]
    fn test_unwrap_err_panics() {
        Outcome::<i32, &str>::ok(1).unwrap_err();
    }

    #[test]
    #[should_panic(expected = "expected a failure")]
    fn test_expect_err_panics_with_message() {
        Outcome::<i32, &str>::ok(1).expect_err("expected a failure");
    }

    #[test]
    fn test_unwrap_or() {
        assert_eq!(Outcome::<i32, &str>::ok(100).unwrap_or(0), 100);
        assert_eq!(Outcome::<i32, &str>::err("Error").unwrap_or(0), 0);
    }

    #[test]
    fn test_unwrap_or_else() {
        assert_eq!(Outcome::<usize, &str>::err("four").unwrap_or_else(str::len), 4);
    }

    #[test]
    fn test_fold_and_match_with() {
        let ok: Outcome<i32, &str> = Outcome::ok(42);
        assert_eq!(ok.fold(|v| v.to_string(), |e| e.to_string()), "42");

        let mut ok_calls = 0;
        let mut err_calls = 0;
        let len = Outcome::<i32, &str>::err("hello").match_with(Matcher {
            ok: |_| {
                ok_calls += 1;
                0
            },
            err: |e: &str| {
                err_calls += 1;
                e.len()
            },
        });
        assert_eq!(len, 5);
        assert_eq!((ok_calls, err_calls), (0, 1));
    }

    #[test]
    fn test_result_conversions() {
        let o: Outcome<i32, String> = "42".parse::<i32>().map_err(|e| e.to_string()).into();
        assert_eq!(o, Outcome::Ok(42));

        let r: Result<i32, &str> = Outcome::<i32, &str>::err("bad").into();
        assert_eq!(r, Err("bad"));
    }

    #[test]
    fn test_extractors() {
        let ok: Outcome<i32, &str> = Outcome::ok(1);
        assert_eq!(ok.as_ref(), Outcome::Ok(&1));
        assert_eq!(ok.into_ok(), Some(1));
        assert_eq!(ok.into_err(), None);

        let err: Outcome<i32, &str> = Outcome::err("e");
        assert_eq!(err.into_ok(), None);
        assert_eq!(err.into_err(), Some("e"));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Outcome::<i32, &str>::ok(5)), "Ok(5)");
        assert_eq!(format!("{:?}", Outcome::<i32, &str>::err("x")), "Err(\"x\")");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let ok: Outcome<i32, String> = Outcome::ok(5);
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"ok":5}"#);

        let back: Outcome<i32, String> = serde_json::from_str(r#"{"err":"boom"}"#).unwrap();
        assert_eq!(back, Outcome::Err("boom".to_string()));
    }
}
