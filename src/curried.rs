//! Data-last forms of the [`Outcome`] combinators.
//!
//! Each function takes only the transform and returns a function that is
//! still waiting for the outcome. The behavior is identical to the
//! corresponding method; the only difference is when the data arrives.
//!
//! ```rust
//! use okresult::{curried, Outcome};
//!
//! let double = curried::map(|x: i32| x * 2);
//! assert_eq!(double(Outcome::<i32, &str>::ok(6)), Outcome::Ok(12));
//!
//! // Method style and data-last style agree.
//! let data_first = Outcome::<i32, &str>::ok(6).map(|x| x * 2);
//! let data_last = Outcome::<i32, &str>::ok(6).pipe(curried::map(|x| x * 2));
//! assert_eq!(data_first, data_last);
//! ```

use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::outcome::{Matcher, Outcome};

/// Data-last [`Outcome::map`].
pub fn map<A, B, E, F>(f: F) -> impl FnOnce(Outcome<A, E>) -> Outcome<B, E>
where
    F: FnOnce(A) -> B,
{
    move |outcome| outcome.map(f)
}

/// Data-last [`Outcome::map_err`].
pub fn map_err<A, E, E2, F>(f: F) -> impl FnOnce(Outcome<A, E>) -> Outcome<A, E2>
where
    F: FnOnce(E) -> E2,
{
    move |outcome| outcome.map_err(f)
}

/// Data-last [`Outcome::tap`].
pub fn tap<A, E, F>(f: F) -> impl FnOnce(Outcome<A, E>) -> Outcome<A, E>
where
    F: FnOnce(&A),
{
    move |outcome| outcome.tap(f)
}

/// Data-last [`Outcome::and_then`].
pub fn and_then<A, B, E, F>(f: F) -> impl FnOnce(Outcome<A, E>) -> Outcome<B, E>
where
    F: FnOnce(A) -> Outcome<B, E>,
{
    move |outcome| outcome.and_then(f)
}

/// Data-last [`Outcome::unwrap_or`].
pub fn unwrap_or<A, E>(fallback: A) -> impl FnOnce(Outcome<A, E>) -> A {
    move |outcome| outcome.unwrap_or(fallback)
}

/// Data-last [`Outcome::match_with`].
pub fn match_with<A, E, T, F, G>(handlers: Matcher<F, G>) -> impl FnOnce(Outcome<A, E>) -> T
where
    F: FnOnce(A) -> T,
    G: FnOnce(E) -> T,
{
    move |outcome| outcome.match_with(handlers)
}

/// Data-last [`Outcome::tap_async`].
///
/// The returned function yields a boxed future so it can be stored and passed
/// around before the outcome is known.
///
/// ```rust
/// use okresult::{curried, Outcome};
///
/// # tokio_test::block_on(async {
/// let audit = curried::tap_async(|v: &i32| {
///     let v = *v;
///     async move { assert_eq!(v, 9) }
/// });
/// assert_eq!(audit(Outcome::<i32, ()>::ok(9)).await, Outcome::Ok(9));
/// # });
/// ```
pub fn tap_async<'a, A, E, F, Fut>(
    f: F,
) -> impl FnOnce(Outcome<A, E>) -> LocalBoxFuture<'a, Outcome<A, E>>
where
    A: 'a,
    E: 'a,
    F: FnOnce(&A) -> Fut + 'a,
    Fut: Future<Output = ()> + 'a,
{
    move |outcome| outcome.tap_async(f).boxed_local()
}

/// Data-last [`Outcome::and_then_async`].
pub fn and_then_async<'a, A, B, E, F, Fut>(
    f: F,
) -> impl FnOnce(Outcome<A, E>) -> LocalBoxFuture<'a, Outcome<B, E>>
where
    A: 'a,
    B: 'a,
    E: 'a,
    F: FnOnce(A) -> Fut + 'a,
    Fut: Future<Output = Outcome<B, E>> + 'a,
{
    move |outcome| outcome.and_then_async(f).boxed_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(x: i32) -> i32 {
        x * 2
    }

    #[test]
    fn test_map_data_last() {
        let doubled = map(double);
        assert_eq!(doubled(Outcome::<i32, &str>::ok(6)).unwrap(), 12);
    }

    #[test]
    fn test_map_styles_agree() {
        for input in [Outcome::<i32, &str>::ok(3), Outcome::err("nope")] {
            assert_eq!(input.map(double), map(double)(input));
        }
    }

    #[test]
    fn test_map_err_data_last() {
        let wrap = map_err(|e: &str| format!("wrapped: {}", e));
        assert_eq!(
            wrap(Outcome::<i32, &str>::err("io")),
            Outcome::Err("wrapped: io".to_string())
        );
    }

    #[test]
    fn test_tap_data_last_skips_err() {
        let mut calls = 0;
        let o = tap(|_: &i32| calls += 1)(Outcome::<i32, &str>::err("e"));
        assert_eq!(o, Outcome::Err("e"));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_and_then_data_last() {
        let checked = and_then(|x: i32| {
            if x > 0 {
                Outcome::ok(x)
            } else {
                Outcome::err("not positive")
            }
        });
        assert_eq!(checked(Outcome::ok(-1)), Outcome::Err("not positive"));
    }

    #[test]
    fn test_unwrap_or_and_match_with_data_last() {
        assert_eq!(unwrap_or(7)(Outcome::<i32, &str>::err("e")), 7);

        let describe = match_with(Matcher {
            ok: |v: i32| format!("ok {}", v),
            err: |e: &str| format!("err {}", e),
        });
        assert_eq!(describe(Outcome::ok(1)), "ok 1");
    }

    #[test]
    fn test_pipe_chain() {
        let o = Outcome::<i32, &str>::ok(5)
            .pipe(map(double))
            .pipe(map(|x| x + 1))
            .pipe(map(|x: i32| format!("Result: {}", x)));
        assert_eq!(o.unwrap(), "Result: 11");
    }

    #[tokio::test]
    async fn test_async_data_last() {
        let step = and_then_async(|x: i32| async move { Outcome::<i32, &str>::ok(x * 3) });
        assert_eq!(step(Outcome::ok(2)).await, Outcome::Ok(6));

        let short = and_then_async(|x: i32| async move { Outcome::<i32, &str>::ok(x * 3) });
        assert_eq!(short(Outcome::err("early")).await, Outcome::Err("early"));

        let audit = tap_async(|_: &i32| async {});
        assert_eq!(audit(Outcome::<i32, &str>::ok(4)).await, Outcome::Ok(4));
    }
}
