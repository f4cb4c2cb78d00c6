//! Testing utilities for code built on [`Outcome`](crate::Outcome) and the safe executors.
//!
//! # Assertion Macros
//!
//! ```rust
//! use okresult::{assert_err, assert_ok, assert_ok_eq, Outcome};
//!
//! let ok = Outcome::<_, &str>::ok(42);
//! assert_ok!(ok);
//! assert_ok_eq!(ok, 42);
//!
//! let err = Outcome::<i32, _>::err("missing");
//! assert_err!(err);
//! ```
//!
//! # Defects
//!
//! ```rust
//! use okresult::testing::catch_defect;
//! use okresult::Safe;
//!
//! let defect = catch_defect(|| {
//!     Safe::new(|| Err::<(), _>("down"))
//!         .catch(|_| -> String { panic!("handler bug") })
//!         .run()
//! })
//! .unwrap_err();
//!
//! assert_eq!(defect.cause().message(), Some("handler bug"));
//! ```

use std::panic::{self, AssertUnwindSafe};

use crate::safe::Defect;

/// Assert that an outcome is `Ok`.
///
/// This macro will panic if the outcome is an `Err`.
///
/// # Example
///
/// ```rust
/// use okresult::{assert_ok, Outcome};
///
/// assert_ok!(Outcome::<_, String>::ok(1));
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Ok(_) => {}
            $crate::Outcome::Err(e) => {
                panic!("Expected Ok, got Err: {:?}", e);
            }
        }
    };
}

/// Assert that an outcome is `Err`.
///
/// This macro will panic if the outcome is an `Ok`.
#[macro_export]
macro_rules! assert_err {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Err(_) => {}
            $crate::Outcome::Ok(v) => {
                panic!("Expected Err, got Ok: {:?}", v);
            }
        }
    };
}

/// Assert that an outcome is `Ok` with a specific value.
///
/// # Example
///
/// ```rust
/// use okresult::{assert_ok_eq, Outcome};
///
/// assert_ok_eq!(Outcome::<_, ()>::ok("ready"), "ready");
/// ```
#[macro_export]
macro_rules! assert_ok_eq {
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Ok(value) => {
                assert_eq!(value, $expected);
            }
            $crate::Outcome::Err(e) => {
                panic!("Expected Ok({:?}), got Err: {:?}", $expected, e);
            }
        }
    };
}

/// Assert that an outcome is `Err` with a specific error.
#[macro_export]
macro_rules! assert_err_eq {
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Err(error) => {
                assert_eq!(error, $expected);
            }
            $crate::Outcome::Ok(v) => {
                panic!("Expected Err({:?}), got Ok: {:?}", $expected, v);
            }
        }
    };
}

/// Run `f`, returning the [`Defect`] it escalates instead of unwinding.
///
/// Panics that are not defects keep unwinding.
pub fn catch_defect<R>(f: impl FnOnce() -> R) -> Result<R, Defect> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Defect>() {
            Ok(defect) => Err(*defect),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<A, E> Arbitrary for crate::Outcome<A, E>
where
    A: Arbitrary + 'static,
    E: Arbitrary + 'static,
{
    type Parameters = (A::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (a_params, e_params) = args;
        prop_oneof![
            any_with::<A>(a_params).prop_map(crate::Outcome::ok),
            any_with::<E>(e_params).prop_map(crate::Outcome::err),
        ]
        .boxed()
    }
}
