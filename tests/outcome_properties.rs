//! Property-based tests for Outcome combinator laws

use okresult::{curried, Matcher, Outcome};
use proptest::prelude::*;
use std::cell::Cell;

fn outcome() -> impl Strategy<Value = Outcome<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::ok),
        "[a-z]{0,8}".prop_map(Outcome::err),
    ]
}

proptest! {
    #[test]
    fn prop_map_identity(o in outcome()) {
        prop_assert_eq!(o.clone().map(|x| x), o);
    }

    #[test]
    fn prop_map_composition(o in outcome()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);
        prop_assert_eq!(o.clone().map(f).map(g), o.map(|x| g(f(x))));
    }

    #[test]
    fn prop_map_leaves_err_untouched(e in "[a-z]{0,8}") {
        let o = Outcome::<i32, _>::err(e.clone());
        prop_assert_eq!(o.map(|x| x + 1), Outcome::Err(e));
    }

    #[test]
    fn prop_map_err_leaves_ok_untouched(v in any::<i32>()) {
        let o = Outcome::<_, String>::ok(v);
        prop_assert_eq!(o.map_err(|e| e.len()), Outcome::Ok(v));
    }

    #[test]
    fn prop_tap_returns_input_and_runs_only_on_ok(o in outcome()) {
        let ran = Cell::new(false);
        let tapped = o.clone().tap(|_| ran.set(true));
        prop_assert_eq!(ran.get(), o.is_ok());
        prop_assert_eq!(tapped, o);
    }

    #[test]
    fn prop_and_then_left_identity(v in any::<i32>()) {
        let f = |x: i32| {
            if x % 2 == 0 {
                Outcome::ok(x / 2)
            } else {
                Outcome::err(format!("odd {}", x))
            }
        };
        prop_assert_eq!(Outcome::<_, String>::ok(v).and_then(f), f(v));
    }

    #[test]
    fn prop_and_then_right_identity(o in outcome()) {
        prop_assert_eq!(o.clone().and_then(Outcome::ok), o);
    }

    #[test]
    fn prop_unwrap_or_matches_variant(o in outcome(), fallback in any::<i32>()) {
        let expected = match &o {
            Outcome::Ok(v) => *v,
            Outcome::Err(_) => fallback,
        };
        prop_assert_eq!(o.unwrap_or(fallback), expected);
    }

    #[test]
    fn prop_fold_and_match_with_agree(o in outcome()) {
        let folded = o.clone().fold(|v| v.to_string(), |e| e.to_uppercase());
        let matched = o.match_with(Matcher {
            ok: |v: i32| v.to_string(),
            err: |e: String| e.to_uppercase(),
        });
        prop_assert_eq!(folded, matched);
    }

    #[test]
    fn prop_result_conversion_is_lossless(o in outcome()) {
        let result: Result<i32, String> = o.clone().into();
        prop_assert_eq!(Outcome::from(result), o);
    }

    #[test]
    fn prop_curried_forms_agree_with_methods(o in outcome()) {
        prop_assert_eq!(
            o.clone().pipe(curried::map(|x: i32| x.wrapping_add(1))),
            o.clone().map(|x| x.wrapping_add(1))
        );
        prop_assert_eq!(
            o.clone().pipe(curried::map_err(|e: String| e.len())),
            o.clone().map_err(|e| e.len())
        );
        prop_assert_eq!(
            o.clone().pipe(curried::unwrap_or(0)),
            o.unwrap_or(0)
        );
    }
}
