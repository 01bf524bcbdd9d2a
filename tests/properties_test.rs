// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// tests/properties_test.rs
// Property-based tests for unification, reverse solving and the printer

use kanren_kernel::*;
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Strategies
// ============================================================================

fn arb_var() -> impl Strategy<Value = Term> {
    prop::sample::select(vec!["x", "y", "z", "w"]).prop_map(Term::var)
}

fn arb_scalar() -> impl Strategy<Value = Term> {
    prop_oneof![
        any::<bool>().prop_map(Term::bool),
        (-100i64..100).prop_map(Term::int),
        (prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO)
            .prop_map(Term::float),
        "[a-z ]{0,5}".prop_map(Term::text),
    ]
}

fn arb_ground_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        prop_oneof![Just(Term::Empty), arb_scalar()].boxed()
    } else {
        prop_oneof![
            Just(Term::Empty),
            arb_scalar(),
            (arb_ground_term(depth - 1), arb_ground_term(depth - 1))
                .prop_map(|(a, b)| Term::pair(a, b))
        ]
        .boxed()
    }
}

/// Structural terms: no arithmetic
fn arb_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        prop_oneof![Just(Term::Empty), arb_scalar(), arb_var()].boxed()
    } else {
        prop_oneof![
            arb_scalar(),
            arb_var(),
            (arb_term(depth - 1), arb_term(depth - 1)).prop_map(|(a, b)| Term::pair(a, b))
        ]
        .boxed()
    }
}

/// Any term the parser can read, arithmetic included
fn arb_syntax_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        prop_oneof![Just(Term::Empty), arb_scalar(), arb_var()].boxed()
    } else {
        prop_oneof![
            arb_scalar(),
            arb_var(),
            (arb_syntax_term(depth - 1), arb_syntax_term(depth - 1))
                .prop_map(|(a, b)| Term::pair(a, b)),
            (
                arb_syntax_term(depth - 1),
                prop::sample::select(BinaryOp::ALL.to_vec()),
                arb_syntax_term(depth - 1)
            )
                .prop_map(|(l, op, r)| Term::expr(l, op, r))
        ]
        .boxed()
    }
}

// ============================================================================
// Unification
// ============================================================================

proptest! {
    #[test]
    fn self_unification_succeeds(t in arb_term(3)) {
        let states: Vec<State> = State::new().unify(&t, &t).collect();
        prop_assert_eq!(states.len(), 1);
        prop_assert!(states[0].bindings().is_empty());
    }

    #[test]
    fn ground_terms_unify_iff_equal(a in arb_ground_term(2), b in arb_ground_term(2)) {
        let unified = State::new().unify(&a, &b).next().is_some();
        prop_assert_eq!(unified, a == b);
    }

    #[test]
    fn unify_and_disunify_are_exclusive(a in arb_term(2), b in arb_term(2)) {
        let s = State::new();
        let unified = s.unify(&a, &b).next().is_some();
        let disunified = s.disunify(&a, &b).next().is_some();
        prop_assert!(unified != disunified);
    }

    #[test]
    fn unifier_makes_terms_equal(a in arb_term(2), b in arb_term(2)) {
        for s in State::new().unify(&a, &b).take(4) {
            prop_assert_eq!(s.walk(&a), s.walk(&b));
        }
    }

    #[test]
    fn unification_is_symmetric(a in arb_term(2), b in arb_term(2)) {
        let s = State::new();
        prop_assert_eq!(s.unify(&a, &b).next().is_some(), s.unify(&b, &a).next().is_some());
    }
}

// ============================================================================
// Reverse Solving
// ============================================================================

proptest! {
    #[test]
    fn plus_reversal_recovers_operand(a in -1000i64..1000, k in -1000i64..1000) {
        let x = Term::var("x");
        let states: Vec<State> = State::new().unify(&Term::int(a + k), &(x.clone() + k)).collect();
        prop_assert_eq!(states.len(), 1);
        prop_assert_eq!(states[0].walk(&x), Term::int(a));
    }

    #[test]
    fn times_reversal_recovers_operand(a in -1000i64..1000, k in 1i64..50) {
        let x = Term::var("x");
        let states: Vec<State> = State::new().unify(&(Term::int(k) * x.clone()), &Term::int(a * k)).collect();
        prop_assert_eq!(states.len(), 1);
        prop_assert_eq!(states[0].walk(&x), Term::int(a));
    }

    #[test]
    fn reverse_solutions_evaluate_forward(
        known in -100i64..100,
        result in -100i64..100,
        op in prop::sample::select(vec![BinaryOp::Plus, BinaryOp::Minus]),
    ) {
        let (known, result) = (Term::int(known), Term::int(result));
        let solved: Vec<Term> = reverse_left(&known, op, &result).into_iter().flatten().collect();
        for x in solved {
            prop_assert_eq!(evaluate(&x, op, &known), Some(result.clone()));
        }
    }

    #[test]
    fn logical_solutions_evaluate_forward(
        known in any::<bool>(),
        result in any::<bool>(),
        op in prop::sample::select(vec![BinaryOp::And, BinaryOp::Or]),
    ) {
        let (known, result) = (Term::bool(known), Term::bool(result));
        for x in reverse_right(&known, op, &result).into_iter().flatten() {
            prop_assert_eq!(evaluate(&known, op, &x), Some(result.clone()));
        }
    }
}

// ============================================================================
// Fresh Variables and Printing
// ============================================================================

proptest! {
    #[test]
    fn fresh_vars_are_unique(n in 1usize..64) {
        let supply = VarSupply::with_prefix("p");
        let clone = supply.clone();
        let names: HashSet<Var> = (0..n)
            .map(|i| if i % 2 == 0 { supply.fresh() } else { clone.fresh() })
            .collect();
        prop_assert_eq!(names.len(), n);
    }

    #[test]
    fn printed_terms_parse_back(t in arb_syntax_term(3)) {
        let printed = t.to_string();
        prop_assert_eq!(parse_term_str(&printed), Ok(t));
    }
}
