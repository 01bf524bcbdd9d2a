// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// tests/parser_test.rs
// Tests for the term and query parser and the pretty printer

use kanren_kernel::*;

fn parse(input: &str) -> Term {
    parse_term_str(input).expect("Failed to parse")
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_parse_integers() {
    assert_eq!(parse("42"), Term::int(42));
    assert_eq!(parse("-7"), Term::int(-7));
    assert_eq!(parse("  3  "), Term::int(3));
}

#[test]
fn test_parse_float() {
    assert_eq!(parse("2.5"), Term::float(2.5));
    assert_eq!(parse("-0.5"), Term::float(-0.5));
}

#[test]
fn test_parse_float_exponents() {
    assert_eq!(parse("1e16"), Term::float(1e16));
    assert_eq!(parse("1e-7"), Term::float(1e-7));
    assert_eq!(parse("-2.5E3"), Term::float(-2500.0));
    assert_eq!(parse("1.2345678901234568e20"), Term::float(1.2345678901234568e20));
}

#[test]
fn test_float_overflow_is_not_a_float() {
    assert_eq!(parse_term_str("1e400"), Err(ParseError::Trailing("e400".to_string())));
}

#[test]
fn test_printed_floats_parse_back() {
    for x in [1e16, 1e-7, 1.2345678901234568e20, -2.5e-10, 0.1, -0.0, 5e-324, f64::MAX] {
        let printed = Term::float(x).to_string();
        assert_eq!(parse(&printed), Term::float(x), "{}", printed);
    }
}

#[test]
fn test_parse_string() {
    assert_eq!(parse("\"hello world\""), Term::text("hello world"));
    assert_eq!(parse("\"\""), Term::text(""));
}

#[test]
fn test_parse_booleans_and_vars() {
    assert_eq!(parse("true"), Term::bool(true));
    assert_eq!(parse("false"), Term::bool(false));
    assert_eq!(parse("truth"), Term::var("truth"));
    assert_eq!(parse("_x1"), Term::var("_x1"));
}

// ============================================================================
// Compound Terms
// ============================================================================

#[test]
fn test_parse_empty() {
    assert_eq!(parse("()"), Term::Empty);
    assert_eq!(parse("[]"), Term::Empty);
}

#[test]
fn test_parse_pair() {
    assert_eq!(parse("(1, x)"), Term::pair(1, Term::var("x")));
    assert_eq!(parse("(1, (2, 3))"), Term::pair(1, Term::pair(2, 3)));
}

#[test]
fn test_parse_list() {
    let expected = Term::list(vec![Term::int(1), Term::var("x"), Term::text("s")]);
    assert_eq!(parse("[1, x, \"s\"]"), expected);
}

#[test]
fn test_parenthesized_term_is_not_a_pair() {
    assert_eq!(parse("(x)"), Term::var("x"));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    // 1 + 2 * 3 → 1 + (2 * 3)
    let expected = Term::int(1) + Term::int(2) * 3;
    assert_eq!(parse("1 + 2 * 3"), expected);
}

#[test]
fn test_left_associative() {
    // 1 - 2 - 3 → (1 - 2) - 3
    let expected = (Term::int(1) - 2) - 3;
    assert_eq!(parse("1 - 2 - 3"), expected);
}

#[test]
fn test_and_binds_tighter_than_or() {
    let expected = Term::var("a") | (Term::var("b") & Term::var("c"));
    assert_eq!(parse("a | b & c"), expected);
}

#[test]
fn test_parentheses_override_precedence() {
    let expected = (Term::var("x") + 1) * Term::var("y");
    assert_eq!(parse("(x + 1) * y"), expected);
}

#[test]
fn test_modulo() {
    assert_eq!(parse("x % 3"), Term::var("x") % 3);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_parse_unify_query() {
    let q = parse_query_str("x + 5 = 9").expect("Failed to parse");
    assert_eq!(q.left, Term::var("x") + 5);
    assert_eq!(q.relation, Relation::Unify);
    assert_eq!(q.right, Term::int(9));
}

#[test]
fn test_parse_disunify_query() {
    let q = parse_query_str("(a, 2) != (1, b)").expect("Failed to parse");
    assert_eq!(q.relation, Relation::Disunify);
    assert_eq!(q.left, Term::pair(Term::var("a"), 2));
    assert_eq!(q.right, Term::pair(1, Term::var("b")));
}

#[test]
fn test_query_free_vars() {
    let q = parse_query_str("[x, y] = [1, x]").expect("Failed to parse");
    let vars = q.free_vars();
    let names: Vec<&str> = vars.iter().map(|x| x.name()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_trailing_input() {
    assert_eq!(
        parse_query_str("x = 1 extra"),
        Err(ParseError::Trailing("extra".to_string()))
    );
    assert_eq!(parse_term_str("1 2"), Err(ParseError::Trailing("2".to_string())));
}

#[test]
fn test_syntax_errors() {
    assert!(matches!(parse_term_str(""), Err(ParseError::Syntax(_))));
    assert!(matches!(parse_term_str("\"open"), Err(ParseError::Syntax(_))));
    assert!(matches!(parse_query_str("x +"), Err(ParseError::Syntax(_))));
    assert!(matches!(parse_query_str("= 3"), Err(ParseError::Syntax(_))));
    assert!(matches!(parse_query_str("(1, 2, 3) = x"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_error_messages() {
    let err = parse_query_str("x = 1 extra").unwrap_err();
    assert_eq!(err.to_string(), "unconsumed input: 'extra'");

    let err = parse_term_str("").unwrap_err();
    assert!(err.to_string().starts_with("parse error: "));
}

// ============================================================================
// Pretty Printing
// ============================================================================

#[test]
fn test_pretty_terms() {
    assert_eq!(format!("{}", Term::Empty), "()");
    assert_eq!(format!("{}", Term::pair(1, "a")), "(1, \"a\")");
    assert_eq!(format!("{}", Term::list(vec![Term::int(1), Term::bool(true)])), "[1, true]");
    assert_eq!(format!("{}", Term::float(2.0)), "2.0");
    assert_eq!(format!("{}", Term::var("x") + 5), "x + 5");
}

#[test]
fn test_pretty_minimal_parens() {
    assert_eq!(format!("{}", (Term::var("x") + 1) * 2), "(x + 1) * 2");
    assert_eq!(format!("{}", Term::var("x") + Term::int(1) * 2), "x + 1 * 2");
    assert_eq!(format!("{}", Term::int(1) - (Term::int(2) - 3)), "1 - (2 - 3)");
    assert_eq!(format!("{}", (Term::int(1) - 2) - 3), "1 - 2 - 3");
}

#[test]
fn test_pretty_round_trip() {
    for src in [
        "(x + 1) * y",
        "a | b & c",
        "(a | b) & c",
        "[1, (2, 3), \"s\"]",
        "(1, (2, 3))",
        "x - (y - z)",
        "2.5 * n % 4",
    ] {
        let t = parse(src);
        assert_eq!(format!("{}", t), src);
        assert_eq!(parse(&format!("{}", t)), t);
    }
}

#[test]
fn test_pretty_query() {
    let q = parse_query_str("x+5=9").expect("Failed to parse");
    assert_eq!(format!("{}", q), "x + 5 = 9");
}
