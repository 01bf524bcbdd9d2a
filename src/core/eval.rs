// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/core/eval.rs
// Arithmetic evaluator: forward evaluation and reverse solvers

use crate::ast::*;

/// Lazily produced candidate values of a reverse solve.
pub type Solutions = Box<dyn Iterator<Item = Term>>;

// ============================================================================
// Forward Evaluation
// ============================================================================

/// Apply `op` to two ground values. `None` on any native fault: type
/// mismatch, overflow, zero divisor, or a non-value operand.
pub fn evaluate(left: &Term, op: BinaryOp, right: &Term) -> Option<Term> {
    let (a, b) = (left.as_scalar()?, right.as_scalar()?);
    apply(a, op, b).map(Term::Value)
}

fn apply(a: &Scalar, op: BinaryOp, b: &Scalar) -> Option<Scalar> {
    use Scalar::*;
    match (op, a, b) {
        (BinaryOp::Plus, Text(x), Text(y)) => Some(Text(format!("{}{}", x, y))),
        (BinaryOp::Plus, Int(x), Int(y)) => x.checked_add(*y).map(Int),
        (BinaryOp::Minus, Int(x), Int(y)) => x.checked_sub(*y).map(Int),
        (BinaryOp::Times, Int(x), Int(y)) => x.checked_mul(*y).map(Int),
        (BinaryOp::Div, Int(x), Int(y)) => floor_div(*x, *y).map(Int),
        (BinaryOp::Mod, Int(x), Int(y)) => floor_mod(*x, *y).map(Int),

        (BinaryOp::And, Bool(x), Bool(y)) => Some(Bool(*x && *y)),
        (BinaryOp::Or, Bool(x), Bool(y)) => Some(Bool(*x || *y)),
        (BinaryOp::And, Int(x), Int(y)) => Some(Int(x & y)),
        (BinaryOp::Or, Int(x), Int(y)) => Some(Int(x | y)),

        // Mixed or float arithmetic
        (BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Div | BinaryOp::Mod, _, _) => {
            let (x, y) = (a.as_f64()?, b.as_f64()?);
            let r = match op {
                BinaryOp::Plus => x + y,
                BinaryOp::Minus => x - y,
                BinaryOp::Times => x * y,
                BinaryOp::Div if y != 0.0 => (x / y).floor(),
                BinaryOp::Mod if y != 0.0 => x - y * (x / y).floor(),
                _ => return None,
            };
            r.is_finite().then_some(Float(r))
        }

        _ => None,
    }
}

/// Division rounding toward negative infinity
fn floor_div(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor
fn floor_mod(x: i64, y: i64) -> Option<i64> {
    let r = x.checked_rem(y)?;
    if r != 0 && ((r < 0) != (y < 0)) {
        Some(r + y)
    } else {
        Some(r)
    }
}

// ============================================================================
// Reverse Solvers
// ============================================================================

/// Solve `? op right == result` for the left operand.
pub fn reverse_left(right: &Term, op: BinaryOp, result: &Term) -> Option<Solutions> {
    let (r, res) = (right.as_scalar()?, result.as_scalar()?);
    match op {
        BinaryOp::Plus => single(apply(res, BinaryOp::Minus, r)),
        BinaryOp::Minus => single(apply(res, BinaryOp::Plus, r)),
        BinaryOp::Times => single(apply(res, BinaryOp::Div, r)),
        BinaryOp::Div => single(apply(res, BinaryOp::Times, r)),
        BinaryOp::Mod => None,
        BinaryOp::And | BinaryOp::Or => reverse_logical(op, r, res),
    }
}

/// Solve `left op ? == result` for the right operand.
///
/// MINUS gives `left - result` and DIV gives `left / result` (floor), the
/// values that make `left op ? == result` hold.
pub fn reverse_right(left: &Term, op: BinaryOp, result: &Term) -> Option<Solutions> {
    let (l, res) = (left.as_scalar()?, result.as_scalar()?);
    match op {
        BinaryOp::Plus => single(apply(res, BinaryOp::Minus, l)),
        BinaryOp::Minus => single(apply(l, BinaryOp::Minus, res)),
        BinaryOp::Times => single(apply(res, BinaryOp::Div, l)),
        BinaryOp::Div => single(apply(l, BinaryOp::Div, res)),
        BinaryOp::Mod => None,
        // AND and OR are commutative
        BinaryOp::And | BinaryOp::Or => reverse_logical(op, l, res),
    }
}

fn single(v: Option<Scalar>) -> Option<Solutions> {
    v.map(|v| Box::new(std::iter::once(Term::Value(v))) as Solutions)
}

/// `known op ? == result` over booleans.
///
/// An absorbing operand (false for AND, true for OR) leaves the unknown
/// free, so both booleans are candidates, provided the result is the
/// absorbed value. An absorbing operand with any other result has no
/// solution (`x & false == true`), rather than the unfiltered pair of
/// candidates. A non-absorbing operand makes the unknown equal the result.
fn reverse_logical(op: BinaryOp, known: &Scalar, result: &Scalar) -> Option<Solutions> {
    let (known, result) = (known.as_bool()?, result.as_bool()?);
    let absorbing = match op {
        BinaryOp::And => !known,
        _ => known,
    };
    if !absorbing {
        return Some(Box::new(std::iter::once(Term::bool(result))));
    }
    if result != known {
        return None;
    }
    Some(Box::new([false, true].into_iter().map(Term::bool)))
}
