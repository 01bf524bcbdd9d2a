// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/ast.rs
// Term algebra: terms, native values and the normalizing constructor

use crate::error::ConstructionError;
use std::collections::BTreeSet;
use std::ops;

// ============================================================================
// Core Types
// ============================================================================

/// Logic variable. Identity is the name, which the allocator keeps unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub String);

impl Var {
    pub fn new(s: impl Into<String>) -> Self {
        Var(s.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Binary operators of the expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    /// Integer floor division
    Div,
    Mod,
    And,
    Or,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Times,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }
}

/// Type tag of a scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Bool,
    Int,
    Float,
    Text,
}

/// Scalar payload of a `Term::Value`
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn kind(&self) -> NativeType {
        match self {
            Scalar::Bool(_) => NativeType::Bool,
            Scalar::Int(_) => NativeType::Int,
            Scalar::Float(_) => NativeType::Float,
            Scalar::Text(_) => NativeType::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view used for mixed int/float arithmetic
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Float(x) => Some(*x),
            _ => None,
        }
    }
}

// The type tag does not take part in equality: ints and floats compare
// numerically, everything else only within its own kind.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Int(_) | Scalar::Float(_), Scalar::Int(_) | Scalar::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => false,
        }
    }
}

// ============================================================================
// Terms
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Empty,
    Value(Scalar),
    Pair(Box<Term>, Box<Term>),
    Var(Var),
    BinaryExpr(Box<Term>, BinaryOp, Box<Term>),
}

impl Term {
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Term::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn free_vars(&self) -> BTreeSet<Var> {
        let mut fvs = BTreeSet::new();
        self.collect_vars(&mut fvs);
        fvs
    }

    fn collect_vars(&self, acc: &mut BTreeSet<Var>) {
        match self {
            Term::Empty | Term::Value(_) => {}
            Term::Var(x) => {
                acc.insert(x.clone());
            }
            Term::Pair(a, b) | Term::BinaryExpr(a, _, b) => {
                a.collect_vars(acc);
                b.collect_vars(acc);
            }
        }
    }

    /// Does `x` appear anywhere inside this term?
    pub fn occurs(&self, x: &Var) -> bool {
        match self {
            Term::Empty | Term::Value(_) => false,
            Term::Var(y) => x == y,
            Term::Pair(a, b) | Term::BinaryExpr(a, _, b) => a.occurs(x) || b.occurs(x),
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Empty | Term::Value(_) => true,
            Term::Var(_) => false,
            Term::Pair(a, b) | Term::BinaryExpr(a, _, b) => a.is_ground() && b.is_ground(),
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Unify,
    Disunify,
}

/// `left = right` or `left != right`
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub left: Term,
    pub relation: Relation,
    pub right: Term,
}

impl Query {
    pub fn free_vars(&self) -> BTreeSet<Var> {
        let mut fvs = self.left.free_vars();
        fvs.extend(self.right.free_vars());
        fvs
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(Var::new(name))
    }

    pub fn int(n: i64) -> Self {
        Term::Value(Scalar::Int(n))
    }

    /// Unchecked; `term` rejects NaN and infinities, which have no literal syntax.
    pub fn float(x: f64) -> Self {
        Term::Value(Scalar::Float(x))
    }

    pub fn bool(b: bool) -> Self {
        Term::Value(Scalar::Bool(b))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Term::Value(Scalar::Text(s.into()))
    }

    pub fn pair(first: impl Into<Term>, second: impl Into<Term>) -> Self {
        Term::Pair(Box::new(first.into()), Box::new(second.into()))
    }

    pub fn expr(left: impl Into<Term>, op: BinaryOp, right: impl Into<Term>) -> Self {
        Term::BinaryExpr(Box::new(left.into()), op, Box::new(right.into()))
    }

    /// Sequence encoding: Pair(head, Pair(...)) terminated by Empty
    pub fn list(items: impl IntoIterator<Item = Term>) -> Self {
        let items: Vec<Term> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Term::Empty, |tail, head| Term::pair(head, tail))
    }
}

impl From<Var> for Term {
    fn from(x: Var) -> Self {
        Term::Var(x)
    }
}

impl From<Scalar> for Term {
    fn from(v: Scalar) -> Self {
        Term::Value(v)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::bool(b)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::int(n)
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Term::int(n as i64)
    }
}

impl From<f64> for Term {
    fn from(x: f64) -> Self {
        Term::float(x)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::text(s)
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::text(s)
    }
}

// ============================================================================
// Operator Sugar
// ============================================================================

// `x + 5` builds an unevaluated expression node, it never computes.
macro_rules! binary_sugar {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Term>> ops::$trait<R> for Term {
            type Output = Term;

            fn $method(self, rhs: R) -> Term {
                Term::expr(self, $op, rhs)
            }
        }

        impl<R: Into<Term>> ops::$trait<R> for &Term {
            type Output = Term;

            fn $method(self, rhs: R) -> Term {
                Term::expr(self.clone(), $op, rhs)
            }
        }
    };
}

binary_sugar!(Add, add, BinaryOp::Plus);
binary_sugar!(Sub, sub, BinaryOp::Minus);
binary_sugar!(Mul, mul, BinaryOp::Times);
binary_sugar!(Div, div, BinaryOp::Div);
binary_sugar!(Rem, rem, BinaryOp::Mod);
binary_sugar!(BitAnd, bitand, BinaryOp::And);
binary_sugar!(BitOr, bitor, BinaryOp::Or);

// ============================================================================
// Native Values and the Smart Constructor
// ============================================================================

/// A dynamically typed host value, the input of [`term`].
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Fixed-size tuple; only pairs have a term form
    Tuple(Vec<Native>),
    List(Vec<Native>),
    /// Already a term, passed through unchanged
    Term(Term),
}

impl Native {
    pub fn type_name(&self) -> &'static str {
        match self {
            Native::None => "none",
            Native::Bool(_) => "bool",
            Native::Int(_) => "int",
            Native::Float(_) => "float",
            Native::Text(_) => "str",
            Native::Tuple(_) => "tuple",
            Native::List(_) => "list",
            Native::Term(_) => "term",
        }
    }
}

impl From<Term> for Native {
    fn from(t: Term) -> Self {
        Native::Term(t)
    }
}

impl From<Var> for Native {
    fn from(x: Var) -> Self {
        Native::Term(Term::Var(x))
    }
}

impl From<bool> for Native {
    fn from(b: bool) -> Self {
        Native::Bool(b)
    }
}

impl From<i64> for Native {
    fn from(n: i64) -> Self {
        Native::Int(n)
    }
}

impl From<i32> for Native {
    fn from(n: i32) -> Self {
        Native::Int(n as i64)
    }
}

impl From<f64> for Native {
    fn from(x: f64) -> Self {
        Native::Float(x)
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Native::Text(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Native::Text(s)
    }
}

impl<T: Into<Native>> From<Option<T>> for Native {
    fn from(v: Option<T>) -> Self {
        v.map_or(Native::None, Into::into)
    }
}

impl<A: Into<Native>, B: Into<Native>> From<(A, B)> for Native {
    fn from((a, b): (A, B)) -> Self {
        Native::Tuple(vec![a.into(), b.into()])
    }
}

impl<T: Into<Native>> From<Vec<T>> for Native {
    fn from(items: Vec<T>) -> Self {
        Native::List(items.into_iter().map(Into::into).collect())
    }
}

/// Normalize a native value into a term.
///
/// `None` becomes `Empty`, a pair becomes `Pair`, a sequence becomes
/// `Pair(head, term(rest))` ending in `Empty`, and terms pass through.
pub fn term(value: impl Into<Native>) -> Result<Term, ConstructionError> {
    match value.into() {
        Native::None => Ok(Term::Empty),
        Native::Term(t) => Ok(t),
        Native::Bool(b) => Ok(Term::bool(b)),
        Native::Int(n) => Ok(Term::int(n)),
        Native::Float(x) if x.is_finite() => Ok(Term::float(x)),
        Native::Float(x) => Err(ConstructionError::NonFiniteFloat {
            value: x.to_string(),
        }),
        Native::Text(s) => Ok(Term::text(s)),
        Native::Tuple(items) => {
            if items.len() != 2 {
                return Err(ConstructionError::TupleArity { found: items.len() });
            }
            let mut items = items.into_iter();
            match (items.next(), items.next()) {
                (Some(a), Some(b)) => Ok(Term::pair(term(a)?, term(b)?)),
                _ => Err(ConstructionError::TupleArity { found: 0 }),
            }
        }
        Native::List(items) => items
            .into_iter()
            .rev()
            .try_fold(Term::Empty, |tail, head| -> Result<Term, ConstructionError> {
                Ok(Term::pair(term(head)?, tail))
            }),
    }
}

/// Build a term from a JSON document: arrays are sequences, objects are
/// rejected.
pub fn term_from_json(value: &serde_json::Value) -> Result<Term, ConstructionError> {
    term(native_from_json(value)?)
}

fn native_from_json(value: &serde_json::Value) -> Result<Native, ConstructionError> {
    use serde_json::Value as Json;
    match value {
        Json::Null => Ok(Native::None),
        Json::Bool(b) => Ok(Native::Bool(*b)),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Native::Int(i)),
            (None, Some(x)) => Ok(Native::Float(x)),
            (None, None) => Err(ConstructionError::UnsupportedType {
                type_name: "number".to_string(),
            }),
        },
        Json::String(s) => Ok(Native::Text(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(native_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Native::List),
        Json::Object(_) => Err(ConstructionError::UnsupportedType {
            type_name: "object".to_string(),
        }),
    }
}
