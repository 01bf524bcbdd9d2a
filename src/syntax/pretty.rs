// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/syntax/pretty.rs
// Pretty printing for terms, states and answers

use crate::ast::*;
use crate::core::state::{Delta, State};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Display Implementations
// ============================================================================

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NativeType::Bool => write!(f, "bool"),
            NativeType::Int => write!(f, "int"),
            NativeType::Float => write!(f, "float"),
            NativeType::Text => write!(f, "str"),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional part, so `2.0` does not read back as an int
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PrettyTerm(self, 0))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Relation::Unify => write!(f, "="),
            Relation::Disunify => write!(f, "!="),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation, self.right)
    }
}

// ============================================================================
// Pretty Printer with Precedence
// ============================================================================

struct PrettyTerm<'a>(&'a Term, u8);

// Precedence levels (higher = binds tighter)
const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_ADD: u8 = 3;
const PREC_MUL: u8 = 4;

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => PREC_OR,
        BinaryOp::And => PREC_AND,
        BinaryOp::Plus | BinaryOp::Minus => PREC_ADD,
        BinaryOp::Times | BinaryOp::Div | BinaryOp::Mod => PREC_MUL,
    }
}

impl<'a> fmt::Display for PrettyTerm<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let PrettyTerm(term, parent_prec) = self;

        match term {
            Term::Empty => write!(f, "()"),
            Term::Value(v) => write!(f, "{}", v),
            Term::Var(x) => write!(f, "{}", x),

            Term::Pair(first, second) => match list_items(term) {
                Some(items) => {
                    write!(f, "[")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, "]")
                }
                None => write!(f, "({}, {})", first, second),
            },

            Term::BinaryExpr(left, op, right) => {
                let prec = precedence(*op);
                // Left-associative: only the right operand needs parens at equal precedence
                let s = format!(
                    "{} {} {}",
                    PrettyTerm(left, prec),
                    op,
                    PrettyTerm(right, prec + 1)
                );
                if *parent_prec > prec {
                    write!(f, "({})", s)
                } else {
                    write!(f, "{}", s)
                }
            }
        }
    }
}

/// Elements of a pair chain terminated by `Empty`
fn list_items(term: &Term) -> Option<Vec<&Term>> {
    let mut items = Vec::new();
    let mut current = term;
    loop {
        match current {
            Term::Empty => return Some(items),
            Term::Pair(head, tail) => {
                items.push(&**head);
                current = tail;
            }
            _ => return None,
        }
    }
}

// ============================================================================
// Bindings
// ============================================================================

fn write_bindings<'a>(
    f: &mut fmt::Formatter,
    bindings: impl Iterator<Item = (&'a Var, &'a Term)>,
) -> fmt::Result {
    let mut sorted: Vec<_> = bindings.collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    write!(f, "{{")?;
    for (i, (x, t)) in sorted.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} = {}", x, t)?;
    }
    write!(f, "}}")
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_bindings(f, self.iter())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_bindings(f, self.bindings().iter())
    }
}

/// A state seen through the variables of a query: each variable walked to
/// its current value. Ground queries print `yes`.
pub struct Answer<'a> {
    pub state: &'a State,
    pub vars: &'a BTreeSet<Var>,
}

impl<'a> fmt::Display for Answer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "yes");
        }
        for (i, x) in self.vars.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", x, self.state.walk(&Term::Var(x.clone())))?;
        }
        Ok(())
    }
}
