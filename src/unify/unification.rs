// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/unify/unification.rs
// Unification rules: empty, value, pair, var-bind, occurs, expr-solve

use crate::ast::*;
use crate::core::eval::{reverse_left, reverse_right};
use crate::core::state::{Delta, State};
use crate::unify::goal::Stream;
use tracing::{debug, trace};

/// Lazily produced candidate deltas of a successful unification.
pub type Candidates = Box<dyn Iterator<Item = Delta>>;

impl State {
    /// Match two already walked terms.
    ///
    /// `None` means the terms cannot be made equal. Otherwise every item of
    /// the sequence is an independent way of making them equal; the empty
    /// delta means they already are.
    pub fn maybe_unify(&self, left: &Term, right: &Term) -> Option<Candidates> {
        match (left, right) {
            (Term::Empty, Term::Empty) => Some(unit()),

            (Term::Value(a), Term::Value(b)) => (a == b).then(unit),

            (Term::Pair(..), Term::Pair(..)) => self.unify_pairs(left, right),

            (Term::Var(x), Term::Var(y)) if x == y => Some(unit()),

            (Term::Var(x), t) | (t, Term::Var(x)) => bind(x, t),

            (Term::BinaryExpr(..), _) if sole_var_operand(left).is_some() => {
                solve_expr(left, right)
            }

            (_, Term::BinaryExpr(..)) if sole_var_operand(right).is_some() => {
                solve_expr(right, left)
            }

            _ => None,
        }
    }

    /// u-pair. A chain of pairs is flattened into its fields, which are
    /// unified left to right, each under the bindings the earlier fields
    /// produced, so a variable shared by two fields sees its new binding.
    fn unify_pairs(&self, left: &Term, right: &Term) -> Option<Candidates> {
        let search = FieldSearch::new(self.clone(), pair_fields(left, right))?;

        // Failure must be reported as `None`, so force the first candidate.
        let mut search = search.peekable();
        search.peek()?;
        Some(Box::new(search))
    }

    /// Assert equality: one extended state per candidate delta.
    pub fn unify(&self, left: &Term, right: &Term) -> Stream {
        let (left, right) = (self.walk(left), self.walk(right));
        match self.maybe_unify(&left, &right) {
            None => {
                trace!(%left, %right, "unification failed");
                Box::new(std::iter::empty())
            }
            Some(deltas) => {
                let state = self.clone();
                Box::new(deltas.map(move |delta| {
                    trace!(%delta, "extending state");
                    state.substituting(&delta)
                }))
            }
        }
    }

    /// Assert disequality: yields this state unchanged iff the terms cannot
    /// be unified, nothing otherwise. Existing bindings are never retracted.
    pub fn disunify(&self, left: &Term, right: &Term) -> Stream {
        let (left, right) = (self.walk(left), self.walk(right));
        match self.maybe_unify(&left, &right) {
            None => Box::new(std::iter::once(self.clone())),
            Some(_) => {
                trace!(%left, %right, "disunification rejected state");
                Box::new(std::iter::empty())
            }
        }
    }
}

/// Corresponding fields of two pair chains, walked down the second
/// fields: `(a, (b, c))` against `(x, (y, z))` gives `[a~x, b~y, c~z]`.
fn pair_fields(left: &Term, right: &Term) -> Vec<(Term, Term)> {
    let mut fields = Vec::new();
    let (mut left, mut right) = (left, right);
    while let (Term::Pair(l1, l2), Term::Pair(r1, r2)) = (left, right) {
        fields.push(((**l1).clone(), (**r1).clone()));
        left = l2;
        right = r2;
    }
    fields.push((left.clone(), right.clone()));
    fields
}

/// Depth-first search over the fields of a pair chain.
///
/// Each stack frame holds the candidates for one field together with the
/// delta and state accumulated before it. The stack replaces recursion, so
/// long sequences do not nest iterators.
struct FieldSearch {
    fields: Vec<(Term, Term)>,
    stack: Vec<(Delta, State, Candidates)>,
}

impl FieldSearch {
    fn new(state: State, fields: Vec<(Term, Term)>) -> Option<Self> {
        let (l, r) = fields.first()?;
        let first = state.maybe_unify(l, r)?;
        Some(FieldSearch {
            fields,
            stack: vec![(Delta::empty(), state, first)],
        })
    }
}

impl Iterator for FieldSearch {
    type Item = Delta;

    fn next(&mut self) -> Option<Delta> {
        loop {
            let depth = self.stack.len();
            let (acc, state, candidates) = self.stack.last_mut()?;

            let Some(delta) = candidates.next() else {
                self.stack.pop();
                continue;
            };

            let acc = acc.union(&delta);
            if depth == self.fields.len() {
                return Some(acc);
            }

            let child = state.substituting(&delta);
            let (l, r) = &self.fields[depth];
            if let Some(next) = child.maybe_unify(&child.walk(l), &child.walk(r)) {
                self.stack.push((acc, child, next));
            }
        }
    }
}

fn unit() -> Candidates {
    Box::new(std::iter::once(Delta::empty()))
}

/// var-bind with occurs check
fn bind(x: &Var, t: &Term) -> Option<Candidates> {
    if t.occurs(x) {
        debug!(var = %x, term = %t, "occurs check failed");
        return None;
    }
    Some(Box::new(std::iter::once(Delta::singleton(x.clone(), t.clone()))))
}

/// The variable of an expression with exactly one variable operand
fn sole_var_operand(expr: &Term) -> Option<&Var> {
    match expr {
        Term::BinaryExpr(left, _, right) => match (left.as_var(), right.as_var()) {
            (Some(x), None) | (None, Some(x)) => Some(x),
            _ => None,
        },
        _ => None,
    }
}

/// expr-solve: `x op k == result` or `k op x == result`
fn solve_expr(expr: &Term, result: &Term) -> Option<Candidates> {
    let Term::BinaryExpr(left, op, right) = expr else {
        return None;
    };

    let (x, solutions) = match (&**left, &**right) {
        (Term::Var(x), known) => (x, reverse_left(known, *op, result)),
        (known, Term::Var(x)) => (x, reverse_right(known, *op, result)),
        _ => return None,
    };

    let Some(solutions) = solutions else {
        debug!(%expr, %result, "no reverse solution");
        return None;
    };

    let x = x.clone();
    Some(Box::new(
        solutions.map(move |value| Delta::singleton(x.clone(), value)),
    ))
}
