// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/core/state.rs
// Substitution state: persistent bindings, variable ledger and walk

use crate::ast::*;
use crate::core::eval::evaluate;
use crate::core::fresh::VarSupply;
use crate::unify::goal::{Goal, Stream};
use im::{HashMap, Vector};
use tracing::{debug, trace};

// ============================================================================
// Deltas
// ============================================================================

/// A candidate set of new bindings, committed atomically by
/// [`State::substituting`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta(HashMap<Var, Term>);

impl Delta {
    pub fn empty() -> Self {
        Delta(HashMap::new())
    }

    pub fn singleton(x: Var, t: Term) -> Self {
        Delta(HashMap::unit(x, t))
    }

    /// Merge two deltas; `other` wins on collision.
    pub fn union(&self, other: &Delta) -> Delta {
        let mut merged = self.0.clone();
        merged.extend(other.0.clone());
        Delta(merged)
    }

    pub fn get(&self, x: &Var) -> Option<&Term> {
        self.0.get(x)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.0.iter()
    }
}

impl FromIterator<(Var, Term)> for Delta {
    fn from_iter<I: IntoIterator<Item = (Var, Term)>>(iter: I) -> Self {
        Delta(iter.into_iter().collect())
    }
}

// ============================================================================
// State
// ============================================================================

/// Immutable binding map plus the ledger of variables allocated in this
/// lineage. Extending a state always yields a new one; clones are cheap
/// because both collections share structure.
#[derive(Debug, Clone)]
pub struct State {
    bindings: HashMap<Var, Term>,
    vars: Vector<Var>,
    supply: VarSupply,
}

impl State {
    /// Empty state allocating from the process-wide supply
    pub fn new() -> Self {
        Self::with_supply(VarSupply::global())
    }

    pub fn with_supply(supply: VarSupply) -> Self {
        State {
            bindings: HashMap::new(),
            vars: Vector::new(),
            supply,
        }
    }

    pub fn bindings(&self) -> &HashMap<Var, Term> {
        &self.bindings
    }

    /// Variables introduced by `with_new_var`, oldest first
    pub fn vars(&self) -> &Vector<Var> {
        &self.vars
    }

    pub fn supply(&self) -> &VarSupply {
        &self.supply
    }

    pub fn lookup(&self, x: &Var) -> Option<&Term> {
        self.bindings.get(x)
    }

    pub fn is_bound(&self, x: &Var) -> bool {
        self.bindings.contains_key(x)
    }

    /// New state with `delta` merged over the current bindings.
    pub fn substituting(&self, delta: &Delta) -> State {
        // `im`'s union keeps the larger map's value on collision, so insert
        // the delta entry by entry to let it overwrite.
        let mut bindings = self.bindings.clone();
        bindings.extend(delta.0.clone());
        State {
            bindings,
            vars: self.vars.clone(),
            supply: self.supply.clone(),
        }
    }

    /// Allocate a fresh variable, record it in the ledger and run the goal
    /// `consumer` builds from it against the extended state.
    pub fn with_new_var<F, G>(&self, consumer: F) -> Stream
    where
        F: FnOnce(Term) -> G,
        G: Goal,
    {
        let x = self.supply.fresh();
        debug!(var = %x, "allocated fresh variable");

        let mut vars = self.vars.clone();
        vars.push_back(x.clone());
        let state = State {
            bindings: self.bindings.clone(),
            vars,
            supply: self.supply.clone(),
        };

        consumer(Term::Var(x)).apply(state)
    }

    // ========================================================================
    // Walk
    // ========================================================================

    /// Resolve a term through the current bindings.
    ///
    /// Bound variables are followed to their value, pair fields and
    /// expression operands are resolved recursively, and an expression whose
    /// operands both resolve to values collapses to its computed value.
    /// Never fails: an unevaluable expression stays an expression, and a
    /// cyclic binding chain stops at the variable that closes the cycle.
    pub fn walk(&self, t: &Term) -> Term {
        self.walk_guarded(t, &mut Vec::new())
    }

    fn walk_guarded(&self, t: &Term, path: &mut Vec<Var>) -> Term {
        match t {
            Term::Var(x) => {
                if path.contains(x) {
                    debug!(var = %x, "cyclic binding, stopping walk");
                    return t.clone();
                }
                match self.bindings.get(x) {
                    None => t.clone(),
                    Some(bound) => {
                        path.push(x.clone());
                        let resolved = self.walk_guarded(bound, path);
                        path.pop();
                        resolved
                    }
                }
            }

            // Sequences are long right-nested chains: walk the spine in a loop.
            Term::Pair(..) => {
                let mut heads = Vec::new();
                let mut current = t;
                while let Term::Pair(first, second) = current {
                    heads.push(self.walk_guarded(first, path));
                    current = second;
                }
                let tail = self.walk_guarded(current, path);
                heads
                    .into_iter()
                    .rev()
                    .fold(tail, |tail, head| Term::pair(head, tail))
            }

            Term::BinaryExpr(left, op, right) => {
                let left = self.walk_guarded(left, path);
                let right = self.walk_guarded(right, path);
                match evaluate(&left, *op, &right) {
                    Some(value) => value,
                    None => {
                        if left.is_ground() && right.is_ground() {
                            trace!(%left, op = op.symbol(), %right, "expression does not evaluate");
                        }
                        Term::BinaryExpr(Box::new(left), *op, Box::new(right))
                    }
                }
            }

            Term::Empty | Term::Value(_) => t.clone(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

// The supply is plumbing, not part of a state's identity.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings && self.vars == other.vars
    }
}
