// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/unify/goal.rs
// Goals: thin wiring from terms to state streams

use crate::ast::{Query, Relation, Term};
use crate::core::fresh::VarSupply;
use crate::core::state::State;

/// A lazy sequence of states. Nothing is computed until it is pulled.
pub type Stream = Box<dyn Iterator<Item = State>>;

/// Something that maps a state to the states that satisfy it
pub trait Goal {
    fn apply(&self, state: State) -> Stream;
}

impl<F> Goal for F
where
    F: Fn(State) -> Stream,
{
    fn apply(&self, state: State) -> Stream {
        self(state)
    }
}

impl Goal for Query {
    fn apply(&self, state: State) -> Stream {
        match self.relation {
            Relation::Unify => state.unify(&self.left, &self.right),
            Relation::Disunify => state.disunify(&self.left, &self.right),
        }
    }
}

pub fn unify(left: impl Into<Term>, right: impl Into<Term>) -> impl Goal {
    let (left, right) = (left.into(), right.into());
    move |state: State| state.unify(&left, &right)
}

pub fn disunify(left: impl Into<Term>, right: impl Into<Term>) -> impl Goal {
    let (left, right) = (left.into(), right.into());
    move |state: State| state.disunify(&left, &right)
}

/// Introduce a fresh variable and hand it to `f`
pub fn fresh<F, G>(f: F) -> impl Goal
where
    F: Fn(Term) -> G,
    G: Goal,
{
    move |state: State| state.with_new_var(&f)
}

/// Run a goal against the empty state
pub fn run_goal(goal: impl Goal) -> Stream {
    goal.apply(State::new())
}

/// Run a goal against an empty state drawing variables from `supply`
pub fn run_goal_with(supply: VarSupply, goal: impl Goal) -> Stream {
    goal.apply(State::with_supply(supply))
}
