// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/lib.rs
// Relational unification kernel library

pub mod ast;
pub mod core;
pub mod error;
pub mod syntax;
pub mod unify;

// Re-export commonly used items
pub use ast::{
    term, term_from_json, BinaryOp, Native, NativeType, Query, Relation, Scalar, Term, Var,
};
pub use crate::core::eval::{evaluate, reverse_left, reverse_right, Solutions};
pub use crate::core::fresh::VarSupply;
pub use crate::core::state::{Delta, State};
pub use error::{ConstructionError, ParseError};
pub use syntax::{parse_query_str, parse_term_str, Answer};
pub use unify::goal::{self, fresh, run_goal, run_goal_with, Goal, Stream};
pub use unify::Candidates;
