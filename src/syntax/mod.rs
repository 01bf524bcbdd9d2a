// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/syntax/mod.rs
// Text syntax for terms and queries

pub mod parser;
pub mod pretty;

pub use parser::{parse_query_str, parse_term_str};
pub use pretty::Answer;
