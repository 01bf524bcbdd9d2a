// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/error.rs
// Error types for term construction and parsing

use thiserror::Error;

/// Errors raised while turning a native value into a term.
///
/// Unification failure is not represented here: it is an empty stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The native value has no term representation
    #[error("cannot create a term with value of type {type_name}")]
    UnsupportedType { type_name: String },

    /// Fixed-size tuples must have exactly two elements
    #[error("tuple terms can only have two elements, found {found}")]
    TupleArity { found: usize },

    /// NaN and the infinities have no term representation
    #[error("cannot create a term from the non-finite float {value}")]
    NonFiniteFloat { value: String },
}

/// Errors raised by the text syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("parse error: {0}")]
    Syntax(String),

    #[error("unconsumed input: '{0}'")]
    Trailing(String),

    #[error("incomplete input")]
    Incomplete,
}
