// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/unify/mod.rs
// Unification engine and goal wiring

pub mod goal;
pub mod unification;

pub use unification::Candidates;
