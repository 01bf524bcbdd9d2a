// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/core/mod.rs
// Evaluation core: arithmetic, variable supply and substitution state

pub mod eval;
pub mod fresh;
pub mod state;
