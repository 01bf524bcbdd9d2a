// Relational Unification Kernel
//
// A microKanren-style unification core with arithmetic reverse solving.
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// src/core/fresh.rs
// Fresh variable allocation

use crate::ast::Var;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Hands out variables with distinct names.
///
/// Clones share one counter, so every state derived from the same root
/// allocates from the same sequence. Names have the form `<prefix>.<n>`;
/// the `.` keeps them apart from identifiers written in query text.
#[derive(Clone)]
pub struct VarSupply {
    prefix: Arc<str>,
    counter: Arc<AtomicU64>,
}

impl VarSupply {
    /// A supply with a prefix no other `new` supply in this process has,
    /// so unrelated roots never hand out the same variable.
    pub fn new() -> Self {
        static SUPPLY_IDS: AtomicU64 = AtomicU64::new(0);
        let id = SUPPLY_IDS.fetch_add(1, Ordering::SeqCst);
        Self::with_prefix(&format!("_{}", id))
    }

    /// The caller owns the namespace: two supplies built with the same
    /// prefix count independently and can hand out equal names.
    pub fn with_prefix(prefix: &str) -> Self {
        VarSupply {
            prefix: Arc::from(prefix),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The process-wide supply used by `State::new`.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<VarSupply> = OnceLock::new();
        GLOBAL.get_or_init(|| VarSupply::with_prefix("var")).clone()
    }

    pub fn fresh(&self) -> Var {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        Var(format!("{}.{}", self.prefix, id))
    }

    /// Number of variables handed out so far
    pub fn allocated(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn shares_counter_with(&self, other: &VarSupply) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

impl Default for VarSupply {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VarSupply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VarSupply")
            .field("prefix", &self.prefix)
            .field("allocated", &self.allocated())
            .finish()
    }
}
