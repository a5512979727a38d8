//! The DPLL (Davis–Putnam–Logemann–Loveland) search driver.
//!
//! The driver owns the search implicitly through recursion: each call
//! simplifies its exclusively-owned formula, checks the two terminal
//! conditions, and otherwise branches on a heuristically chosen literal over
//! two independent clones. The result of a branch is the lazy OR of its two
//! children; the false child is never explored once the true child succeeds,
//! so split counters reflect only the branches actually visited.

use crate::sat::cnf::Cnf;

/// Toggles for the two simplification rules.
///
/// Pure-literal elimination is off by default: recomputing purity after
/// every elimination can dominate runtime on larger instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub unit_propagation: bool,
    pub pure_elimination: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            unit_propagation: true,
            pure_elimination: false,
        }
    }
}

/// Best-effort observability counters. Never affect the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStats {
    /// Number of branching decisions taken.
    pub total_splits: usize,
    /// Number of explored branches that ended in a conflict.
    pub failed_splits: usize,
}

/// The outcome of a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A satisfying assignment was found.
    Satisfiable {
        /// Signed variable ids assigned true, ordered by variable.
        assignment: Vec<i32>,
        /// How many literals unit propagation resolved along the way.
        units_applied: usize,
        /// How many literals pure-literal elimination resolved.
        pures_applied: usize,
    },
    /// No assignment satisfies the formula.
    Unsatisfiable,
}

impl Verdict {
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable { .. })
    }
}

/// A recursive DPLL solver for one static formula.
#[derive(Debug, Clone)]
pub struct Dpll {
    cnf: Cnf,
    options: SolverOptions,
    stats: SolverStats,
}

impl Dpll {
    #[must_use]
    pub const fn new(cnf: Cnf, options: SolverOptions) -> Self {
        Self {
            cnf,
            options,
            stats: SolverStats {
                total_splits: 0,
                failed_splits: 0,
            },
        }
    }

    /// Decides satisfiability of the formula.
    ///
    /// The solver's own copy of the formula is left untouched, so the run
    /// can be repeated (relevant for the randomized heuristic).
    pub fn solve(&mut self) -> Verdict {
        let root = self.cnf.clone();

        match self.search(root, true) {
            Some(cnf) => Verdict::Satisfiable {
                assignment: cnf.solutions(),
                units_applied: cnf.units.len(),
                pures_applied: cnf.pures.len(),
            },
            None => Verdict::Unsatisfiable,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }

    /// One node of the search tree. Returns the satisfied formula (carrying
    /// the accumulated solution and audit trails) or `None` for a dead
    /// branch.
    fn search(&mut self, mut cnf: Cnf, at_root: bool) -> Option<Cnf> {
        if self.options.unit_propagation {
            cnf.unit_propagate();
        }

        if self.options.pure_elimination {
            cnf.pure_eliminate();
        }

        if cnf.has_empty_clause() {
            if !at_root {
                self.stats.failed_splits += 1;
            }
            return None;
        }

        if cnf.is_empty() {
            return Some(cnf);
        }

        let literal = cnf.heuristic.pick(&cnf)?;
        self.stats.total_splits += 1;

        let mut true_branch = cnf.clone();
        let mut false_branch = cnf;

        // The false branch assigns the negated literal *true* so that the
        // decision lands in the solution list either way; the effect on the
        // underlying variable is identical to assigning the literal false.
        true_branch.assign(literal, true);
        false_branch.assign(literal.negated(), true);

        if let Some(satisfied) = self.search(true_branch, false) {
            return Some(satisfied);
        }

        self.search(false_branch, false)
    }
}

/// Convenience wrapper: solves `cnf` with the given toggles and returns the
/// verdict together with the split counters.
#[must_use]
pub fn solve(cnf: Cnf, use_pure_elimination: bool, use_unit_propagation: bool) -> (Verdict, SolverStats) {
    let mut solver = Dpll::new(
        cnf,
        SolverOptions {
            unit_propagation: use_unit_propagation,
            pure_elimination: use_pure_elimination,
        },
    );
    let verdict = solver.solve();
    (verdict, solver.stats())
}
