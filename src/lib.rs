//! A DPLL SAT solver with pluggable branching heuristics.
//!
//! The solver takes a formula in conjunctive normal form, applies unit
//! propagation and (optionally) pure-literal elimination, and searches the
//! remaining decision space by recursive backtracking. Ten branching
//! heuristics are available, from plain first-literal up to two-sided
//! Jeroslow–Wang.

/// The `sat` module implements the solver: the CNF data model, the
/// simplification engine, the branching heuristics, the DPLL driver and a
/// DIMACS parser.
pub mod sat;
