//! The CNF formula and its simplification engine.
//!
//! A [`Cnf`] owns everything a search branch needs: the clause set, the
//! assignment arena, the accumulated solution, the branching heuristic to
//! apply, and the unit/pure audit trails. `Clone` therefore yields a fully
//! independent copy, which is what lets the DPLL driver explore both sides
//! of a decision without the branches interfering.
//!
//! Assignments here follow a transient pattern: [`Cnf::assign`] sets the
//! variable, simplifies the clause set structurally, then unassigns the
//! variable again. The record of what was decided lives in the surviving
//! clause structure and the solution list, so the same variable evaluates as
//! unassigned for every later decision in the same branch.

use crate::sat::assignment::Assignment;
use crate::sat::branching::Heuristic;
use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use bit_vec::BitVec;
use core::fmt;
use thiserror::Error;

/// A structurally malformed formula, rejected before solving starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CnfError {
    /// The input contained an empty clause, so the formula is unsatisfiable
    /// before any assignment is made.
    #[error("clause {index} is empty: the formula is trivially unsatisfiable")]
    EmptyClause { index: usize },
}

/// A conjunction of clauses, together with the solving state that travels
/// with it down the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    /// The clauses still in play. Simplification removes satisfied clauses
    /// and falsified literals, so anything left here is undecided.
    pub clauses: Vec<Clause>,
    /// Truth values of all variables, indexed by tag.
    pub assignment: Assignment,
    /// Literals assigned true so far, in decision order.
    pub solution: Vec<Literal>,
    /// The branching heuristic applied when a decision is needed.
    pub heuristic: Heuristic,
    /// Literals resolved by unit propagation. Informational only.
    pub units: Vec<Literal>,
    /// Literals resolved by pure-literal elimination. Informational only.
    pub pures: Vec<Literal>,
    /// One past the highest variable tag mentioned by any clause.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from raw signed-integer clauses.
    ///
    /// # Errors
    ///
    /// Returns [`CnfError::EmptyClause`] if any input clause has no literals.
    pub fn new<I>(clauses: I, heuristic: Heuristic) -> Result<Self, CnfError>
    where
        I: IntoIterator<Item = Vec<i32>>,
    {
        let clauses: Vec<Clause> = clauses.into_iter().map(Clause::from).collect();

        if let Some(index) = clauses.iter().position(Clause::is_empty) {
            return Err(CnfError::EmptyClause { index });
        }

        let num_vars = clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|lit| lit.variable() as usize)
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            clauses,
            assignment: Assignment::new(num_vars),
            solution: Vec::new(),
            heuristic,
            units: Vec::new(),
            pures: Vec::new(),
            num_vars,
        })
    }

    /// Whether no clauses remain: the formula is satisfied under the
    /// decisions made so far.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether any clause has been emptied out: the current branch is
    /// unsatisfiable.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// All literals of all remaining clauses, in clause traversal order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.clauses.iter().flat_map(Clause::iter).copied()
    }

    /// Removes clauses satisfied by the current assignment, then removes
    /// falsified literals from the clauses that survive.
    ///
    /// Idempotent: with no new assignment a second run changes nothing,
    /// since the first already stripped every decided literal.
    pub fn simplify(&mut self) {
        let assignment = &self.assignment;

        self.clauses
            .retain(|clause| !clause.iter().any(|lit| lit.value(assignment) == Some(true)));

        for clause in &mut self.clauses {
            clause
                .literals
                .retain(|lit| lit.value(assignment) != Some(false));
        }
    }

    /// Assigns `literal` to `value`, simplifies, and releases the variable.
    ///
    /// The structural effect on the clause set is permanent; the variable
    /// flag is transient so sibling branches cloned from a common ancestor
    /// evaluate later decisions from an unassigned baseline.
    pub fn assign(&mut self, literal: Literal, value: bool) {
        if value {
            self.solution.push(literal);
        }

        literal.assign(&mut self.assignment, value);
        self.simplify();
        literal.unassign(&mut self.assignment);
    }

    /// Forces every unit clause's literal true until none remain.
    ///
    /// Units are processed as soon as found and the clause set is rescanned
    /// from the start after each one, since an assignment can create or
    /// remove units anywhere. Stops early once an empty clause appears:
    /// further propagation is pointless on an unsatisfiable branch.
    pub fn unit_propagate(&mut self) {
        loop {
            let Some(unit) = self.clauses.iter().find_map(Clause::unit) else {
                return;
            };

            self.units.push(unit);
            self.assign(unit, true);

            if self.has_empty_clause() {
                return;
            }
        }
    }

    /// Assigns pure literals true until none remain.
    ///
    /// A literal is pure when its opposite occurs in no clause. Eliminating
    /// one can change the purity of others, so the scan restarts after each
    /// elimination. Each round is a single linear pass over the clause set
    /// building per-polarity occurrence tables.
    pub fn pure_eliminate(&mut self) {
        loop {
            let mut pos_seen = BitVec::from_elem(self.num_vars + 1, false);
            let mut neg_seen = BitVec::from_elem(self.num_vars + 1, false);

            for lit in self.literals() {
                let var = lit.variable() as usize;
                if lit.polarity() {
                    pos_seen.set(var, true);
                } else {
                    neg_seen.set(var, true);
                }
            }

            let pure = self.literals().find(|lit| {
                let var = lit.variable() as usize;
                if lit.polarity() {
                    !neg_seen[var]
                } else {
                    !pos_seen[var]
                }
            });

            match pure {
                Some(lit) => {
                    self.pures.push(lit);
                    self.assign(lit, true);
                }
                None => return,
            }
        }
    }

    /// The accumulated model as signed variable ids, ordered by variable.
    #[must_use]
    pub fn solutions(&self) -> Vec<i32> {
        let mut model: Vec<i32> = self.solution.iter().map(|lit| lit.to_i32()).collect();
        model.sort_unstable_by_key(|lit| lit.unsigned_abs());
        model
    }

    /// Checks a model against this formula's clauses: every clause must
    /// contain at least one literal of the model.
    #[must_use]
    pub fn verify(&self, model: &[i32]) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|lit| model.contains(&lit.to_i32())))
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "p cnf {} {}",
            self.num_vars.saturating_sub(1),
            self.clauses.len()
        )?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
