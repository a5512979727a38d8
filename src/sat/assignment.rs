//! The assignment arena: tri-state truth values for every variable.
//!
//! Variables are plain integer tags, so their state lives in a flat vector
//! indexed by tag rather than behind shared references. Cloning a formula
//! clones the arena wholesale, which guarantees that sibling search branches
//! can never observe each other's assignments.

use core::ops::{Index, IndexMut};

/// The truth state of a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

/// Truth values for all variables of a formula, indexed by variable tag.
///
/// Slot 0 is unused: DIMACS variable tags start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Index<usize> for Assignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Assignment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    pub fn set(&mut self, var: usize, b: bool) {
        self.0[var] = VarState::Assigned(b);
    }

    pub fn unset(&mut self, var: usize) {
        self.0[var] = VarState::Unassigned;
    }

    #[must_use]
    pub fn var_value(&self, var: usize) -> Option<bool> {
        match self.0.get(var) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }
}
