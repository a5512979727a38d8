//! Literals: a variable tag paired with a polarity.
//!
//! A literal never aliases variable state directly; it carries the tag of its
//! variable and reads or writes truth values through the [`Assignment`]
//! arena. Two literals are opposites when they share a variable but differ in
//! polarity.

use crate::sat::assignment::Assignment;
use core::fmt;
use core::ops::{Neg, Not};

pub type Variable = u32;

/// A variable or its negation. `polarity == true` means unnegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    var: Variable,
    polarity: bool,
}

impl Literal {
    #[must_use]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        Self { var, polarity }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.var
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.polarity
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            var: self.var,
            polarity: !self.polarity,
        }
    }

    /// Whether `other` refers to the same variable with the opposite polarity.
    #[must_use]
    pub const fn is_opposite(self, other: Self) -> bool {
        self.var == other.var && self.polarity != other.polarity
    }

    /// The literal's truth value under `assignment`, or `None` while the
    /// underlying variable is unassigned.
    #[must_use]
    pub fn value(self, assignment: &Assignment) -> Option<bool> {
        assignment
            .var_value(self.var as usize)
            .map(|b| b == self.polarity)
    }

    /// Makes this literal evaluate to `value` by assigning the underlying
    /// variable. Assigning `-x` to true sets `x` to false.
    pub fn assign(self, assignment: &mut Assignment, value: bool) {
        assignment.set(self.var as usize, value == self.polarity);
    }

    /// Restores the underlying variable to unassigned, regardless of which
    /// literal of the variable did the assigning.
    pub fn unassign(self, assignment: &mut Assignment) {
        assignment.unset(self.var as usize);
    }

    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self {
            var: value.unsigned_abs(),
            polarity: value.is_positive(),
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i32(self) -> i32 {
        if self.polarity {
            self.var as i32
        } else {
            -(self.var as i32)
        }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(Literal::new(1, true).negated(), Literal::new(1, false));
        assert_eq!(-Literal::new(2, true), Literal::new(2, false));
    }

    #[test]
    fn test_from_i32_round_trip() {
        assert_eq!(Literal::from(-3), Literal::new(3, false));
        assert_eq!(Literal::from(3).to_i32(), 3);
        assert_eq!(Literal::from(-3).to_i32(), -3);
    }

    #[test]
    fn test_opposite() {
        assert!(Literal::from(4).is_opposite(Literal::from(-4)));
        assert!(!Literal::from(4).is_opposite(Literal::from(4)));
        assert!(!Literal::from(4).is_opposite(Literal::from(-5)));
    }

    #[test]
    fn test_value_tracks_polarity() {
        let mut assignment = Assignment::new(2);
        let lit = Literal::from(-2);

        assert_eq!(lit.value(&assignment), None);

        // Assigning -x2 to true drives x2 to false.
        lit.assign(&mut assignment, true);
        assert_eq!(assignment.var_value(2), Some(false));
        assert_eq!(lit.value(&assignment), Some(true));
        assert_eq!(lit.negated().value(&assignment), Some(false));

        lit.negated().unassign(&mut assignment);
        assert_eq!(lit.value(&assignment), None);
    }
}
