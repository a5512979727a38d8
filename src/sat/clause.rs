//! Clauses: disjunctions of literals.

use crate::sat::literal::Literal;
use core::fmt;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

/// Inline storage for the common case of short clauses.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// A disjunction of literals. An empty clause denotes logical false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    pub literals: LiteralStorage,
}

impl Clause {
    #[must_use]
    pub fn new(literals: Vec<i32>) -> Self {
        Self {
            literals: literals.into_iter().map(Literal::from).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The forced literal if this is a unit clause, else `None`.
    #[must_use]
    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [lit] => Some(*lit),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl IndexMut<usize> for Clause {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl From<&Vec<i32>> for Clause {
    fn from(literals: &Vec<i32>) -> Self {
        Self::new(literals.clone())
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.literals {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}
