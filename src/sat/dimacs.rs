//! A parser for the DIMACS CNF file format.
//!
//! The format: comment lines start with `c`, the problem line with
//! `p cnf <vars> <clauses>`, and every clause line is a run of signed
//! integers terminated by `0`. A `%` line marks end-of-data in some
//! competition files. The problem line's counts are ignored; variable and
//! clause counts are derived from the clauses actually found.

use crate::sat::branching::Heuristic;
use crate::sat::cnf::{Cnf, CnfError};
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Reasons a DIMACS input failed to produce a formula.
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse literal {token:?} as a signed integer")]
    InvalidLiteral { token: String },

    #[error(transparent)]
    Malformed(#[from] CnfError),
}

/// Parses DIMACS formatted data from a `BufRead` source.
///
/// Comment and problem lines are skipped, a `%` line stops parsing, and the
/// terminating `0` of each clause line is dropped. A line consisting of only
/// `0` denotes an empty clause and is rejected by formula construction.
///
/// # Errors
///
/// [`DimacsError::Io`] on read failure, [`DimacsError::InvalidLiteral`] on a
/// non-integer token, [`DimacsError::Malformed`] when the clauses do not
/// form a well-formed formula.
pub fn parse_dimacs<R: BufRead>(reader: R, heuristic: Heuristic) -> Result<Cnf, DimacsError> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c" | &"p") => {}
            Some(_) => {
                let literals: Vec<i32> = parts
                    .map(|token| {
                        token.parse::<i32>().map_err(|_| DimacsError::InvalidLiteral {
                            token: token.to_string(),
                        })
                    })
                    .try_collect()?;

                clauses.push(literals.into_iter().filter(|&lit| lit != 0).collect());
            }
        }
    }

    Ok(Cnf::new(clauses, heuristic)?)
}

/// Parses a DIMACS CNF file from `path`.
///
/// # Errors
///
/// See [`parse_dimacs`]; additionally fails if the file cannot be opened.
pub fn parse_file<P: AsRef<Path>>(path: P, heuristic: Heuristic) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file), heuristic)
}
