//! Branching heuristics: policies for choosing the next decision literal.
//!
//! Every heuristic is a pure function from the formula's current literal
//! population to one literal. Selection is a closed enum dispatch, so the
//! compiler checks exhaustiveness; resolving a heuristic *name* is the only
//! fallible step and happens once, up front, in [`Heuristic::from_name`].
//!
//! Scoring ties are broken by first-seen order in clause traversal: each
//! maximum scan walks the literal population in order and only replaces the
//! incumbent on a strictly greater score. The "minimum-size clause" family
//! recomputes the minimum over the current clause set on every call.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// A heuristic identifier that failed to resolve. Fatal: the solve attempt
/// is aborted rather than silently falling back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic identifier: {name}")]
pub struct UnknownHeuristic {
    pub name: String,
}

/// The branching policies understood by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// The first literal in clause traversal order.
    FirstLiteral,
    /// A uniformly random literal from the current population.
    RandomLiteral,
    /// Maximum Occurrences in clauses of Minimum Size.
    Moms,
    /// The MOMS variant scoring variables by `(f(x)+f(¬x))·2^k + f(x)·f(¬x)`.
    MomsF { k: u32 },
    /// Freeman's POSIT: total occurrence count within minimum-size clauses.
    Posit,
    /// Zabih–McAllester: negative occurrences within minimum-size clauses.
    ZabihMcAllester,
    /// Dynamic Largest Combined Sum over all clauses.
    Dlcs,
    /// Dynamic Largest Individual Sum over all clauses.
    Dlis,
    /// Jeroslow–Wang, scored per literal.
    JeroslowWang,
    /// Two-sided Jeroslow–Wang, scored per variable.
    JeroslowWangTwoSided,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::FirstLiteral
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FirstLiteral => "first-literal",
            Self::RandomLiteral => "random-literal",
            Self::Moms => "moms",
            Self::MomsF { .. } => "momsf",
            Self::Posit => "posit",
            Self::ZabihMcAllester => "zm",
            Self::Dlcs => "dlcs",
            Self::Dlis => "dlis",
            Self::JeroslowWang => "jw",
            Self::JeroslowWangTwoSided => "jw2",
        };
        write!(f, "{name}")
    }
}

impl Heuristic {
    /// Resolves a heuristic by name. `momsf_k` is the `k` parameter used if
    /// the `momsf` heuristic is selected; it is threaded through explicitly
    /// rather than read from ambient state.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownHeuristic`] carrying the identifier that failed to
    /// resolve.
    pub fn from_name(name: &str, momsf_k: u32) -> Result<Self, UnknownHeuristic> {
        match name {
            "first-literal" => Ok(Self::FirstLiteral),
            "random-literal" => Ok(Self::RandomLiteral),
            "moms" => Ok(Self::Moms),
            "momsf" => Ok(Self::MomsF { k: momsf_k }),
            "posit" => Ok(Self::Posit),
            "zm" => Ok(Self::ZabihMcAllester),
            "dlcs" => Ok(Self::Dlcs),
            "dlis" => Ok(Self::Dlis),
            "jw" => Ok(Self::JeroslowWang),
            "jw2" => Ok(Self::JeroslowWangTwoSided),
            _ => Err(UnknownHeuristic {
                name: name.to_string(),
            }),
        }
    }

    /// Picks an unassigned literal from `cnf` to branch on.
    ///
    /// Must only be called on a non-terminal formula; returns `None` when
    /// the literal population is empty, which the driver treats as a dead
    /// branch.
    #[must_use]
    pub fn pick(self, cnf: &Cnf) -> Option<Literal> {
        match self {
            Self::FirstLiteral => cnf.literals().next(),
            Self::RandomLiteral => random_literal(cnf),
            Self::Moms => moms(cnf),
            Self::MomsF { k } => momsf(cnf, k),
            Self::Posit => posit(cnf),
            Self::ZabihMcAllester => zabih_mcallester(cnf),
            Self::Dlcs => dlcs(cnf),
            Self::Dlis => dlis(cnf),
            Self::JeroslowWang => jeroslow_wang(cnf),
            Self::JeroslowWangTwoSided => jeroslow_wang_two_sided(cnf),
        }
    }
}

/// Walks `options` in order and keeps the first literal whose score is
/// strictly greater than the incumbent's, so equal scores resolve to the
/// first-seen candidate.
fn max_by_score<S: PartialOrd>(
    options: impl IntoIterator<Item = Literal>,
    score: impl Fn(Literal) -> S,
) -> Option<Literal> {
    let mut best: Option<(Literal, S)> = None;

    for lit in options {
        let s = score(lit);
        let better = match &best {
            None => true,
            Some((_, incumbent)) => s > *incumbent,
        };
        if better {
            best = Some((lit, s));
        }
    }

    best.map(|(lit, _)| lit)
}

/// The literals of all clauses of globally minimum size, ties included.
/// The minimum is recomputed from the current clause set on every call.
fn min_clause_literals(cnf: &Cnf) -> impl Iterator<Item = Literal> + '_ {
    let min = cnf.clauses.iter().map(Clause::len).min().unwrap_or(0);

    cnf.clauses
        .iter()
        .filter(move |clause| clause.len() == min)
        .flat_map(Clause::iter)
        .copied()
}

/// Per-variable positive/negative occurrence counts over `options`.
fn polarity_counts(options: &[Literal]) -> FxHashMap<Variable, (u64, u64)> {
    let mut counts: FxHashMap<Variable, (u64, u64)> = FxHashMap::default();

    for lit in options {
        let entry = counts.entry(lit.variable()).or_default();
        if lit.polarity() {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    counts
}

fn random_literal(cnf: &Cnf) -> Option<Literal> {
    let count = cnf.literals().count();
    if count == 0 {
        return None;
    }
    cnf.literals().nth(fastrand::usize(..count))
}

fn moms(cnf: &Cnf) -> Option<Literal> {
    let options: Vec<Literal> = min_clause_literals(cnf).collect();

    let mut counts: FxHashMap<Literal, u64> = FxHashMap::default();
    for &lit in &options {
        *counts.entry(lit).or_default() += 1;
    }

    max_by_score(options.iter().copied(), |lit| counts[&lit])
}

fn momsf(cnf: &Cnf, k: u32) -> Option<Literal> {
    let options: Vec<Literal> = min_clause_literals(cnf).collect();
    let counts = polarity_counts(&options);

    let score = |lit: Literal| {
        let (f, g) = counts[&lit.variable()];
        (f + g) * (1u64 << k) + f * g
    };

    let best = max_by_score(options.iter().copied(), score)?;
    let (f, g) = counts[&best.variable()];
    Some(Literal::new(best.variable(), f >= g))
}

fn posit(cnf: &Cnf) -> Option<Literal> {
    let options: Vec<Literal> = min_clause_literals(cnf).collect();
    let counts = polarity_counts(&options);

    let best = max_by_score(options.iter().copied(), |lit| {
        let (f, g) = counts[&lit.variable()];
        f + g
    })?;

    let (f, g) = counts[&best.variable()];
    Some(Literal::new(best.variable(), f >= g))
}

fn zabih_mcallester(cnf: &Cnf) -> Option<Literal> {
    let options: Vec<Literal> = min_clause_literals(cnf).collect();
    let counts = polarity_counts(&options);

    let negatives = options.iter().copied().filter(|lit| !lit.polarity());
    let best = max_by_score(negatives, |lit| counts[&lit.variable()].1);

    // No negative literal among the minimum-size clauses: fall back to the
    // first literal of that set.
    best.or_else(|| options.first().copied())
}

fn dlcs(cnf: &Cnf) -> Option<Literal> {
    let options: Vec<Literal> = cnf.literals().collect();
    let counts = polarity_counts(&options);

    let best = max_by_score(options.iter().copied(), |lit| {
        let (f, g) = counts[&lit.variable()];
        f + g
    })?;

    let (f, g) = counts[&best.variable()];
    Some(Literal::new(best.variable(), f >= g))
}

fn dlis(cnf: &Cnf) -> Option<Literal> {
    let mut counts: FxHashMap<Literal, u64> = FxHashMap::default();
    for lit in cnf.literals() {
        *counts.entry(lit).or_default() += 1;
    }

    max_by_score(cnf.literals(), |lit| counts[&lit])
}

fn jeroslow_wang(cnf: &Cnf) -> Option<Literal> {
    let mut scores: FxHashMap<Literal, f64> = FxHashMap::default();

    for clause in &cnf.clauses {
        let weight = 2f64.powi(-i32::try_from(clause.len()).unwrap_or(i32::MAX));
        for &lit in clause.iter() {
            *scores.entry(lit).or_default() += weight;
        }
    }

    max_by_score(cnf.literals(), |lit| OrderedFloat(scores[&lit]))
}

fn jeroslow_wang_two_sided(cnf: &Cnf) -> Option<Literal> {
    let mut scores: FxHashMap<Variable, (f64, f64)> = FxHashMap::default();

    for clause in &cnf.clauses {
        let weight = 2f64.powi(-i32::try_from(clause.len()).unwrap_or(i32::MAX));
        for &lit in clause.iter() {
            let entry = scores.entry(lit.variable()).or_default();
            if lit.polarity() {
                entry.0 += weight;
            } else {
                entry.1 += weight;
            }
        }
    }

    let best = max_by_score(cnf.literals(), |lit| {
        let (f, g) = scores[&lit.variable()];
        OrderedFloat(f + g)
    })?;

    let (f, g) = scores[&best.variable()];
    Some(Literal::new(best.variable(), f >= g))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(clauses: Vec<Vec<i32>>, heuristic: Heuristic) -> Cnf {
        Cnf::new(clauses, heuristic).unwrap()
    }

    const ALL_NAMED: [Heuristic; 9] = [
        Heuristic::FirstLiteral,
        Heuristic::Moms,
        Heuristic::MomsF { k: 2 },
        Heuristic::Posit,
        Heuristic::ZabihMcAllester,
        Heuristic::Dlcs,
        Heuristic::Dlis,
        Heuristic::JeroslowWang,
        Heuristic::JeroslowWangTwoSided,
    ];

    #[test]
    fn test_from_name() {
        assert_eq!(
            Heuristic::from_name("momsf", 3),
            Ok(Heuristic::MomsF { k: 3 })
        );
        assert_eq!(Heuristic::from_name("jw2", 1), Ok(Heuristic::JeroslowWangTwoSided));

        let err = Heuristic::from_name("vsids", 1).unwrap_err();
        assert_eq!(err.name, "vsids");
    }

    #[test]
    fn test_first_literal() {
        let cnf = cnf(vec![vec![-2, 1], vec![3]], Heuristic::FirstLiteral);
        assert_eq!(Heuristic::FirstLiteral.pick(&cnf), Some(Literal::from(-2)));
    }

    #[test]
    fn test_moms_prefers_min_size_clauses() {
        // x4 dominates overall but only the binary clauses count; -1 occurs
        // twice among them.
        let formula = cnf(
            vec![
                vec![-1, 2],
                vec![-1, 3],
                vec![4, 4, 4, 2],
                vec![2, 3, 4],
            ],
            Heuristic::Moms,
        );
        assert_eq!(Heuristic::Moms.pick(&formula), Some(Literal::from(-1)));
    }

    #[test]
    fn test_momsf_polarity_rule() {
        // Within the binary clauses f(1) = 1, f(-1) = 2, so variable 1 wins
        // on the combined score and the negative polarity is returned.
        let formula = cnf(
            vec![vec![-1, 2], vec![-1, 3], vec![1, 4], vec![2, 3, 4]],
            Heuristic::MomsF { k: 2 },
        );
        assert_eq!(
            Heuristic::MomsF { k: 2 }.pick(&formula),
            Some(Literal::from(-1))
        );
    }

    #[test]
    fn test_posit_breaks_polarity_tie_positive() {
        let formula = cnf(
            vec![vec![1, 2], vec![-1, 3]],
            Heuristic::Posit,
        );
        // f(1) == f(-1) == 1: positive wins the tie.
        assert_eq!(Heuristic::Posit.pick(&formula), Some(Literal::from(1)));
    }

    #[test]
    fn test_zm_returns_negative_literal() {
        let formula = cnf(
            vec![vec![1, -2], vec![3, -2], vec![1, 2, 3]],
            Heuristic::ZabihMcAllester,
        );
        assert_eq!(
            Heuristic::ZabihMcAllester.pick(&formula),
            Some(Literal::from(-2))
        );
    }

    #[test]
    fn test_zm_falls_back_without_negatives() {
        let formula = cnf(
            vec![vec![1, 2], vec![-3, 2, 1]],
            Heuristic::ZabihMcAllester,
        );
        // No negative literal among the minimum-size clauses.
        assert_eq!(
            Heuristic::ZabihMcAllester.pick(&formula),
            Some(Literal::from(1))
        );
    }

    #[test]
    fn test_dlcs_counts_all_clauses() {
        let formula = cnf(
            vec![vec![1, -2], vec![-2, 3], vec![-2, 1, 3]],
            Heuristic::Dlcs,
        );
        // Variable 2 occurs three times, always negatively.
        assert_eq!(Heuristic::Dlcs.pick(&formula), Some(Literal::from(-2)));
    }

    #[test]
    fn test_dlis_scores_literals_independently() {
        let formula = cnf(
            vec![vec![1, -2], vec![-2, 3], vec![2, 3]],
            Heuristic::Dlis,
        );
        // -2 occurs twice; 2 only once, so the polarity matters.
        assert_eq!(Heuristic::Dlis.pick(&formula), Some(Literal::from(-2)));
    }

    #[test]
    fn test_jw_weights_short_clauses_higher() {
        let formula = cnf(
            vec![vec![1, 2], vec![3, 2, 1, 4], vec![3, 4, -1, 2]],
            Heuristic::JeroslowWang,
        );
        // J(2) = 2^-2 + 2^-4 + 2^-4 beats every other literal.
        assert_eq!(
            Heuristic::JeroslowWang.pick(&formula),
            Some(Literal::from(2))
        );
    }

    #[test]
    fn test_jw2_accumulates_per_variable() {
        let formula = cnf(
            vec![vec![1, -2], vec![2, 3], vec![-2, 4]],
            Heuristic::JeroslowWangTwoSided,
        );
        // Variable 2 scores in all three clauses; negative side dominates.
        assert_eq!(
            Heuristic::JeroslowWangTwoSided.pick(&formula),
            Some(Literal::from(-2))
        );
    }

    #[test]
    fn test_determinism() {
        let formula = cnf(
            vec![vec![1, 2, 3], vec![-1, -2], vec![2, -3], vec![-1, 3]],
            Heuristic::FirstLiteral,
        );
        for heuristic in ALL_NAMED {
            let first = heuristic.pick(&formula);
            assert_eq!(first, heuristic.pick(&formula), "{heuristic}");
        }
    }

    #[test]
    fn test_picked_literal_is_in_population() {
        let formula = cnf(
            vec![vec![1, -4], vec![-1, 2, 3], vec![4, -3], vec![-2, 4]],
            Heuristic::FirstLiteral,
        );
        let population: Vec<Literal> = formula.literals().collect();
        for heuristic in ALL_NAMED {
            let picked = heuristic.pick(&formula).unwrap();
            assert!(population.contains(&picked), "{heuristic} picked {picked}");
        }

        let random = Heuristic::RandomLiteral.pick(&formula).unwrap();
        assert!(population.contains(&random));
    }

    #[test]
    fn test_pick_on_empty_population() {
        let formula = cnf(vec![], Heuristic::FirstLiteral);
        for heuristic in ALL_NAMED {
            assert_eq!(heuristic.pick(&formula), None);
        }
        assert_eq!(Heuristic::RandomLiteral.pick(&formula), None);
    }
}
