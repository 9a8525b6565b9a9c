//! **(internal)** Conversion of an `Expression` into `MinimalCutSets`.
//!
//! Negations are pushed down to the atoms while the expression is traversed, so the tree is
//! never rewritten into negation normal form explicitly. Conjunctions are distributed over
//! disjunctions one factor at a time, and every intermediate sum of products is reduced
//! (contradictions dropped, duplicates removed, supersets absorbed) before the next factor is
//! processed, which keeps the intermediate results as small as possible.

use crate::Expression::*;
use crate::{
    CutSet, Expression, Literal, MinimalCutSets, PraError, SolverConfig, MAX_EXPRESSION_DEPTH,
};

impl Expression {
    /// Reduce this expression to its minimal cut sets, using the default `SolverConfig`
    /// limits, and convert them back into an `Expression`.
    ///
    /// The result is an `Or` of `And` terms (or a single term when there is only one cut set),
    /// an empty `Or` if the expression is unsatisfiable, or an empty `And` if one cut set
    /// is empty (i.e. the expression is always true).
    pub fn minimize(&self) -> Result<Expression, PraError> {
        Ok(self
            .minimal_cut_sets(&SolverConfig::default())?
            .to_expression())
    }

    /// Compute the minimal cut sets of this expression.
    ///
    /// Fails with `PraError::ResourceExhaustion` when some intermediate sum of products
    /// exceeds `config.max_cut_sets` terms, or when the expression is nested deeper than
    /// `MAX_EXPRESSION_DEPTH` levels.
    pub fn minimal_cut_sets(&self, config: &SolverConfig) -> Result<MinimalCutSets, PraError> {
        let terms = sum_of_products(self, false, config.max_cut_sets, 0)?;
        let result = MinimalCutSets(terms);
        if cfg!(feature = "shields_up") && !result.is_minimal() {
            panic!("Cut sets {} are not minimal.", result);
        }
        Ok(result)
    }
}

impl MinimalCutSets {
    /// Create minimal cut sets from an arbitrary list of cut sets by removing duplicates
    /// and absorbed supersets.
    pub fn from_cut_sets(cut_sets: Vec<CutSet>) -> MinimalCutSets {
        MinimalCutSets(absorb(cut_sets))
    }
}

/// **(internal)** Compute the reduced sum of products of `expression` (or of its negation
/// when `negated` is set). The `depth` is the depth of `expression` in the whole tree.
fn sum_of_products(
    expression: &Expression,
    negated: bool,
    limit: usize,
    depth: usize,
) -> Result<Vec<CutSet>, PraError> {
    if depth > MAX_EXPRESSION_DEPTH {
        return Err(PraError::ResourceExhaustion {
            what: "levels of expression nesting",
            limit: MAX_EXPRESSION_DEPTH,
        });
    }
    match expression {
        Atom(name) => Ok(vec![CutSet::singleton(Literal::new(name, !negated))]),
        Not(inner) => sum_of_products(inner, !negated, limit, depth + 1),
        // De Morgan: a negated disjunction is a conjunction and vice versa.
        And(args) if !negated => product(args, negated, limit, depth + 1),
        Or(args) if negated => product(args, negated, limit, depth + 1),
        And(args) | Or(args) => sum(args, negated, limit, depth + 1),
    }
}

/// **(internal)** Distribute the conjunction of `args` over their sums of products.
fn product(
    args: &[Expression],
    negated: bool,
    limit: usize,
    depth: usize,
) -> Result<Vec<CutSet>, PraError> {
    let mut result = vec![CutSet::empty()];
    for arg in args {
        let factor = sum_of_products(arg, negated, limit, depth)?;
        let mut terms = Vec::new();
        for left in &result {
            for right in &factor {
                if let Some(term) = left.merge(right) {
                    terms.push(term);
                    check_limit(terms.len(), limit)?;
                }
            }
        }
        result = absorb(terms);
        if result.is_empty() {
            // A false factor makes the whole conjunction false.
            break;
        }
    }
    Ok(result)
}

/// **(internal)** Collect the sums of products of all `args` into one sum.
fn sum(
    args: &[Expression],
    negated: bool,
    limit: usize,
    depth: usize,
) -> Result<Vec<CutSet>, PraError> {
    let mut terms = Vec::new();
    for arg in args {
        terms.append(&mut sum_of_products(arg, negated, limit, depth)?);
        check_limit(terms.len(), limit)?;
    }
    Ok(absorb(terms))
}

fn check_limit(terms: usize, limit: usize) -> Result<(), PraError> {
    if terms > limit {
        Err(PraError::ResourceExhaustion {
            what: "product terms during minimization",
            limit,
        })
    } else {
        Ok(())
    }
}

/// **(internal)** Sort the terms canonically, remove duplicates and drop every term which
/// is a superset of another term.
///
/// Since terms are sorted by size first, a subset always precedes its supersets, so it is
/// enough to compare each term with the terms that were already kept.
pub(crate) fn absorb(mut terms: Vec<CutSet>) -> Vec<CutSet> {
    terms.sort();
    terms.dedup();
    let mut result: Vec<CutSet> = Vec::with_capacity(terms.len());
    for term in terms {
        if !result.iter().any(|kept| kept.is_subset_of(&term)) {
            result.push(term);
        }
    }
    result
}
