use crate::{CutSet, Expression, MinimalCutSets};
use std::fmt::{Display, Error, Formatter};

impl MinimalCutSets {
    /// The cut sets, in canonical order.
    pub fn cut_sets(&self) -> &[CutSet] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no cut sets, i.e. the scenario is impossible.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same as `is_empty`.
    pub fn is_false(&self) -> bool {
        self.is_empty()
    }

    /// True if the only cut set is empty, i.e. the expression is satisfied unconditionally.
    pub fn is_true(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_empty()
    }

    /// Check that no cut set is a subset of another cut set.
    pub fn is_minimal(&self) -> bool {
        self.0.iter().enumerate().all(|(i, a)| {
            self.0
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_subset_of(b))
        })
    }

    /// Evaluate the disjunction of cut sets for the given truth assignment.
    pub fn eval_in<F: Fn(&str) -> bool>(&self, valuation: &F) -> bool {
        self.0.iter().any(|cut_set| cut_set.eval_in(valuation))
    }

    /// Convert the cut sets into an `Or` of conjunctions. A single cut set is returned without
    /// the `Or` wrapper, no cut sets result in an empty `Or` (i.e. `false`).
    pub fn to_expression(&self) -> Expression {
        let mut terms: Vec<Expression> = self.0.iter().map(|c| c.to_expression()).collect();
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            Expression::Or(terms)
        }
    }
}

/// Cut sets in the input notation, e.g. `A*NOT_B + C`. Prints `FALSE` when there are no
/// cut sets and `TRUE` for a single empty cut set.
impl Display for MinimalCutSets {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.0.is_empty() {
            return write!(f, "FALSE");
        }
        for (i, cut_set) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", cut_set)?;
        }
        Ok(())
    }
}
