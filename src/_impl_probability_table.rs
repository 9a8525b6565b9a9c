use crate::_impl_symbol_table::check_event_name;
use crate::{CutSet, Expression, MinimalCutSets, PraError, ProbabilityTable, SolverConfig};
use fxhash::FxHashMap;

impl ProbabilityTable {
    /// Create an empty probability table.
    pub fn new() -> ProbabilityTable {
        ProbabilityTable {
            probabilities: FxHashMap::default(),
        }
    }

    /// Build a table from `(name, probability)` pairs. See `ProbabilityTable::insert`.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Result<ProbabilityTable, PraError> {
        let mut table = ProbabilityTable::new();
        for (name, probability) in pairs {
            table.insert(name, *probability)?;
        }
        Ok(table)
    }

    /// Assign a probability to a basic event.
    ///
    /// Fails with `PraError::MalformedInput` if the name is not a valid event name, the event
    /// already has a probability, or the value is not a number in $[0, 1]$.
    pub fn insert(&mut self, name: &str, probability: f64) -> Result<(), PraError> {
        check_event_name(name)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(PraError::MalformedInput(format!(
                "Probability of `{}` must be in [0, 1], found {}.",
                name, probability
            )));
        }
        if self.probabilities.contains_key(name) {
            return Err(PraError::MalformedInput(format!(
                "Event `{}` has more than one probability.",
                name
            )));
        }
        self.probabilities.insert(name.to_string(), probability);
        Ok(())
    }

    /// Probability of the given basic event, if known.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.probabilities.get(name).cloned()
    }

    /// Names of all basic events in this table, sorted alphabetically.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.probabilities.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Probability of a conjunction of independent literals: the product of $p$ for every
    /// positive literal and $1 - p$ for every negative literal. The empty cut set has
    /// probability $1$.
    pub fn cut_set_probability(&self, cut_set: &CutSet) -> Result<f64, PraError> {
        let mut result = 1.0;
        for literal in cut_set.literals() {
            let p = self
                .get(literal.name())
                .ok_or_else(|| PraError::MissingProbability(literal.name().to_string()))?;
            result *= if literal.is_positive() { p } else { 1.0 - p };
        }
        Ok(result)
    }

    /// Exact probability of the union of `cut_sets`, computed using the inclusion–exclusion
    /// principle.
    ///
    /// Every non-empty subset of cut sets contributes the probability of the conjunction of
    /// its literals, added for odd and subtracted for even subset sizes. Subsets whose
    /// conjunction is contradictory contribute nothing, and neither do their supersets, so
    /// these are pruned. Subsets are always visited in the same order, hence the result is
    /// reproducible.
    ///
    /// The cost is exponential in the number of cut sets, so the evaluation fails with
    /// `PraError::ResourceExhaustion` for more than `config.max_inclusion_exclusion_sets`
    /// cut sets. The result can drift slightly outside of $[0, 1]$ due to rounding.
    pub fn union_probability(
        &self,
        cut_sets: &MinimalCutSets,
        config: &SolverConfig,
    ) -> Result<f64, PraError> {
        let terms = cut_sets.cut_sets();
        if terms.len() > config.max_inclusion_exclusion_sets {
            return Err(PraError::ResourceExhaustion {
                what: "minimal cut sets for inclusion-exclusion",
                limit: config.max_inclusion_exclusion_sets,
            });
        }
        let mut total = 0.0;
        for (i, term) in terms.iter().enumerate() {
            self.include_subsets(terms, i + 1, term, true, &mut total)?;
        }
        Ok(total)
    }

    /// **(internal)** Add the contribution of the subset whose conjunction is `intersection`,
    /// then extend the subset with every cut set starting at index `next`.
    fn include_subsets(
        &self,
        terms: &[CutSet],
        next: usize,
        intersection: &CutSet,
        odd: bool,
        total: &mut f64,
    ) -> Result<(), PraError> {
        let p = self.cut_set_probability(intersection)?;
        if odd {
            *total += p;
        } else {
            *total -= p;
        }
        for (j, term) in terms.iter().enumerate().skip(next) {
            if let Some(extended) = intersection.merge(term) {
                self.include_subsets(terms, j + 1, &extended, !odd, total)?;
            }
        }
        Ok(())
    }

    /// Minimize the `expression` and compute the exact probability of its cut sets.
    pub fn expression_probability(
        &self,
        expression: &Expression,
        config: &SolverConfig,
    ) -> Result<f64, PraError> {
        let cut_sets = expression.minimal_cut_sets(config)?;
        self.union_probability(&cut_sets, config)
    }
}

/// **(internal)** Move a probability affected by rounding back into $[0, 1]$.
///
/// Returns the clamped value and a flag which is set when the drift exceeded `tolerance`.
pub(crate) fn clamp_probability(value: f64, tolerance: f64) -> (f64, bool) {
    let drift = if value < 0.0 {
        -value
    } else if value > 1.0 {
        value - 1.0
    } else {
        0.0
    };
    (value.max(0.0).min(1.0), drift > tolerance)
}
