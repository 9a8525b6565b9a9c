use crate::{MinimalCutSets, OutcomeTotals, PraReport, ScenarioResult, SkippedScenario};

impl ScenarioResult {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outcome(&self) -> &str {
        &self.outcome
    }

    pub fn cut_sets(&self) -> &MinimalCutSets {
        &self.cut_sets
    }

    /// Exact probability of the scenario, clamped to $[0, 1]$.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl SkippedScenario {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message of the error which caused the scenario to be skipped.
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl OutcomeTotals {
    /// Add `probability` to the total of the `outcome` label (creating the label if needed).
    pub fn add(&mut self, outcome: &str, probability: f64) {
        if let Some(entry) = self.0.iter_mut().find(|(label, _)| label == outcome) {
            entry.1 += probability;
        } else {
            self.0.push((outcome.to_string(), probability));
        }
    }

    /// Total probability of the given outcome label.
    pub fn get(&self, outcome: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(label, _)| label == outcome)
            .map(|(_, total)| *total)
    }

    /// All outcome labels in the order in which they were first added.
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(label, total)| (label.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PraReport {
    /// Append a scenario result and add its probability to the outcome totals.
    pub fn push_result(&mut self, result: ScenarioResult) {
        self.outcome_totals.add(&result.outcome, result.probability);
        self.results.push(result);
    }

    /// Results of all evaluated scenarios, in model order.
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn outcome_totals(&self) -> &OutcomeTotals {
        &self.outcome_totals
    }

    /// Scenarios which failed and were skipped (only with `ErrorPolicy::Skip`).
    pub fn skipped(&self) -> &[SkippedScenario] {
        &self.skipped
    }
}
