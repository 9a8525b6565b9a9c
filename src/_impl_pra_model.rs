use crate::_impl_probability_table::clamp_probability;
use crate::{
    parse_expression, ErrorPolicy, PraError, PraModel, PraReport, ProbabilityTable,
    ScenarioDefinition, ScenarioResult, SkippedScenario, SolverConfig, SymbolTable,
    TopEventTable,
};
use tracing::{debug, info, warn};

impl ScenarioDefinition {
    pub fn new(name: &str, outcome: &str, logic: &str) -> ScenarioDefinition {
        ScenarioDefinition {
            name: name.to_string(),
            outcome: outcome.to_string(),
            logic: logic.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outcome(&self) -> &str {
        &self.outcome
    }

    pub fn logic(&self) -> &str {
        &self.logic
    }
}

impl PraModel {
    /// Create a model with the given basic-event probabilities, and no top events
    /// or scenarios.
    pub fn new(probabilities: ProbabilityTable) -> PraModel {
        PraModel {
            probabilities,
            top_events: Vec::new(),
            scenarios: Vec::new(),
        }
    }

    /// Add a top event defined by a logic string. The string is parsed during `evaluate`.
    pub fn add_top_event(&mut self, name: &str, logic: &str) {
        self.top_events.push((name.to_string(), logic.to_string()));
    }

    /// Add a scenario defined by a logic string. The string is parsed during `evaluate`.
    pub fn add_scenario(&mut self, name: &str, outcome: &str, logic: &str) {
        self.scenarios.push(ScenarioDefinition::new(name, outcome, logic));
    }

    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    /// `(name, logic)` pairs of all top events, in insertion order.
    pub fn top_events(&self) -> &[(String, String)] {
        &self.top_events
    }

    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// Evaluate all scenarios of this model.
    ///
    /// First, the symbol table is built and all top events are parsed and resolved. Any error
    /// at this point is fatal. Then every scenario is parsed, its top events are substituted,
    /// and the result is minimized and evaluated. Results are reported in the order in which
    /// the scenarios were added. A failing scenario either aborts the evaluation or is skipped,
    /// depending on `config.on_error`.
    pub fn evaluate(&self, config: &SolverConfig) -> Result<PraReport, PraError> {
        let symbols = SymbolTable::from_events(
            &self.probabilities,
            self.top_events.iter().map(|(name, _)| name.as_str()),
        )?;
        let mut top_events = TopEventTable::parse(
            self.top_events
                .iter()
                .map(|(name, logic)| (name.as_str(), logic.as_str())),
            &symbols,
        )?;
        top_events.resolve_all()?;

        info!(
            basic_events = self.probabilities.len(),
            top_events = top_events.len(),
            scenarios = self.scenarios.len(),
            "Evaluating PRA model"
        );

        let mut report = PraReport::default();
        for scenario in &self.scenarios {
            match self.evaluate_scenario(scenario, &symbols, &mut top_events, config) {
                Ok(result) => report.push_result(result),
                Err(error) if config.on_error == ErrorPolicy::Skip => {
                    warn!(scenario = scenario.name(), %error, "Skipping scenario");
                    report.skipped.push(SkippedScenario {
                        name: scenario.name.clone(),
                        error: error.to_string(),
                    });
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            evaluated = report.results().len(),
            skipped = report.skipped().len(),
            "Evaluation finished"
        );
        Ok(report)
    }

    /// **(internal)** Run the parse, resolve, minimize and evaluate steps for one scenario.
    fn evaluate_scenario(
        &self,
        scenario: &ScenarioDefinition,
        symbols: &SymbolTable,
        top_events: &mut TopEventTable,
        config: &SolverConfig,
    ) -> Result<ScenarioResult, PraError> {
        let parsed = parse_expression(scenario.logic(), symbols)?;
        let resolved = top_events.resolve(&parsed)?;
        let cut_sets = resolved.minimal_cut_sets(config)?;
        debug!(
            scenario = scenario.name(),
            cut_sets = cut_sets.len(),
            "Minimized scenario logic"
        );

        let exact = self.probabilities.union_probability(&cut_sets, config)?;
        let (probability, drifted) = clamp_probability(exact, config.probability_tolerance);
        if drifted {
            warn!(
                scenario = scenario.name(),
                probability = exact,
                "Probability outside of [0, 1], the result was clamped"
            );
        }
        debug!(scenario = scenario.name(), probability, "Evaluated scenario");

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            outcome: scenario.outcome.clone(),
            cut_sets,
            probability,
        })
    }
}
