//! # Fault-Tree PRA
//!
//! This crate evaluates fault-tree style risk models used in probabilistic risk assessment
//! (PRA). A model consists of *basic events* with point failure probabilities, *top events*
//! (named Boolean combinations of basic events and other top events) and accident *scenarios*
//! built from top events. For every scenario, we compute its minimal cut sets and its exact
//! probability, and we sum the probabilities of scenarios that share an outcome label.
//!
//! The processing pipeline is:
//!
//!  - Parse the logic strings (`*` is AND, `+` is OR, `NOT_` prefix is a complement) into
//!    an `Expression` tree, resolving names against a `SymbolTable`.
//!  - Substitute top-event definitions using a memoized `TopEventTable`.
//!  - Minimize the result into `MinimalCutSets` (distribution, contradiction removal,
//!    absorption).
//!  - Compute the exact union probability using inclusion–exclusion over a `ProbabilityTable`,
//!    assuming statistical independence of basic events.
//!
//! Models can be assembled programmatically, or loaded from (and reported to) XML documents
//! using the functions in `model_xml`.
//!
//! ```rust
//! use fault_tree_pra::*;
//!
//! let probabilities = [("IE", 0.01), ("A", 0.3), ("B", 0.4)];
//! let mut model = PraModel::new(ProbabilityTable::from_pairs(&probabilities).unwrap());
//! model.add_top_event("T", "A*B");
//! model.add_scenario("S1", "Severe", "IE*T");
//! model.add_scenario("S2", "Safe", "IE*NOT_T");
//!
//! let report = model.evaluate(&SolverConfig::default()).unwrap();
//! assert_eq!("A*B*IE", report.results()[0].cut_sets().to_string());
//! assert!((report.results()[0].probability() - 0.0012).abs() < 1e-12);
//! assert!((report.outcome_totals().get("Safe").unwrap() - 0.0088).abs() < 1e-12);
//! ```
//!
//! Keep in mind that both the minimization and the inclusion–exclusion step are exponential
//! in the worst case. The limits in `SolverConfig` turn such blow-ups into
//! `PraError::ResourceExhaustion` instead of an endless computation.

use fxhash::FxHashMap;
use std::collections::BTreeMap;

pub mod expression_parser;
pub mod model_xml;
pub mod probability_format;

mod error;
mod solver_config;

pub use error::PraError;
pub use expression_parser::{parse_expression, parse_expression_syntax};
pub use model_xml::{load_model, parse_model_xml, report_path_for, report_to_xml, write_report};
pub use probability_format::format_probability;
pub use solver_config::{ErrorPolicy, SolverConfig};

/// **(internal)** Implementation of the `Expression` tree utilities.
mod _impl_expression;

/// **(internal)** Implementation of `Literal` and `CutSet`.
mod _impl_cut_set;

/// **(internal)** Implementation of `MinimalCutSets`.
mod _impl_minimal_cut_sets;

/// **(internal)** Reduction of expressions to minimal sum-of-products form.
mod _impl_minimizer;

/// **(internal)** Implementation of the `SymbolTable` and event name validation.
mod _impl_symbol_table;

/// **(internal)** Top-event substitution and cycle detection.
mod _impl_top_event_table;

/// **(internal)** Probability evaluation of cut sets (independence + inclusion–exclusion).
mod _impl_probability_table;

/// **(internal)** The scenario pipeline.
mod _impl_pra_model;

/// **(internal)** Implementation of `PraReport`, `ScenarioResult` and `OutcomeTotals`.
mod _impl_pra_report;

/// **(internal)** Several end-to-end test scenarios for the whole pipeline.
#[cfg(test)]
mod _test_pra;

/// Several basic utility methods for testing.
#[cfg(test)]
mod _test_util;

/// Prefix which marks a complemented event in the logic notation (`NOT_A` is $\neg A$).
pub const NEGATION_PREFIX: &str = "NOT_";

/// Reserved name of the basic event which carries the initiating-event probability.
pub const INITIATING_EVENT: &str = "IE";

/// Maximal depth of an expression tree (including substituted top events) that is resolved
/// and minimized. Deeper expressions fail with `PraError::ResourceExhaustion`.
pub const MAX_EXPRESSION_DEPTH: usize = 512;

/// Recursive type for the Boolean expression tree over named events.
///
/// The children of `And` and `Or` are semantically unordered, but they are kept in the order
/// in which they were written. An `And` without children is `true` and an `Or` without
/// children is `false`; the parser never produces these, but they appear when converting
/// trivial `MinimalCutSets` back into an expression.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Expression {
    Atom(String),
    Not(Box<Expression>),
    And(Vec<Expression>),
    Or(Vec<Expression>),
}

/// An event name together with a polarity: either `A` or `NOT_A`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    name: String,
    positive: bool,
}

/// A conjunction of literals with at most one polarity per event.
///
/// The literals are kept sorted by event name, which gives every cut set a canonical
/// representation. An empty cut set is the `true` conjunction.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CutSet(BTreeMap<String, bool>);

/// A disjunction of cut sets in which no cut set is a subset of another one.
///
/// Cut sets are sorted by size first and lexicographically second. No cut sets means the
/// expression is unsatisfiable, a single empty cut set means it is always true.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct MinimalCutSets(Vec<CutSet>);

/// Kind of event a name refers to in a `SymbolTable`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SymbolKind {
    BasicEvent,
    TopEvent,
}

/// The merged namespace of basic events and top events used when parsing logic strings.
///
/// A name can be registered only once, so a basic event can never shadow a top event
/// (or vice versa).
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, SymbolKind>,
}

/// Maps basic-event names (including the initiating event `IE`) to probabilities in $[0, 1]$.
#[derive(Clone, Debug, Default)]
pub struct ProbabilityTable {
    probabilities: FxHashMap<String, f64>,
}

/// Parsed top-event definitions together with a cache of their fully substituted forms.
///
/// A resolved expression only references basic events. Each top event is resolved at most
/// once, later lookups are served from the cache.
#[derive(Clone, Debug, Default)]
pub struct TopEventTable {
    definitions: FxHashMap<String, Expression>,
    resolved: FxHashMap<String, Expression>,
}

/// Name, outcome label and logic string of one accident scenario.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScenarioDefinition {
    name: String,
    outcome: String,
    logic: String,
}

/// A complete risk model: probabilities, top-event definitions and scenarios.
///
/// Top events and scenarios are stored as unparsed logic strings, they are only parsed
/// once the model is evaluated.
#[derive(Clone, Debug, Default)]
pub struct PraModel {
    probabilities: ProbabilityTable,
    top_events: Vec<(String, String)>,
    scenarios: Vec<ScenarioDefinition>,
}

/// The evaluated form of one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    name: String,
    outcome: String,
    cut_sets: MinimalCutSets,
    probability: f64,
}

/// Summed scenario probabilities per outcome label, in the order in which the labels
/// were first encountered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutcomeTotals(Vec<(String, f64)>);

/// A scenario which could not be evaluated and was skipped (see `ErrorPolicy::Skip`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedScenario {
    name: String,
    error: String,
}

/// Results of evaluating a `PraModel`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PraReport {
    results: Vec<ScenarioResult>,
    outcome_totals: OutcomeTotals,
    skipped: Vec<SkippedScenario>,
}
