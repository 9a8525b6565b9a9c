use crate::_test_util::{assert_close, mk_expression, mk_probability_table, mk_symbols};
use crate::*;

fn probability(logic: &str) -> f64 {
    mk_probability_table()
        .expression_probability(&mk_expression(logic), &SolverConfig::default())
        .unwrap()
}

fn cut_sets(logic: &str) -> String {
    mk_expression(logic)
        .minimal_cut_sets(&SolverConfig::default())
        .unwrap()
        .to_string()
}

#[test]
fn pra_complement_law() {
    for event in &["A", "B", "C", "D", "IE"] {
        let positive = probability(event);
        let negative = probability(&format!("NOT_{}", event));
        assert_close(1.0, positive + negative);
    }
    assert_close(1.0, probability("A + NOT_A"));
    assert_close(0.0, probability("A*NOT_A"));
}

#[test]
fn pra_independent_conjunction() {
    assert_close(0.12, probability("A*B"));
    assert_close(0.3 * 0.6, probability("A*NOT_B"));
    assert_close(0.3 * 0.4 * 0.5 * 0.2, probability("A*(B*(C*D))"));
}

#[test]
fn pra_inclusion_exclusion() {
    assert_close(0.58, probability("A+B"));
    assert_close(0.58, probability("A + B + A*B"));
    // 1 - 0.7 * 0.6 * 0.5
    assert_close(0.79, probability("A + B + C"));
    // P(A*B) + P(C*D) - P(A*B*C*D)
    assert_close(0.12 + 0.1 - 0.012, probability("A*B + C*D"));
}

#[test]
fn pra_absorption_and_contradictions() {
    assert_eq!("A", cut_sets("A + A*B"));
    assert_eq!("A", cut_sets("A*(A + B)"));
    assert_eq!("FALSE", cut_sets("A*NOT_A*B"));
    assert_eq!("NOT_A*B*IE", cut_sets("IE*(A + B)*NOT_A"));
    assert_close(0.01 * 0.4 * 0.7, probability("IE*(A + B)*NOT_A"));
    assert_eq!("NOT_A*B + A*NOT_B", cut_sets("(A + B)*(NOT_A + NOT_B)"));
}

#[test]
fn pra_minimization_is_idempotent() {
    for logic in &[
        "A + A*B",
        "(A + B)*(C + D)",
        "NOT_A*NOT_B + NOT_C",
        "(A + NOT_B)*(B + NOT_C)*(C + A)",
        "A*NOT_A",
        "IE*((A*B) + (C*(D + NOT_A)))",
    ] {
        let once = mk_expression(logic).minimize().unwrap();
        let twice = once.minimize().unwrap();
        assert_eq!(once, twice, "{}", logic);
        let cut_sets = once.minimal_cut_sets(&SolverConfig::default()).unwrap();
        assert!(cut_sets.is_minimal());
    }
}

#[test]
fn pra_probability_bounds() {
    let mut model = PraModel::new(mk_probability_table());
    model.add_top_event("T1", "A + B + C + D");
    model.add_top_event("T2", "NOT_A + NOT_B");
    model.add_scenario("S1", "X", "IE*T1*T2");
    model.add_scenario("S2", "X", "IE*NOT_T1");
    model.add_scenario("S3", "Y", "T1 + T2 + NOT_T2");
    model.add_scenario("S4", "Y", "T1*NOT_T1");
    let report = model.evaluate(&SolverConfig::default()).unwrap();
    for result in report.results() {
        assert!(result.probability() >= 0.0 && result.probability() <= 1.0);
    }
    // No consensus is applied, so the tautology keeps its complementary literals.
    assert_eq!(
        "NOT_A + A + NOT_B + B + C + D",
        report.results()[2].cut_sets().to_string()
    );
    assert_close(1.0, report.results()[2].probability());
    assert_eq!("FALSE", report.results()[3].cut_sets().to_string());
    assert_eq!(0.0, report.results()[3].probability());
}

#[test]
fn pra_top_event_substitution_is_transparent() {
    let mut substituted = PraModel::new(mk_probability_table());
    substituted.add_top_event("T1", "A + B");
    substituted.add_top_event("T2", "C*T1");
    substituted.add_scenario("S1", "Damage", "IE*T2*NOT_T1");
    substituted.add_scenario("S2", "Damage", "IE*NOT_T2");

    let mut literal = PraModel::new(mk_probability_table());
    literal.add_scenario("S1", "Damage", "IE*(C*(A + B))*NOT_A*NOT_B");
    literal.add_scenario("S2", "Damage", "IE*(NOT_C + NOT_A*NOT_B)");

    let config = SolverConfig::default();
    let substituted = substituted.evaluate(&config).unwrap();
    let literal = literal.evaluate(&config).unwrap();
    assert_eq!(substituted, literal);
    assert_eq!("FALSE", substituted.results()[0].cut_sets().to_string());
    assert_close(0.01 * (1.0 - 0.5 * 0.58), substituted.results()[1].probability());
}

#[test]
fn pra_cyclic_top_events_are_rejected() {
    let symbols = mk_symbols(&["T1", "T2", "T3"]);
    let mut table = TopEventTable::parse(
        vec![("T1", "A*T2"), ("T2", "B + T3"), ("T3", "NOT_T1")],
        &symbols,
    )
    .unwrap();
    assert!(matches!(
        table.resolve_all(),
        Err(PraError::CyclicDefinition(_))
    ));

    let mut model = PraModel::new(mk_probability_table());
    model.add_top_event("T1", "A*T1");
    model.add_scenario("S1", "X", "IE");
    let config = SolverConfig {
        on_error: ErrorPolicy::Skip,
        ..SolverConfig::default()
    };
    assert!(matches!(
        model.evaluate(&config),
        Err(PraError::CyclicDefinition(_))
    ));
}

#[test]
fn pra_outcome_aggregation() {
    let probabilities = [("X", 0.01), ("Y", 0.02), ("Z", 0.5)];
    let mut model = PraModel::new(ProbabilityTable::from_pairs(&probabilities).unwrap());
    model.add_scenario("S1", "Severe", "X");
    model.add_scenario("S2", "Minor", "Z");
    model.add_scenario("S3", "Severe", "Y");
    let report = model.evaluate(&SolverConfig::default()).unwrap();
    let totals = report.outcome_totals();
    assert_close(0.03, totals.get("Severe").unwrap());
    assert_close(0.5, totals.get("Minor").unwrap());
    assert_eq!(vec!["Severe", "Minor"], totals.labels());
}

#[test]
fn pra_names_and_probabilities_are_validated() {
    let mut table = ProbabilityTable::new();
    assert!(matches!(
        table.insert("A", 1.5),
        Err(PraError::MalformedInput(_))
    ));
    assert!(matches!(
        table.insert("NOT_A", 0.5),
        Err(PraError::MalformedInput(_))
    ));
    assert!(matches!(
        SymbolTable::from_events(&mk_probability_table(), vec!["A"]),
        Err(PraError::MalformedInput(_))
    ));
    assert!(matches!(
        parse_expression("A*Q", &mk_symbols(&[])),
        Err(PraError::UnknownSymbol(name)) if name == "Q"
    ));
}

#[test]
fn pra_budgets() {
    let tight = SolverConfig {
        max_cut_sets: 3,
        ..SolverConfig::default()
    };
    assert!(matches!(
        mk_expression("(A + B)*(C + D)").minimal_cut_sets(&tight),
        Err(PraError::ResourceExhaustion { limit: 3, .. })
    ));
    let tight = SolverConfig {
        max_inclusion_exclusion_sets: 2,
        ..SolverConfig::default()
    };
    assert!(matches!(
        mk_probability_table().expression_probability(&mk_expression("A + B + C"), &tight),
        Err(PraError::ResourceExhaustion { limit: 2, .. })
    ));
}
