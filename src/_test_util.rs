use super::*;

/// Probabilities of the basic events $A, B, C, D$ and the initiating event.
pub fn mk_probability_table() -> ProbabilityTable {
    ProbabilityTable::from_pairs(&[
        ("IE", 0.01),
        ("A", 0.3),
        ("B", 0.4),
        ("C", 0.5),
        ("D", 0.2),
    ])
    .unwrap()
}

/// Make a `SymbolTable` with the events of `mk_probability_table` and the given top events.
pub fn mk_symbols(top_events: &[&str]) -> SymbolTable {
    SymbolTable::from_events(&mk_probability_table(), top_events.iter().cloned()).unwrap()
}

/// Parse a logic string over the events of `mk_probability_table`.
pub fn mk_expression(logic: &str) -> Expression {
    parse_expression(logic, &mk_symbols(&[])).unwrap()
}

pub fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-9,
        "Expected {}, got {}.",
        expected,
        actual
    );
}
