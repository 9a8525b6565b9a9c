//!
//! A small toolbox for fuzzing the minimizer and the probability evaluator.
//!
//! We generate a random expression tree over a handful of basic events, where every inner
//! node is a conjunction, a disjunction or a negation with a random number of children.
//! Then we compute its minimal cut sets and exhaustively check all valuations of the
//! events: the cut sets must accept exactly the valuations accepted by the tree, and the
//! inclusion–exclusion probability must match the sum of probabilities of all accepting
//! valuations. To get predictable test cases, we use a predefined set of randomness seeds.
//!
//! The truth tables grow exponentially, so we only use up to five events. The number of
//! cut sets is not bounded in general, so trees that produce too many of them are only
//! checked for equivalence.

use crate::Expression::*;
use crate::*;
use rand::prelude::StdRng;
use rand::{RngCore, SeedableRng};

const EVENTS: [&str; 5] = ["A", "B", "C", "D", "E"];
const PROBABILITIES: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

/// Number of cut sets up to which the probability is cross-checked.
const MAX_CHECKED_CUT_SETS: usize = 16;

/// Create a random expression of the given `depth` over the first `num_events` events.
fn mk_random_expression(rand: &mut StdRng, depth: u8, num_events: usize) -> Expression {
    if depth == 0 || rand.next_u32() % 4 == 0 {
        let name = EVENTS[(rand.next_u32() as usize) % num_events];
        return if rand.next_u32() % 3 == 0 {
            Expression::not_atom(name)
        } else {
            Expression::atom(name)
        };
    }
    let arity = 2 + (rand.next_u32() % 2) as usize;
    let args: Vec<Expression> = (0..arity)
        .map(|_| mk_random_expression(rand, depth - 1, num_events))
        .collect();
    match rand.next_u32() % 5 {
        0 | 1 => And(args),
        2 | 3 => Or(args),
        _ => Not(Box::new(And(args))),
    }
}

fn mk_probabilities(num_events: usize) -> ProbabilityTable {
    let mut table = ProbabilityTable::new();
    for i in 0..num_events {
        table.insert(EVENTS[i], PROBABILITIES[i]).unwrap();
    }
    table
}

/// **(internal)** Truth value of event `name` in the valuation encoded by the bits of `mask`.
fn event_value(mask: usize, name: &str) -> bool {
    let index = EVENTS.iter().position(|e| *e == name).unwrap();
    mask & (1 << index) != 0
}

fn valuation_probability(mask: usize, num_events: usize) -> f64 {
    let mut result = 1.0;
    for i in 0..num_events {
        if mask & (1 << i) != 0 {
            result *= PROBABILITIES[i];
        } else {
            result *= 1.0 - PROBABILITIES[i];
        }
    }
    result
}

fn fuzz_test(num_events: usize, depth: u8, seed: u64) {
    let mut rand = StdRng::seed_from_u64(seed);
    let expression = mk_random_expression(&mut rand, depth, num_events);
    let config = SolverConfig::default();
    let cut_sets = expression.minimal_cut_sets(&config).unwrap();
    assert!(cut_sets.is_minimal(), "{} is not minimal", cut_sets);

    let mut expected_probability = 0.0;
    for mask in 0..(1usize << num_events) {
        let valuation = |name: &str| event_value(mask, name);
        let expected = expression.eval_in(&valuation);
        assert_eq!(
            expected,
            cut_sets.eval_in(&valuation),
            "Expression {} minimized to {} differs in valuation {:b}.",
            expression,
            cut_sets,
            mask
        );
        if expected {
            expected_probability += valuation_probability(mask, num_events);
        }
    }

    let minimized = cut_sets.to_expression();
    assert_eq!(
        cut_sets,
        minimized.minimal_cut_sets(&config).unwrap(),
        "Minimization of {} is not idempotent.",
        expression
    );

    if cut_sets.len() <= MAX_CHECKED_CUT_SETS {
        let probability = mk_probabilities(num_events)
            .union_probability(&cut_sets, &config)
            .unwrap();
        assert!(
            (probability - expected_probability).abs() < 1e-9,
            "Probability of {} is {}, expected {}.",
            cut_sets,
            probability,
            expected_probability
        );
    }
}

#[test]
fn fuzz_small() {
    for seed in 0..200 {
        fuzz_test(3, 3, seed);
    }
}

#[test]
fn fuzz_medium() {
    for seed in 0..200 {
        fuzz_test(4, 4, seed);
    }
}

#[test]
fn fuzz_large() {
    for seed in 0..100 {
        fuzz_test(5, 4, seed);
    }
}
