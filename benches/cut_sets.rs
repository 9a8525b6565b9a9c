use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fault_tree_pra::{parse_expression_syntax, PraModel, ProbabilityTable, SolverConfig};

/// A model with `n` redundant trains, each failing when its pump or its valve fails.
/// The scenario fails when at least two trains fail.
fn mk_train_model(n: usize) -> PraModel {
    let mut pairs = vec![("IE".to_string(), 0.01)];
    for i in 0..n {
        pairs.push((format!("PUMP_{}", i), 0.02));
        pairs.push((format!("VALVE_{}", i), 0.05));
    }
    let pairs: Vec<(&str, f64)> = pairs.iter().map(|(n, p)| (n.as_str(), *p)).collect();
    let mut model = PraModel::new(ProbabilityTable::from_pairs(&pairs).unwrap());
    for i in 0..n {
        let logic = format!("PUMP_{} + VALVE_{}", i, i);
        model.add_top_event(&format!("TRAIN_{}", i), &logic);
    }
    let mut pairs_failed = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairs_failed.push(format!("TRAIN_{}*TRAIN_{}", i, j));
        }
    }
    let logic = format!("IE*({})", pairs_failed.join(" + "));
    model.add_scenario("LOSS", "Damage", &logic);
    model.add_scenario("OK", "Safe", "IE*NOT_TRAIN_0*NOT_TRAIN_1");
    model
}

fn criterion_benchmark(c: &mut Criterion) {
    let config = SolverConfig::default();
    let model = mk_train_model(3);
    c.bench_function("two_of_three", |b| {
        b.iter(|| black_box(model.evaluate(&config).unwrap()))
    });
    // Minimization only: inclusion-exclusion over the 60 cut sets would be out of reach.
    let mut terms = Vec::new();
    for i in 0..6 {
        for j in (i + 1)..6 {
            terms.push(format!(
                "(PUMP_{} + VALVE_{})*(PUMP_{} + VALVE_{})",
                i, i, j, j
            ));
        }
    }
    let expression = parse_expression_syntax(&terms.join(" + ")).unwrap();
    c.bench_function("two_of_six_cut_sets", |b| {
        b.iter(|| black_box(expression.minimal_cut_sets(&config).unwrap()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
