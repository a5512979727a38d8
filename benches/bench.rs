use criterion::{criterion_group, criterion_main, Criterion};
use dpll_sat::sat::branching::Heuristic;
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dpll::{Dpll, SolverOptions};
use std::hint::black_box;
use std::time::Duration;

/// Pigeonhole principle PHP(n+1, n): small but exponentially hard for DPLL.
fn pigeonhole(holes: i32) -> Vec<Vec<i32>> {
    let pigeons = holes + 1;
    let var = |p: i32, h: i32| (p - 1) * holes + h;
    let mut clauses = Vec::new();

    for p in 1..=pigeons {
        clauses.push((1..=holes).map(|h| var(p, h)).collect());
    }
    for h in 1..=holes {
        for p1 in 1..=pigeons {
            for p2 in (p1 + 1)..=pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }

    clauses
}

/// A fixed, reproducible 3-SAT instance at a moderate clause/variable ratio.
fn random_3sat(num_vars: i32, num_clauses: i32, seed: u64) -> Vec<Vec<i32>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..num_clauses)
        .map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.i32(1..=num_vars);
                    if rng.bool() { var } else { -var }
                })
                .collect()
        })
        .collect()
}

fn bench_heuristics(c: &mut Criterion) {
    let heuristics = [
        Heuristic::FirstLiteral,
        Heuristic::Moms,
        Heuristic::MomsF { k: 2 },
        Heuristic::Posit,
        Heuristic::ZabihMcAllester,
        Heuristic::Dlcs,
        Heuristic::Dlis,
        Heuristic::JeroslowWang,
        Heuristic::JeroslowWangTwoSided,
    ];

    let mut group = c.benchmark_group("pigeonhole");
    group.measurement_time(Duration::from_secs(10));

    for heuristic in heuristics {
        group.bench_function(heuristic.to_string(), |b| {
            b.iter(|| {
                let cnf = Cnf::new(pigeonhole(4), heuristic).unwrap();
                let mut solver = Dpll::new(cnf, SolverOptions::default());
                black_box(solver.solve())
            });
        });
    }

    group.finish();
}

fn bench_pure_elimination(c: &mut Criterion) {
    let clauses = random_3sat(30, 100, 42);

    let mut group = c.benchmark_group("random-3sat");
    group.measurement_time(Duration::from_secs(10));

    for (name, pure) in [("unit-only", false), ("unit-and-pure", true)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let cnf = Cnf::new(clauses.clone(), Heuristic::JeroslowWang).unwrap();
                let mut solver = Dpll::new(
                    cnf,
                    SolverOptions {
                        unit_propagation: true,
                        pure_elimination: pure,
                    },
                );
                black_box(solver.solve())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_heuristics, bench_pure_elimination);
criterion_main!(benches);
