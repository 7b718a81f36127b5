//! Benchmarks for a single generation of each rule engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};

use grid_automata::compute::{CellularAutomaton, ElementaryCA, ForestFire, GameOfLife, MajorityCA};

fn bench_apply_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_rules");

    for size in [32, 128, 512] {
        let rng = || StdRng::seed_from_u64(42);
        let mut automata: Vec<(&str, Box<dyn CellularAutomaton>)> = vec![
            (
                "elementary",
                Box::new(ElementaryCA::with_rng(size, 16, 30, &[1], rng()).unwrap()),
            ),
            (
                "forest_fire",
                Box::new(ForestFire::with_rng(size, size, 0.6, 0.001, rng()).unwrap()),
            ),
            (
                "life",
                Box::new(GameOfLife::with_rng(size, size, rng()).unwrap()),
            ),
            (
                "majority",
                Box::new(MajorityCA::with_rng(size, size, 5, rng()).unwrap()),
            ),
        ];

        for (name, automaton) in &mut automata {
            automaton.initialize_random_state();
            group.bench_with_input(
                BenchmarkId::new(*name, format!("{}x{}", size, size)),
                &size,
                |b, _| {
                    b.iter(|| {
                        automaton.apply_rules();
                        black_box(automaton.generation());
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_apply_rules);
criterion_main!(benches);
