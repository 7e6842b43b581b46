//! Criterion benchmarks for program interpretation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gcodesim_wasm::config::InterpreterConfig;
use gcodesim_wasm::toolpath::{interpret, MachineState};

fn interpret_bench(c: &mut Criterion) {
    let part1 = include_str!("../tests/fixtures/part1_rectangle_hole.nc");
    let part2 = include_str!("../tests/fixtures/part2_circle_square_hole.nc");
    let mut group = c.benchmark_group("interpret");

    group.bench_function("part1_default", |b| {
        b.iter(|| {
            interpret(
                black_box(part1).lines(),
                MachineState::default(),
                &InterpreterConfig::default(),
            )
        })
    });

    // A long program of arcs at high resolution.
    let dense = InterpreterConfig {
        arc_samples: 360,
        ..InterpreterConfig::default()
    };
    let long_program = part2.repeat(100);
    group.bench_function("part2_x100_dense_arcs", |b| {
        b.iter(|| interpret(black_box(long_program.as_str()).lines(), MachineState::default(), &dense))
    });

    group.finish();
}

criterion_group!(benches, interpret_bench);
criterion_main!(benches);
