//! Benchmarks for the Kanoodle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kanoodle::dlx::Matrix;
use kanoodle::geometry::{FLIPS, ROTATIONS};
use kanoodle::grid::format_solution;
use kanoodle::placement::generate_rows;
use kanoodle::{Pin, Puzzle};

/// Benchmark finding the first solution of the full Kanoodle board.
fn bench_solve_first(c: &mut Criterion) {
    let puzzle = Puzzle::kanoodle().unwrap();

    c.bench_function("solve_first", |b| {
        b.iter(|| black_box(&puzzle).solve_first(&[]).unwrap())
    });
}

/// Benchmark enumerating every solution with half the pieces pinned.
fn bench_solve_all_pinned(c: &mut Criterion) {
    let puzzle = Puzzle::kanoodle().unwrap();
    let first = puzzle.solve_first(&[]).unwrap().unwrap();
    let pins: Vec<Pin> = first[..6].iter().map(Pin::from).collect();

    let mut group = c.benchmark_group("pinned");
    group.sample_size(10);
    group.bench_function("solve_all_6_pins", |b| {
        b.iter(|| black_box(&puzzle).solve_all(black_box(&pins)).unwrap())
    });
    group.finish();
}

/// Benchmark generating rows and building the matrix.
fn bench_build_matrix(c: &mut Criterion) {
    let puzzle = Puzzle::kanoodle().unwrap();

    c.bench_function("generate_rows", |b| {
        b.iter(|| generate_rows(black_box(&puzzle), &[]))
    });
    c.bench_function("build_matrix", |b| {
        b.iter(|| Matrix::new(generate_rows(black_box(&puzzle), &[]), puzzle.num_columns()))
    });
}

/// Benchmark computing all orientation signatures of one piece.
fn bench_signatures(c: &mut Criterion) {
    let puzzle = Puzzle::kanoodle().unwrap();
    let piece = &puzzle.pieces[0];

    c.bench_function("signatures", |b| {
        b.iter(|| {
            ROTATIONS
                .iter()
                .flat_map(|&rotation| FLIPS.map(|flipped| piece.signature(rotation, flipped)))
                .fold(0u64, |acc, signature| acc ^ black_box(signature))
        })
    });
}

/// Benchmark formatting a solution for display.
fn bench_format_solution(c: &mut Criterion) {
    let puzzle = Puzzle::kanoodle().unwrap();
    let solution = puzzle.solve_first(&[]).unwrap().unwrap();

    c.bench_function("format_solution", |b| {
        b.iter(|| format_solution(black_box(&solution), puzzle.grid))
    });
}

criterion_group!(
    benches,
    bench_solve_first,
    bench_solve_all_pinned,
    bench_build_matrix,
    bench_signatures,
    bench_format_solution
);
criterion_main!(benches);
