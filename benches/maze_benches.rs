use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use ndmaze::{Maze, MazeFlags};

fn generate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for dims in [vec![10, 10], vec![50, 50], vec![20, 20, 20]] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{dims:?}")),
            &dims,
            |b, dims| {
                b.iter(|| {
                    let rng = Xoshiro256PlusPlus::seed_from_u64(42);
                    let mut maze = Maze::create(dims, MazeFlags::all(), rng).unwrap();
                    maze.generate();
                    maze
                });
            },
        );
    }
    group.finish();
}

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for (dims, cores) in [
        (vec![50, 50], 1usize),
        (vec![50, 50], 4usize),
        (vec![20, 20, 20], 1usize),
        (vec![20, 20, 20], 8usize),
    ] {
        let rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut template = Maze::create(&dims, MazeFlags::all(), rng).unwrap();
        template.generate();
        let end = template.total_cells() - 1;

        group.bench_with_input(
            BenchmarkId::new(format!("{dims:?}"), cores),
            &cores,
            |b, &cores| {
                b.iter(|| {
                    let rng = Xoshiro256PlusPlus::seed_from_u64(42);
                    let mut maze = Maze::create(&dims, MazeFlags::all(), rng).unwrap();
                    maze.set_cores(cores);
                    maze.generate();
                    maze.solve(0, end).unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, generate_benchmark, solve_benchmark);
criterion_main!(benches);
