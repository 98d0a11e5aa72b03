use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::UVec2;

use micronav::types::Footprint;
use micronav::{CellValue, DistanceMethod, FieldParams, Grid2d, MapInfo, OccupancyGrid, compute_field};

#[derive(Clone, Copy)]
enum ObstaclePattern {
    Empty,
    /// One obstacle every `step` cells along both axes.
    Lattice(u32),
}

fn grid_with_obstacles(size: u32, pattern: ObstaclePattern, footprint: Footprint) -> OccupancyGrid {
    let start = UVec2::new(0, 0);
    let goal = UVec2::new(size - 1, size - 1);
    let cells = Grid2d::from_fn(MapInfo::square(size), |p| {
        if p == start {
            return CellValue::Start;
        }
        if p == goal {
            return CellValue::Goal;
        }
        let blocked = match pattern {
            ObstaclePattern::Empty => false,
            ObstaclePattern::Lattice(step) => {
                let step = step.max(2);
                p.x % step == step / 2 && p.y % step == step / 2
            }
        };
        if blocked {
            CellValue::Obstacle
        } else {
            CellValue::Free
        }
    });
    OccupancyGrid::from_cells(cells, footprint).unwrap()
}

fn bench_distance_methods(c: &mut Criterion) {
    let cases = [
        ("empty_64", 64, ObstaclePattern::Empty),
        ("sparse_128", 128, ObstaclePattern::Lattice(16)),
        ("dense_128", 128, ObstaclePattern::Lattice(4)),
        ("sparse_512", 512, ObstaclePattern::Lattice(32)),
    ];

    for (name, size, pattern) in cases {
        let grid = grid_with_obstacles(size, pattern, Footprint::POINT);
        let mut group = c.benchmark_group(name);
        for method in [DistanceMethod::Windowed, DistanceMethod::Transform] {
            let params = FieldParams::default().with_distance(method);
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{method:?}").to_lowercase()),
                &params,
                |b, params| b.iter(|| black_box(compute_field(&grid, params).unwrap())),
            );
        }
        group.finish();
    }
}

fn bench_influence_radius(c: &mut Criterion) {
    let grid = grid_with_obstacles(256, ObstaclePattern::Lattice(8), Footprint::POINT);
    let mut group = c.benchmark_group("windowed_rho0");
    for rho0 in [1.0f32, 3.0, 8.0] {
        let params = FieldParams::new(1.0, 100.0, rho0);
        group.bench_with_input(BenchmarkId::from_parameter(rho0), &params, |b, params| {
            b.iter(|| black_box(compute_field(&grid, params).unwrap()))
        });
    }
    group.finish();
}

fn bench_inflation(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflation_256");
    for size in [1u32, 3, 7] {
        let footprint = Footprint::new(size, size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &footprint, |b, fp| {
            b.iter(|| black_box(grid_with_obstacles(256, ObstaclePattern::Lattice(8), *fp)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance_methods,
    bench_influence_radius,
    bench_inflation
);
criterion_main!(benches);
