use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use micronav::loaders::{parse_map, upscale};
use micronav::types::Footprint;
use micronav::{FieldParams, Navigator, NavigatorConfig, OccupancyGrid, compute_field};

const WALL: &str = include_str!("../tests/fixtures/wall.txt");
const U_TRAP: &str = include_str!("../tests/fixtures/u_trap.txt");

fn scaled(source: &str, factor: u32) -> OccupancyGrid {
    let cells = upscale(&parse_map(source).unwrap(), factor).unwrap();
    OccupancyGrid::from_cells(cells, Footprint::POINT).unwrap()
}

fn bench_plan(c: &mut Criterion) {
    for (name, source) in [("wall", WALL), ("u_trap", U_TRAP)] {
        let mut group = c.benchmark_group(name);
        for factor in [1u32, 4, 16] {
            let grid = scaled(source, factor);
            let field = compute_field(&grid, &FieldParams::default()).unwrap();
            let defaults = NavigatorConfig::default();
            let config = defaults.with_max_steps(defaults.max_steps_for(&grid));
            group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, _| {
                b.iter(|| {
                    let mut navigator = Navigator::seeded(config, 42);
                    black_box(navigator.plan(&grid, &field, grid.start(), grid.goal()))
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
