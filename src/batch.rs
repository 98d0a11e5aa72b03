//! Load → field → plan pipeline, for single maps and directories of maps.
//!
//! Scenarios are independent of each other; with the `rayon` feature enabled
//! a batch is planned in parallel.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::PlannerConfig;
use crate::field::{PotentialField, compute_field};
use crate::grid::OccupancyGrid;
use crate::navigation::{Navigator, PlanResult};
use crate::types::PlannerError;

/// A planned map: the grid, its field and the navigator's result.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub grid: OccupancyGrid,
    pub field: PotentialField,
    pub result: PlanResult,
}

impl Scenario {
    /// Plan the map at `path` with `config`.
    pub fn run(path: impl AsRef<Path>, config: &PlannerConfig) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        config.validate()?;

        let grid = OccupancyGrid::load(path, config.footprint()?)?;
        Self::plan(scenario_name(path), grid, config)
    }

    /// Plan an already-built grid with `config`.
    pub fn plan(
        name: impl Into<String>,
        grid: OccupancyGrid,
        config: &PlannerConfig,
    ) -> Result<Self, PlannerError> {
        let name = name.into();
        let field = compute_field(&grid, &config.field)?;

        let nav_config = config.navigator_config_for(&grid);
        let result = match config.navigator.seed {
            Some(seed) => Navigator::seeded(nav_config, seed),
            None => Navigator::from_entropy(nav_config),
        }
        .plan(&grid, &field, grid.start(), grid.goal());

        info!(
            "{name}: {} in {} steps ({} visited, {} recoveries, {:.2} ms)",
            if result.success { "success" } else { "failure" },
            result.stats.steps_taken,
            result.stats.nodes_visited,
            result.stats.recoveries,
            result.stats.planning_time_ms()
        );

        Ok(Self {
            name,
            grid,
            field,
            result,
        })
    }
}

/// Outcome of one map in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: Result<Scenario, PlannerError>,
}

impl BatchEntry {
    pub fn name(&self) -> String {
        scenario_name(&self.path)
    }
}

/// Plan every map in `paths`. Results are returned in input order.
pub fn run_batch(paths: &[PathBuf], config: &PlannerConfig) -> Vec<BatchEntry> {
    map_paths(paths, |path| BatchEntry {
        path: path.clone(),
        outcome: Scenario::run(path, config),
    })
}

#[cfg(feature = "rayon")]
fn map_paths<F>(paths: &[PathBuf], f: F) -> Vec<BatchEntry>
where
    F: Fn(&PathBuf) -> BatchEntry + Send + Sync,
{
    use rayon::prelude::*;
    paths.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn map_paths<F>(paths: &[PathBuf], f: F) -> Vec<BatchEntry>
where
    F: Fn(&PathBuf) -> BatchEntry,
{
    paths.iter().map(f).collect()
}

/// Sorted `*.txt` map files directly inside `dir`.
pub fn scenario_maps(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, PlannerError> {
    let mut maps = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            maps.push(path);
        }
    }
    maps.sort();
    Ok(maps)
}

/// File stem of a map path, used as its display name.
pub fn scenario_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
