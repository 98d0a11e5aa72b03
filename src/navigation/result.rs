use std::time::Duration;

use glam::UVec2;

/// Statistics of a single `plan` call.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlanStats {
    /// Iterations consumed, including the ones spent detecting traps.
    pub steps_taken: usize,
    /// Moves made (normal and recovery).
    pub nodes_visited: usize,
    /// Number of times recovery mode was entered.
    pub recoveries: usize,
    pub planning_time: Duration,
}

impl PlanStats {
    pub fn planning_time_ms(&self) -> f64 {
        self.planning_time.as_secs_f64() * 1000.0
    }
}

/// Outcome of a planning run.
///
/// A run that exhausts its step budget is not an error: `success` is false
/// and `path` holds the trace taken so far.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Visited cells, starting at the start cell. May contain revisits.
    pub path: Vec<UVec2>,
    pub success: bool,
    pub stats: PlanStats,
}

impl PlanResult {
    /// Last position reached.
    pub fn end(&self) -> Option<UVec2> {
        self.path.last().copied()
    }

    /// Number of distinct cells on the path.
    pub fn unique_cells(&self) -> usize {
        let mut cells = self.path.clone();
        cells.sort_by_key(|p| (p.y, p.x));
        cells.dedup();
        cells.len()
    }
}
