//! Gradient-descent navigator with random-walk recovery.
//!
//! Each iteration either follows the steepest strictly-descending
//! 8-connected neighbour or, after a trap has been detected, takes one random
//! 4-connected step. The run stops when the goal is reached or the step
//! budget is spent.

use std::time::Instant;

use glam::UVec2;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::field::PotentialField;
use crate::grid::OccupancyGrid;
use crate::navigation::result::{PlanResult, PlanStats};
use crate::navigation::state::{Mode, RecentHistory, detect_stuck};
use crate::types::geometry::{NEIGHBORS_4, NEIGHBORS_8, offset};
use crate::types::{
    DEFAULT_HISTORY_LEN, DEFAULT_MAX_STEPS, DEFAULT_RECOVERY_STEPS, PlannerError,
};

/// Navigator configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Hard iteration budget for one `plan` call
    pub max_steps: usize,
    /// Random steps taken per recovery
    pub recovery_steps: usize,
    /// Number of recent moves checked for oscillation
    pub history_len: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            recovery_steps: DEFAULT_RECOVERY_STEPS,
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl NavigatorConfig {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_recovery_steps(mut self, recovery_steps: usize) -> Self {
        self.recovery_steps = recovery_steps;
        self
    }

    /// Step budget scaled so that it is never smaller than the number of cells.
    pub fn max_steps_for(&self, grid: &OccupancyGrid) -> usize {
        self.max_steps.max(grid.info().len())
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.max_steps == 0 {
            return Err(PlannerError::InvalidParameter(
                "max_steps must be positive".to_string(),
            ));
        }
        if self.recovery_steps == 0 {
            return Err(PlannerError::InvalidParameter(
                "recovery_steps must be positive".to_string(),
            ));
        }
        if self.history_len == 0 {
            return Err(PlannerError::InvalidParameter(
                "history_len must be positive, oscillation detection needs recent moves"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Neighbour of `pos` with the strictly lowest field value.
///
/// The current cell is the initial best, so `pos` itself is returned on a
/// plateau or at a local minimum. Ties keep the first neighbour in
/// [`NEIGHBORS_8`] order.
pub fn best_neighbor(field: &PotentialField, pos: UVec2) -> UVec2 {
    let info = *field.info();
    let mut best = pos;
    let mut best_value = field.value(pos);

    for delta in NEIGHBORS_8 {
        let Some(next) = offset(&info, pos, delta) else {
            continue;
        };
        let value = field.value(next);
        if value < best_value {
            best = next;
            best_value = value;
        }
    }

    best
}

/// A uniformly random free 4-connected neighbour of `pos`, if any.
pub fn recovery_step<R: Rng>(
    grid: &OccupancyGrid,
    pos: UVec2,
    rng: &mut R,
) -> Option<UVec2> {
    let mut candidates = [UVec2::ZERO; 4];
    let mut count = 0;
    for delta in NEIGHBORS_4 {
        let Some(next) = offset(grid.info(), pos, delta) else {
            continue;
        };
        if grid.is_free(next) {
            candidates[count] = next;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some(candidates[rng.random_range(0..count)])
}

/// Gradient-descent planner. Owns the random source used for recovery.
#[derive(Debug, Clone)]
pub struct Navigator<R = StdRng> {
    config: NavigatorConfig,
    rng: R,
}

impl Navigator<StdRng> {
    /// Navigator with a reproducible random source.
    pub fn seeded(config: NavigatorConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Navigator seeded from the operating system.
    pub fn from_entropy(config: NavigatorConfig) -> Self {
        Self::new(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> Navigator<R> {
    pub fn new(config: NavigatorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Walk `field` from `start` towards `goal`.
    ///
    /// # Panics
    ///
    /// Panics if `field` and `grid` have different dimensions or if `start`
    /// lies outside the grid.
    pub fn plan(
        &mut self,
        grid: &OccupancyGrid,
        field: &PotentialField,
        start: UVec2,
        goal: UVec2,
    ) -> PlanResult {
        assert_eq!(
            grid.info(),
            field.info(),
            "potential field does not match grid dimensions"
        );
        assert!(
            grid.info().contains(start),
            "start {start} is outside the grid"
        );

        let started = Instant::now();
        let mut stats = PlanStats::default();
        let mut path = vec![start];
        let mut history = RecentHistory::new(self.config.history_len);
        let mut mode = Mode::Normal;
        let mut current = start;

        for _ in 0..self.config.max_steps {
            if current == goal {
                break;
            }
            stats.steps_taken += 1;

            let next = match mode {
                Mode::Recovery { .. } => {
                    mode = mode.after_recovery_step();
                    recovery_step(grid, current, &mut self.rng)
                }
                Mode::Normal => {
                    let best = best_neighbor(field, current);
                    match detect_stuck(field, current, best, &history) {
                        Some(reason) => {
                            debug!(
                                "stuck at {current} after {} steps ({reason}), recovering",
                                stats.steps_taken
                            );
                            mode = Mode::recovery(self.config.recovery_steps);
                            stats.recoveries += 1;
                            history.clear();
                            None
                        }
                        None => Some(best),
                    }
                }
            };

            if let Some(next) = next {
                trace!("{current} -> {next}");
                current = next;
                path.push(current);
                stats.nodes_visited += 1;
                history.push(current);
            }
        }

        let success = current == goal;
        stats.planning_time = started.elapsed();

        if !success {
            warn!(
                "goal {goal} not reached within {} steps, stopped at {current}",
                self.config.max_steps
            );
        }

        PlanResult {
            path,
            success,
            stats,
        }
    }
}
