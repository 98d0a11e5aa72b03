//! Artificial potential field over a configuration-space grid.
//!
//! Every free cell gets `k_att * |p - goal|` (a conic attractive well) plus a
//! Khatib repulsive term that is non-zero only within `rho0` of an obstacle.
//! Obstacle cells hold `f32::INFINITY`.

pub mod distance;
pub mod edt;

use glam::UVec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid2d, OccupancyGrid};
use crate::types::geometry::cell_distance;
use crate::types::{
    DEFAULT_ATTRACTIVE_GAIN, DEFAULT_INFLUENCE_RADIUS, DEFAULT_REPULSIVE_GAIN,
    MIN_OBSTACLE_DISTANCE, MapInfo, PlannerError,
};

pub use distance::{ObstacleDistance, WindowedScan};
pub use edt::DistanceField;

/// How the nearest-obstacle distance is computed for the repulsive term.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    /// Scan a window of radius `ceil(rho0) + 1` around each cell.
    #[default]
    Windowed,
    /// Exact Euclidean distance transform over the whole grid.
    Transform,
}

/// Tuning parameters of the potential field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Attraction gain, > 0.
    #[serde(deserialize_with = "deserialize_gain")]
    pub k_att: f32,
    /// Repulsion gain, >= 0.
    #[serde(deserialize_with = "deserialize_gain")]
    pub k_rep: f32,
    /// Influence radius in cells, > 0.
    #[serde(deserialize_with = "deserialize_gain")]
    pub rho0: f32,
    pub distance: DistanceMethod,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            k_att: DEFAULT_ATTRACTIVE_GAIN,
            k_rep: DEFAULT_REPULSIVE_GAIN,
            rho0: DEFAULT_INFLUENCE_RADIUS,
            distance: DistanceMethod::Windowed,
        }
    }
}

fn deserialize_gain<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "field parameters must be finite and non-negative",
        ))
    }
}

impl FieldParams {
    pub fn new(k_att: f32, k_rep: f32, rho0: f32) -> Self {
        Self {
            k_att,
            k_rep,
            rho0,
            ..Default::default()
        }
    }

    pub fn with_distance(mut self, distance: DistanceMethod) -> Self {
        self.distance = distance;
        self
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(self.k_att.is_finite() && self.k_att > 0.0) {
            return Err(PlannerError::InvalidParameter(format!(
                "k_att must be positive, got {}",
                self.k_att
            )));
        }
        if !(self.k_rep.is_finite() && self.k_rep >= 0.0) {
            return Err(PlannerError::InvalidParameter(format!(
                "k_rep must be non-negative, got {}",
                self.k_rep
            )));
        }
        if !(self.rho0.is_finite() && self.rho0 > 0.0) {
            return Err(PlannerError::InvalidParameter(format!(
                "rho0 must be positive, got {}",
                self.rho0
            )));
        }
        Ok(())
    }
}

/// Linear attraction towards `goal`.
#[inline]
pub fn attractive_potential(pos: UVec2, goal: UVec2, k_att: f32) -> f32 {
    k_att * cell_distance(pos, goal)
}

/// Khatib repulsion for an obstacle at distance `d`.
///
/// Exactly zero beyond `rho0`; `d` is clamped to [`MIN_OBSTACLE_DISTANCE`]
/// before dividing.
#[inline]
pub fn repulsive_potential(d: f32, k_rep: f32, rho0: f32) -> f32 {
    if d > rho0 {
        return 0.0;
    }
    let d = d.max(MIN_OBSTACLE_DISTANCE);
    let t = 1.0 / d - 1.0 / rho0;
    0.5 * k_rep * t * t
}

/// Dense scalar field, one value per grid cell. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialField {
    values: Grid2d<f32>,
}

impl PotentialField {
    /// Wrap values computed elsewhere. Obstacles must be `f32::INFINITY`.
    pub fn from_values(values: Grid2d<f32>) -> Self {
        Self { values }
    }

    pub fn info(&self) -> &MapInfo {
        self.values.info()
    }

    pub fn get(&self, pos: UVec2) -> Option<f32> {
        self.values.get(pos).copied()
    }

    /// Value at `pos`. Panics out of bounds.
    #[inline]
    pub fn value(&self, pos: UVec2) -> f32 {
        self.values[pos]
    }

    /// True if `pos` holds the infinite obstacle sentinel.
    #[inline]
    pub fn is_blocked(&self, pos: UVec2) -> bool {
        self.value(pos) == f32::INFINITY
    }

    /// Smallest and largest finite values, or `None` if every cell is blocked.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.values
            .data()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn values(&self) -> &Grid2d<f32> {
        &self.values
    }
}

/// Compute the potential field of `grid` towards its goal.
pub fn compute_field(
    grid: &OccupancyGrid,
    params: &FieldParams,
) -> Result<PotentialField, PlannerError> {
    params.validate()?;

    let field = match params.distance {
        DistanceMethod::Windowed => {
            synthesize(grid, params, &WindowedScan::new(grid.working(), params.rho0))
        }
        DistanceMethod::Transform => {
            synthesize(grid, params, &DistanceField::from_cells(grid.working()))
        }
    };

    if let Some((lo, hi)) = field.finite_range() {
        debug!(
            "potential field {}x{} ({:?}): finite range [{lo:.3}, {hi:.3}]",
            grid.cols(),
            grid.rows(),
            params.distance
        );
    }
    Ok(field)
}

fn synthesize(
    grid: &OccupancyGrid,
    params: &FieldParams,
    distances: &impl ObstacleDistance,
) -> PotentialField {
    let goal = grid.goal();
    let values = Grid2d::from_fn(*grid.info(), |pos| {
        if grid.cell(pos).is_obstacle() {
            return f32::INFINITY;
        }
        let attraction = attractive_potential(pos, goal, params.k_att);
        let repulsion = repulsive_potential(distances.nearest(pos), params.k_rep, params.rho0);
        attraction + repulsion
    });
    PotentialField::from_values(values)
}
