//! Nearest-obstacle distance queries used by the repulsive potential.

use glam::{IVec2, UVec2};

use crate::grid::Grid2d;
use crate::types::CellValue;

/// Euclidean distance (in cells) from a cell to the nearest obstacle.
///
/// Implementations may return any value greater than the influence radius
/// (including `f32::INFINITY`) when no obstacle lies within it.
pub trait ObstacleDistance {
    fn nearest(&self, pos: UVec2) -> f32;
}

/// Brute-force scan of a square window around each query cell.
///
/// The window radius is `ceil(rho0) + 1`, which covers every obstacle close
/// enough to contribute repulsion. It never exceeds the larger grid side, so
/// a huge `rho0` scans the whole grid instead of overflowing.
#[derive(Debug, Clone, Copy)]
pub struct WindowedScan<'a> {
    cells: &'a Grid2d<CellValue>,
    radius: i32,
}

impl<'a> WindowedScan<'a> {
    pub fn new(cells: &'a Grid2d<CellValue>, rho0: f32) -> Self {
        Self {
            cells,
            radius: window_radius(rho0, cells.width().max(cells.height())),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }
}

/// Scan radius, in cells, for an influence radius of `rho0`, capped at `limit`.
pub fn window_radius(rho0: f32, limit: u32) -> i32 {
    let radius = (rho0.max(0.0).ceil() as i64).saturating_add(1);
    radius.min(limit as i64).min(i32::MAX as i64) as i32
}

impl ObstacleDistance for WindowedScan<'_> {
    fn nearest(&self, pos: UVec2) -> f32 {
        let center = pos.as_ivec2();
        let size = IVec2::new(self.cells.width() as i32, self.cells.height() as i32);
        let min = center
            .saturating_sub(IVec2::splat(self.radius))
            .max(IVec2::ZERO);
        let max = center
            .saturating_add(IVec2::splat(self.radius))
            .min(size - IVec2::ONE);

        let mut best: Option<i32> = None;
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let p = IVec2::new(x, y);
                if !self.cells[p.as_uvec2()].is_obstacle() {
                    continue;
                }
                let d = p - center;
                let sq = d.x * d.x + d.y * d.y;
                if best.is_none_or(|b| sq < b) {
                    best = Some(sq);
                }
            }
        }

        best.map_or(f32::INFINITY, |sq| (sq as f32).sqrt())
    }
}
