//! Exact nearest-obstacle distances for the whole grid.
//!
//! Separable lower-envelope passes (Felzenszwalb & Huttenlocher, "Distance
//! Transforms of Sampled Functions", 2012): rows first, then columns. The
//! result is the squared Euclidean distance in cells.

use glam::UVec2;

use crate::field::distance::ObstacleDistance;
use crate::grid::Grid2d;
use crate::types::{CellValue, MapInfo};

/// Sentinel value representing "infinite" distance (no obstacle at all).
const INF: f32 = f32::MAX / 2.0;

/// Compute the 1D squared-distance transform of `f` into `d`.
///
/// `f[i]` is 0.0 for obstacle cells and INF otherwise. `v` must hold at least
/// `f.len()` entries and `z` at least `f.len() + 1`.
fn dt_1d(f: &[f32], d: &mut [f32], v: &mut [usize], z: &mut [f32]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let sq = |x: f32| x * x;
    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f32, p as f32);
        ((f[q] + sq(qf)) - (f[p] + sq(pf))) / (2.0 * qf - 2.0 * pf)
    };

    let mut k = 0usize;
    v[0] = 0;
    z[0] = -INF;
    z[1] = INF;

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        // z[0] is -INF, so the envelope never pops past its first parabola.
        while k > 0 && s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = INF;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate().take(n) {
        while z[k + 1] < q as f32 {
            k += 1;
        }
        *out = sq(q as f32 - v[k] as f32) + f[v[k]];
    }
}

/// Squared Euclidean distance from every cell to the nearest obstacle.
#[derive(Debug, Clone)]
pub struct DistanceField {
    squared: Grid2d<f32>,
}

impl DistanceField {
    /// Build from a working grid; obstacle cells are the seeds.
    pub fn from_cells(cells: &Grid2d<CellValue>) -> Self {
        Self::from_occupancy(*cells.info(), |pos| cells[pos].is_obstacle())
    }

    /// Build from an arbitrary occupancy predicate.
    pub fn from_occupancy(info: MapInfo, occupied: impl Fn(UVec2) -> bool) -> Self {
        let width = info.width as usize;
        let height = info.height as usize;

        let mut data: Vec<f32> = (0..info.len())
            .map(|i| if occupied(info.position(i)) { 0.0 } else { INF })
            .collect();

        let max_dim = width.max(height);
        let mut v = vec![0usize; max_dim];
        let mut z = vec![0.0f32; max_dim + 1];
        let mut line = vec![0.0f32; max_dim];
        let mut out = vec![0.0f32; max_dim];

        // Pass 1: rows.
        for row in data.chunks_mut(width.max(1)) {
            dt_1d(row, &mut out[..width], &mut v, &mut z);
            row.copy_from_slice(&out[..width]);
        }

        // Pass 2: columns, gathered into a contiguous buffer.
        for x in 0..width {
            for y in 0..height {
                line[y] = data[y * width + x];
            }
            dt_1d(&line[..height], &mut out[..height], &mut v, &mut z);
            for y in 0..height {
                data[y * width + x] = out[y];
            }
        }

        Self {
            squared: Grid2d::from_fn(info, |pos| data[info.index(pos)]),
        }
    }

    pub fn info(&self) -> &MapInfo {
        self.squared.info()
    }

    /// Squared distance at `pos`. Panics out of bounds.
    #[inline]
    pub fn squared(&self, pos: UVec2) -> f32 {
        self.squared[pos]
    }
}

impl ObstacleDistance for DistanceField {
    fn nearest(&self, pos: UVec2) -> f32 {
        let sq = self.squared(pos);
        if sq >= INF { f32::INFINITY } else { sq.sqrt() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: u32, height: u32, obstacles: &[(u32, u32)]) -> DistanceField {
        DistanceField::from_occupancy(MapInfo::new(width, height), |p| {
            obstacles.contains(&(p.x, p.y))
        })
    }

    #[test]
    fn single_obstacle_center() {
        let df = field(5, 5, &[(2, 2)]);

        assert_eq!(df.squared(UVec2::new(2, 2)), 0.0);
        assert_eq!(df.squared(UVec2::new(1, 2)), 1.0);
        assert_eq!(df.squared(UVec2::new(3, 2)), 1.0);
        assert_eq!(df.squared(UVec2::new(2, 1)), 1.0);
        assert_eq!(df.squared(UVec2::new(2, 3)), 1.0);
        assert_eq!(df.squared(UVec2::new(1, 1)), 2.0);
        assert_eq!(df.squared(UVec2::new(3, 3)), 2.0);
        assert_eq!(df.squared(UVec2::new(0, 0)), 8.0);
    }

    #[test]
    fn two_obstacles_in_a_row() {
        let df = field(7, 1, &[(0, 0), (6, 0)]);
        let got: Vec<f32> = (0..7).map(|x| df.squared(UVec2::new(x, 0))).collect();
        assert_eq!(got, vec![0.0, 1.0, 4.0, 9.0, 4.0, 1.0, 0.0]);
    }

    #[test]
    fn non_square_grid() {
        let df = field(3, 6, &[(0, 5)]);
        assert_eq!(df.squared(UVec2::new(0, 0)), 25.0);
        assert_eq!(df.squared(UVec2::new(2, 0)), 29.0);
        assert_eq!(df.nearest(UVec2::new(0, 2)), 3.0);
    }

    #[test]
    fn no_obstacles_is_infinite() {
        let df = field(4, 3, &[]);
        assert_eq!(df.nearest(UVec2::new(1, 1)), f32::INFINITY);
    }
}
