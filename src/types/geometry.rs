//! Geometric types shared by the grid, field and navigator.
//!
//! Cell positions are `UVec2` with `x` the column and `y` the row. Row 0 is
//! the first line of a text map.

use glam::{IVec2, UVec2};

use crate::types::{LoadError, MapInfo};

/// Rectangular robot footprint in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self::POINT
    }
}

impl Footprint {
    /// A robot occupying a single cell.
    pub const POINT: Self = Self {
        width: 1,
        height: 1,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidFootprint { width, height });
        }
        Ok(Self { width, height })
    }

    /// True when obstacles need no inflation for this footprint.
    pub fn is_point(&self) -> bool {
        self.width <= 1 && self.height <= 1
    }

    /// Symmetric inflation margins: `x` is the column margin, `y` the row margin.
    pub fn margins(&self) -> UVec2 {
        UVec2::new(
            self.width.saturating_sub(1) / 2,
            self.height.saturating_sub(1) / 2,
        )
    }
}

/// 8-connected neighbour offsets in scan order: rows top to bottom, columns
/// left to right within each row.
pub const NEIGHBORS_8: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// 4-connected neighbour offsets: up, down, left, right.
pub const NEIGHBORS_4: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
];

/// Offset `pos` by `delta`, returning `None` if the result leaves the grid.
#[inline]
pub fn offset(info: &MapInfo, pos: UVec2, delta: IVec2) -> Option<UVec2> {
    let next = pos.as_ivec2() + delta;
    if next.x < 0 || next.y < 0 {
        return None;
    }
    let next = next.as_uvec2();
    info.contains(next).then_some(next)
}

/// Euclidean distance between two cell centres.
#[inline]
pub fn cell_distance(a: UVec2, b: UVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// Chebyshev (king-move) distance between two cells.
#[inline]
pub fn chebyshev_distance(a: UVec2, b: UVec2) -> u32 {
    let d = (a.as_ivec2() - b.as_ivec2()).abs();
    d.x.max(d.y) as u32
}
