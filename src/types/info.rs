//! Grid dimensions.

use glam::UVec2;

/// Dimensions shared by occupancy grids and the fields computed over them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapInfo {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl MapInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(width: u32) -> Self {
        Self::new(width, width)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, pos: UVec2) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of `pos`. The caller guarantees `pos` is in bounds.
    #[inline]
    pub fn index(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }

    /// Inverse of [`MapInfo::index`].
    #[inline]
    pub fn position(&self, index: usize) -> UVec2 {
        let width = self.width as usize;
        UVec2::new((index % width) as u32, (index / width) as u32)
    }
}
