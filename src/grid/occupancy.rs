//! Configuration-space occupancy grid.
//!
//! An [`OccupancyGrid`] keeps the map exactly as parsed (`original`) next to
//! a `working` copy in which every obstacle has been grown by the robot's
//! half-footprint. Planning runs against `working`, so the robot can be
//! treated as a single cell.

use std::path::Path;

use glam::{IVec2, UVec2};
use log::debug;

use crate::grid::Grid2d;
use crate::loaders::{load_map, parse_map};
use crate::types::{CellValue, Footprint, LoadError, MapInfo, Marker};

#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    original: Grid2d<CellValue>,
    working: Grid2d<CellValue>,
    start: UVec2,
    goal: UVec2,
    footprint: Footprint,
}

impl OccupancyGrid {
    /// Load a text map from disk and inflate it for `footprint`.
    pub fn load(path: impl AsRef<Path>, footprint: Footprint) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let grid = Self::from_cells(load_map(path)?, footprint)?;
        debug!(
            "loaded {} ({}x{}, footprint {}x{})",
            path.display(),
            grid.cols(),
            grid.rows(),
            footprint.width,
            footprint.height
        );
        Ok(grid)
    }

    /// Parse an in-memory text map and inflate it for `footprint`.
    pub fn parse(source: &str, footprint: Footprint) -> Result<Self, LoadError> {
        Self::from_cells(parse_map(source)?, footprint)
    }

    /// Build from already-parsed cells. Exactly one start and one goal marker
    /// must be present.
    pub fn from_cells(original: Grid2d<CellValue>, footprint: Footprint) -> Result<Self, LoadError> {
        if original.info().is_empty() {
            return Err(LoadError::Empty);
        }
        if footprint.width == 0 || footprint.height == 0 {
            return Err(LoadError::InvalidFootprint {
                width: footprint.width,
                height: footprint.height,
            });
        }

        let start = find_marker(&original, Marker::Start)?;
        let goal = find_marker(&original, Marker::Goal)?;
        let working = inflate(&original, footprint);

        Ok(Self {
            original,
            working,
            start,
            goal,
            footprint,
        })
    }

    pub fn info(&self) -> &MapInfo {
        self.working.info()
    }

    pub fn rows(&self) -> u32 {
        self.working.height()
    }

    pub fn cols(&self) -> u32 {
        self.working.width()
    }

    pub fn start(&self) -> UVec2 {
        self.start
    }

    pub fn goal(&self) -> UVec2 {
        self.goal
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// The map as parsed, before inflation.
    pub fn original(&self) -> &Grid2d<CellValue> {
        &self.original
    }

    /// The inflated grid all planning runs against.
    pub fn working(&self) -> &Grid2d<CellValue> {
        &self.working
    }

    /// True iff `pos` is inside the grid and not an obstacle in the working grid.
    #[inline]
    pub fn is_free(&self, pos: UVec2) -> bool {
        self.working
            .get(pos)
            .is_some_and(|cell| !cell.is_obstacle())
    }

    /// Working-grid value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Use [`OccupancyGrid::get`] when
    /// the position is not known to be in bounds.
    #[inline]
    pub fn cell(&self, pos: UVec2) -> CellValue {
        self.working[pos]
    }

    /// Bounds-checked working-grid value at `pos`.
    pub fn get(&self, pos: UVec2) -> Option<CellValue> {
        self.working.get(pos).copied()
    }

    /// Number of obstacle cells in the working grid.
    pub fn obstacle_count(&self) -> usize {
        self.working
            .data()
            .iter()
            .filter(|cell| cell.is_obstacle())
            .count()
    }
}

fn find_marker(grid: &Grid2d<CellValue>, marker: Marker) -> Result<UVec2, LoadError> {
    let target = marker.cell_value();
    let mut found: Option<UVec2> = None;
    for (pos, cell) in grid.iter_cells() {
        if *cell != target {
            continue;
        }
        if let Some(first) = found {
            return Err(LoadError::DuplicateMarker {
                marker,
                first,
                second: pos,
            });
        }
        found = Some(pos);
    }
    found.ok_or(LoadError::MissingMarker(marker))
}

/// Grow every obstacle of `original` by the footprint's margins.
///
/// Only free cells are overwritten, so start and goal survive inflation.
fn inflate(original: &Grid2d<CellValue>, footprint: Footprint) -> Grid2d<CellValue> {
    let mut working = original.clone();
    if footprint.is_point() {
        return working;
    }

    let margins = footprint.margins().as_ivec2();
    let info = *original.info();

    for (cell, value) in original.iter_cells() {
        if !value.is_obstacle() {
            continue;
        }

        let center = cell.as_ivec2();
        for dy in -margins.y..=margins.y {
            for dx in -margins.x..=margins.x {
                let p = center + IVec2::new(dx, dy);
                if p.x < 0 || p.y < 0 {
                    continue;
                }
                let pos = p.as_uvec2();
                if !info.contains(pos) {
                    continue;
                }
                if working[pos] == CellValue::Free {
                    let _ = working.set(pos, CellValue::Obstacle);
                }
            }
        }
    }

    working
}
