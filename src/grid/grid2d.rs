use std::ops::Index;

use glam::UVec2;

use crate::types::{MapInfo, PlannerError};

/// Dense row-major 2D storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, PlannerError> {
        let expected_len = info.len();
        if data.len() != expected_len {
            return Err(PlannerError::InvalidParameter(format!(
                "data length {} does not match map size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { info, data })
    }

    pub fn filled(info: MapInfo, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            info,
            data: vec![value; info.len()],
        }
    }

    /// Build a grid by evaluating `f` at every cell in row-major order.
    pub fn from_fn(info: MapInfo, mut f: impl FnMut(UVec2) -> T) -> Self {
        let data = (0..info.len()).map(|i| f(info.position(i))).collect();
        Self { info, data }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    pub fn contains(&self, pos: UVec2) -> bool {
        self.info.contains(pos)
    }

    pub fn get(&self, pos: UVec2) -> Option<&T> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.data[self.info.index(pos)])
    }

    pub fn set(&mut self, pos: UVec2, value: T) -> Result<(), PlannerError> {
        if !self.contains(pos) {
            return Err(PlannerError::OutOfBounds {
                pos,
                width: self.info.width,
                height: self.info.height,
            });
        }
        let idx = self.info.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    /// Iterate over `(position, value)` pairs in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (UVec2, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, value)| (self.info.position(i), value))
    }

    /// Iterate over the rows as slices, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.info.width.max(1) as usize)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid2d<U> {
        Grid2d {
            info: self.info,
            data: self.data.iter().map(f).collect(),
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

/// Unchecked-by-contract access: indexing outside the grid panics.
impl<T> Index<UVec2> for Grid2d<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: UVec2) -> &T {
        assert!(
            self.contains(pos),
            "cell ({}, {}) out of bounds for map {}x{}",
            pos.x,
            pos.y,
            self.info.width,
            self.info.height
        );
        &self.data[self.info.index(pos)]
    }
}
