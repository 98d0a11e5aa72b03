use std::path::PathBuf;

use glam::UVec2;
use thiserror::Error;

use crate::types::Marker;

/// Errors raised while building an occupancy grid from a map source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map is empty")]
    Empty,
    #[error("line {line}, column {column}: `{token}` is not an integer")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line}, column {column}: unknown cell value {value}")]
    UnknownCell { line: usize, column: usize, value: i64 },
    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("map has no {0} marker")]
    MissingMarker(Marker),
    #[error("map has more than one {marker} marker: {first} and {second}")]
    DuplicateMarker {
        marker: Marker,
        first: UVec2,
        second: UVec2,
    },
    #[error("invalid footprint {width}x{height}: both sides must be at least 1")]
    InvalidFootprint { width: u32, height: u32 },
    #[error("invalid upscale factor {0}")]
    InvalidScale(u32),
}

/// Top-level error for the planning pipeline.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("cell ({}, {}) out of bounds for map {width}x{height}", .pos.x, .pos.y)]
    OutOfBounds { pos: UVec2, width: u32, height: u32 },
}
