//! Plain-text occupancy maps.
//!
//! One row per line, cells encoded as `0` (free), `1` (obstacle), `2` (start)
//! and `3` (goal). Cells are separated by whitespace, or by commas if any line
//! of the input contains a comma. Blank lines are ignored.

use std::path::Path;

use glam::UVec2;

use crate::grid::Grid2d;
use crate::types::cell::parse_cell;
use crate::types::{CellValue, LoadError, MapInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Whitespace,
    Comma,
}

impl Delimiter {
    fn detect(source: &str) -> Self {
        if source.lines().any(|line| line.contains(',')) {
            Self::Comma
        } else {
            Self::Whitespace
        }
    }

    fn split<'a>(self, line: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            Self::Whitespace => Box::new(line.split_whitespace()),
            Self::Comma => Box::new(line.split(',').map(str::trim)),
        }
    }
}

/// Parse a text map into a grid of cell values.
///
/// Line and column numbers in errors are 1-based and refer to the source text.
pub fn parse_map(source: &str) -> Result<Grid2d<CellValue>, LoadError> {
    let delimiter = Delimiter::detect(source);
    let mut data = Vec::new();
    let mut width: Option<usize> = None;
    let mut height = 0u32;

    for (line_idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = line_idx + 1;

        let row_start = data.len();
        for (col_idx, token) in delimiter.split(line).enumerate() {
            data.push(parse_cell(token, line_no, col_idx + 1)?);
        }
        let found = data.len() - row_start;

        match width {
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(LoadError::RaggedRow {
                    line: line_no,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = match width {
        Some(w) if w > 0 => w as u32,
        _ => return Err(LoadError::Empty),
    };

    let info = MapInfo::new(width, height);
    Ok(Grid2d::from_fn(info, |pos| data[info.index(pos)]))
}

/// Read and parse a text map from disk.
pub fn load_map(path: impl AsRef<Path>) -> Result<Grid2d<CellValue>, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&source)
}

/// Serialize a grid back to the space-delimited text format.
pub fn write_map(grid: &Grid2d<CellValue>) -> String {
    let mut out = String::with_capacity(grid.info().len() * 2);
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|cell| cell.code().to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Upscale a map by repeating every cell as a `factor x factor` block.
///
/// Start and goal stay single markers at the centre of their block; the rest
/// of the block is free.
pub fn upscale(grid: &Grid2d<CellValue>, factor: u32) -> Result<Grid2d<CellValue>, LoadError> {
    if factor == 0 {
        return Err(LoadError::InvalidScale(factor));
    }

    let (Some(width), Some(height)) = (
        grid.width().checked_mul(factor),
        grid.height().checked_mul(factor),
    ) else {
        return Err(LoadError::InvalidScale(factor));
    };
    let info = MapInfo::new(width, height);
    let centre = UVec2::splat(factor / 2);

    Ok(Grid2d::from_fn(info, |pos| {
        let value = grid[pos / factor];
        match value {
            CellValue::Start | CellValue::Goal if pos % factor != centre => CellValue::Free,
            _ => value,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_map() {
        let grid = parse_map("2 0 1\n0  0\t3\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[UVec2::new(0, 0)], CellValue::Start);
        assert_eq!(grid[UVec2::new(2, 0)], CellValue::Obstacle);
        assert_eq!(grid[UVec2::new(2, 1)], CellValue::Goal);
    }

    #[test]
    fn parses_comma_map_and_skips_blank_lines() {
        let grid = parse_map("\n2, 0,1\n\n0,0 ,3\n   \n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[UVec2::new(1, 1)], CellValue::Free);
        assert_eq!(grid[UVec2::new(2, 1)], CellValue::Goal);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_map(""), Err(LoadError::Empty)));
        assert!(matches!(parse_map("\n  \n"), Err(LoadError::Empty)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        match parse_map("0 0 0\n0 0\n") {
            Err(LoadError::RaggedRow {
                line,
                expected,
                found,
            }) => assert_eq!((line, expected, found), (2, 3, 2)),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bad_tokens_are_rejected() {
        assert!(matches!(
            parse_map("0 a\n"),
            Err(LoadError::InvalidToken { line: 1, column: 2, .. })
        ));
        assert!(matches!(
            parse_map("0 0\n0 7\n"),
            Err(LoadError::UnknownCell { line: 2, column: 2, value: 7 })
        ));
        // An empty field between two commas is not a cell.
        assert!(matches!(
            parse_map("0,,1\n"),
            Err(LoadError::InvalidToken { column: 2, .. })
        ));
    }

    #[test]
    fn write_then_parse_preserves_cells() {
        let grid = parse_map("2,0,1\n1,0,3\n").unwrap();
        let text = write_map(&grid);
        assert_eq!(text, "2 0 1\n1 0 3\n");
        assert_eq!(parse_map(&text).unwrap(), grid);
    }

    #[test]
    fn upscale_repeats_cells_and_keeps_single_markers() {
        let grid = parse_map("2 1\n0 3\n").unwrap();
        let big = upscale(&grid, 3).unwrap();
        assert_eq!(big.width(), 6);
        assert_eq!(big.height(), 6);

        for y in 0..3 {
            for x in 3..6 {
                assert_eq!(big[UVec2::new(x, y)], CellValue::Obstacle);
            }
        }
        let starts: Vec<UVec2> = big
            .iter_cells()
            .filter(|(_, v)| **v == CellValue::Start)
            .map(|(p, _)| p)
            .collect();
        let goals: Vec<UVec2> = big
            .iter_cells()
            .filter(|(_, v)| **v == CellValue::Goal)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(starts, vec![UVec2::new(1, 1)]);
        assert_eq!(goals, vec![UVec2::new(4, 4)]);
        assert_eq!(big[UVec2::new(0, 0)], CellValue::Free);
    }

    #[test]
    fn upscale_identity_and_zero() {
        let grid = parse_map("2 3\n").unwrap();
        assert_eq!(upscale(&grid, 1).unwrap(), grid);
        assert!(matches!(upscale(&grid, 0), Err(LoadError::InvalidScale(0))));
        assert!(matches!(
            upscale(&grid, u32::MAX),
            Err(LoadError::InvalidScale(u32::MAX))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_map("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
