//! Cell values of a text occupancy map.

use std::fmt;

use crate::types::LoadError;

/// Value stored in every cell of an occupancy grid.
///
/// The discriminants are the integers used by the text map format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellValue {
    #[default]
    Free = 0,
    Obstacle = 1,
    Start = 2,
    Goal = 3,
}

impl CellValue {
    #[inline]
    pub fn is_obstacle(self) -> bool {
        self == Self::Obstacle
    }

    /// Integer code used by the text map format.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for CellValue {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Free),
            1 => Ok(Self::Obstacle),
            2 => Ok(Self::Start),
            3 => Ok(Self::Goal),
            other => Err(other),
        }
    }
}

/// The two single-occurrence markers of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
}

impl Marker {
    pub fn cell_value(self) -> CellValue {
        match self {
            Self::Start => CellValue::Start,
            Self::Goal => CellValue::Goal,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

impl From<Marker> for CellValue {
    fn from(marker: Marker) -> Self {
        marker.cell_value()
    }
}

/// Parse a single map token into a cell value.
pub(crate) fn parse_cell(token: &str, line: usize, column: usize) -> Result<CellValue, LoadError> {
    let value: i64 = token.parse().map_err(|_| LoadError::InvalidToken {
        line,
        column,
        token: token.to_string(),
    })?;
    CellValue::try_from(value).map_err(|value| LoadError::UnknownCell {
        line,
        column,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() {
        for value in [
            CellValue::Free,
            CellValue::Obstacle,
            CellValue::Start,
            CellValue::Goal,
        ] {
            assert_eq!(CellValue::try_from(value.code() as i64), Ok(value));
        }
        assert_eq!(CellValue::try_from(4), Err(4));
        assert_eq!(CellValue::try_from(-1), Err(-1));
    }

    #[test]
    fn parse_cell_reports_position() {
        match parse_cell("x", 3, 7) {
            Err(LoadError::InvalidToken { line, column, token }) => {
                assert_eq!((line, column), (3, 7));
                assert_eq!(token, "x");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            parse_cell("9", 1, 1),
            Err(LoadError::UnknownCell { value: 9, .. })
        ));
    }
}
