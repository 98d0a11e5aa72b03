pub mod cell;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use cell::{CellValue, Marker};
pub use constants::*;
pub use error::{LoadError, PlannerError};
pub use geometry::Footprint;
pub use info::MapInfo;
