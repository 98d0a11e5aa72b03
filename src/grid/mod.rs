pub mod grid2d;
pub mod occupancy;

pub use grid2d::Grid2d;
pub use occupancy::OccupancyGrid;
