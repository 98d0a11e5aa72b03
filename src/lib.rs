//! Potential-field path planning on 2D occupancy grids.
//!
//! The pipeline has three stages, each producing an immutable value:
//!
//! 1. [`OccupancyGrid`] parses a text map and inflates its obstacles by the
//!    robot footprint.
//! 2. [`compute_field`] assigns every cell a potential combining goal
//!    attraction and obstacle repulsion.
//! 3. [`Navigator`] descends the field from start to goal, escaping local
//!    minima with a bounded random walk.
//!
//! ```
//! use micronav::{FieldParams, Footprint, Navigator, NavigatorConfig, OccupancyGrid, compute_field};
//!
//! let grid = OccupancyGrid::parse("2 0 0\n0 0 0\n0 0 3\n", Footprint::POINT)?;
//! let field = compute_field(&grid, &FieldParams::default())?;
//! let result = Navigator::seeded(NavigatorConfig::default(), 7)
//!     .plan(&grid, &field, grid.start(), grid.goal());
//! assert!(result.success);
//! # Ok::<(), micronav::PlannerError>(())
//! ```

pub mod batch;
pub mod config;
pub mod field;
pub mod grid;
pub mod loaders;
pub mod navigation;
pub mod types;
pub mod visualization;

pub use batch::{BatchEntry, Scenario, run_batch, scenario_maps};
pub use config::PlannerConfig;
pub use field::{DistanceMethod, FieldParams, PotentialField, compute_field};
pub use grid::{Grid2d, OccupancyGrid};
pub use loaders::{load_map, parse_map};
pub use navigation::{Navigator, NavigatorConfig, PlanResult, PlanStats};
pub use types::{CellValue, Footprint, LoadError, MapInfo, PlannerError};
