//! Planner configuration loaded from YAML.
//!
//! ```yaml
//! robot:
//!   width: 2
//!   height: 2
//! field:
//!   k_att: 3.0
//!   k_rep: 20.0
//!   rho0: 1.5
//!   distance: windowed   # or `transform`
//! navigator:
//!   max_steps: 5000
//!   recovery_steps: 100
//!   seed: 42
//! ```
//!
//! Every section and key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::FieldParams;
use crate::grid::OccupancyGrid;
use crate::navigation::NavigatorConfig;
use crate::types::{
    DEFAULT_HISTORY_LEN, DEFAULT_MAX_STEPS, DEFAULT_RECOVERY_STEPS, Footprint, PlannerError,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub robot: RobotSection,
    #[serde(default)]
    pub field: FieldParams,
    #[serde(default)]
    pub navigator: NavigatorSection,
}

/// Robot footprint in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSection {
    pub width: u32,
    pub height: u32,
}

impl Default for RobotSection {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorSection {
    pub max_steps: usize,
    pub recovery_steps: usize,
    pub history_len: usize,
    /// Fixed seed for the recovery random walk; entropy when absent.
    pub seed: Option<u64>,
    /// Raise `max_steps` to at least the number of grid cells.
    pub scale_to_grid: bool,
}

impl Default for NavigatorSection {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            recovery_steps: DEFAULT_RECOVERY_STEPS,
            history_len: DEFAULT_HISTORY_LEN,
            seed: None,
            scale_to_grid: false,
        }
    }
}

impl PlannerConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, PlannerError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, PlannerError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        Footprint::new(self.robot.width, self.robot.height)?;
        self.field.validate()?;
        self.navigator_config().validate()
    }

    pub fn footprint(&self) -> Result<Footprint, PlannerError> {
        Ok(Footprint::new(self.robot.width, self.robot.height)?)
    }

    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            max_steps: self.navigator.max_steps,
            recovery_steps: self.navigator.recovery_steps,
            history_len: self.navigator.history_len,
        }
    }

    /// Navigator configuration for a specific grid, applying `scale_to_grid`.
    pub fn navigator_config_for(&self, grid: &OccupancyGrid) -> NavigatorConfig {
        let config = self.navigator_config();
        if self.navigator.scale_to_grid {
            config.with_max_steps(config.max_steps_for(grid))
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DistanceMethod;

    #[test]
    fn empty_yaml_is_default() {
        let config = PlannerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.footprint().unwrap(), Footprint::POINT);
        assert_eq!(config.navigator_config(), NavigatorConfig::default());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let yaml = "
robot:
  width: 3
field:
  k_att: 3.0
  k_rep: 20.0
  rho0: 1.5
  distance: transform
navigator:
  seed: 42
";
        let config = PlannerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.robot, RobotSection { width: 3, height: 1 });
        assert_eq!(config.field.k_att, 3.0);
        assert_eq!(config.field.rho0, 1.5);
        assert_eq!(config.field.distance, DistanceMethod::Transform);
        assert_eq!(config.navigator.seed, Some(42));
        assert_eq!(config.navigator.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PlannerConfig::from_yaml("robot: {width: 0}").is_err());
        assert!(PlannerConfig::from_yaml("field: {k_att: 0.0}").is_err());
        assert!(PlannerConfig::from_yaml("field: {k_rep: -2.0}").is_err());
        assert!(PlannerConfig::from_yaml("navigator: {max_steps: 0}").is_err());
        assert!(PlannerConfig::from_yaml("navigator: {history_len: 0}").is_err());
        assert!(PlannerConfig::from_yaml("field: {distance: magic}").is_err());
    }

    #[test]
    fn yaml_roundtrip() {
        let mut config = PlannerConfig::default();
        config.navigator.seed = Some(7);
        config.field.k_rep = 12.5;
        let yaml = config.to_yaml().unwrap();
        assert_eq!(PlannerConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn scale_to_grid_raises_budget() {
        let grid = OccupancyGrid::parse("2 3\n", Footprint::POINT).unwrap();
        let mut config = PlannerConfig::default();
        config.navigator.max_steps = 1;
        assert_eq!(config.navigator_config_for(&grid).max_steps, 1);
        config.navigator.scale_to_grid = true;
        assert_eq!(config.navigator_config_for(&grid).max_steps, 2);
    }
}
