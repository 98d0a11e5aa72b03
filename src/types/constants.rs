pub const DEFAULT_ATTRACTIVE_GAIN: f32 = 1.0;
pub const DEFAULT_REPULSIVE_GAIN: f32 = 100.0;
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 3.0;

/// Obstacle distances are clamped to this before the repulsive term divides by them.
pub const MIN_OBSTACLE_DISTANCE: f32 = 0.1;

pub const DEFAULT_MAX_STEPS: usize = 5000;
pub const DEFAULT_RECOVERY_STEPS: usize = 100;
pub const DEFAULT_HISTORY_LEN: usize = 4;
