pub mod navigator;
pub mod result;
pub mod state;

pub use navigator::{Navigator, NavigatorConfig, best_neighbor, recovery_step};
pub use result::{PlanResult, PlanStats};
pub use state::{Mode, RecentHistory, StuckReason, detect_stuck};
