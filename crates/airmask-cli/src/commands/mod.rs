//! Command implementations for the CLI.

mod breakdown;
mod classify;
mod config;
mod masks;
mod recommend;
mod report;
mod tips;

pub use breakdown::cmd_breakdown;
pub use classify::cmd_classify;
pub use config::cmd_config;
pub use masks::cmd_masks;
pub use recommend::cmd_recommend;
pub use report::{ReportArgs, cmd_report};
pub use tips::cmd_tips;
