//! Command implementations for the CLI.

mod config;
mod evaluate;
mod profile;
mod report;

pub use config::cmd_config;
pub use evaluate::{EvaluateArgs, cmd_evaluate};
pub use profile::cmd_profile;
pub use report::{ReportArgs, cmd_report};
