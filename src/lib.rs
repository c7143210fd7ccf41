pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod model;
pub mod output;
pub mod parser;
pub mod rules;
pub mod style;

pub use api::{AuditfixError, RunOptions, audit, fix, render_report, write_report};
pub use cli::Cli;
pub use commands::{cmd_audit, cmd_fix, cmd_init};
pub use config::Config;
pub use model::{Issue, RunMode, RunReport, Severity};
