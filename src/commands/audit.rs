use crate::cli::RunArgs;
use crate::model::RunMode;

use super::execute;

/// Index and scan every project without touching the sources.
pub fn cmd_audit(args: RunArgs) -> i32 {
    execute(&args, RunMode::Audit)
}
