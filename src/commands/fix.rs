use crate::cli::RunArgs;
use crate::model::RunMode;

use super::execute;

pub fn cmd_fix(args: RunArgs) -> i32 {
    execute(&args, RunMode::Fix)
}
