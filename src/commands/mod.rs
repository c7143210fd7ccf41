mod audit;
mod fix;
mod init;

pub use audit::cmd_audit;
pub use fix::cmd_fix;
pub use init::cmd_init;

use crate::api::{self, RunOptions};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::fs::{FileSystem, default_fs};
use crate::model::{RunMode, RunReport, Severity};
use crate::style;
use std::io;
use std::path::{Path, PathBuf};

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Resolve the scan root and load its config, applying CLI overrides.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(args: &RunArgs) -> Result<Self, i32> {
        let resolved_path = match api::resolve_root(&args.path) {
            Ok(p) => p,
            Err(e) => {
                style::error(&format!("{}: {}", e, style::path(&args.path)));
                return Err(1);
            }
        };

        let mut config = Config::load(&resolved_path).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        RunOptions {
            config: None,
            max_files_per_extension: args.max_files,
            report_rows: args.rows,
            sort_by_severity: args.sort_severity,
        }
        .apply_to(&mut config);

        Ok(Self {
            path: resolved_path,
            config,
        })
    }
}

/// Run one mode end to end: analyze, write the report, print a summary.
fn execute(args: &RunArgs, mode: RunMode) -> i32 {
    let ctx = match CommandContext::new(args) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    execute_with_fs(&ctx, mode, args.print, default_fs())
}

fn execute_with_fs(ctx: &CommandContext, mode: RunMode, print: bool, fs: &dyn FileSystem) -> i32 {
    let report = match api::run(&ctx.path, &ctx.config, mode, fs) {
        Ok(report) => report,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    if report.projects.is_empty() {
        style::hint(&format!(
            "No projects found; each immediate subdirectory of {} is audited as one project",
            style::path(&ctx.path)
        ));
    }

    let written = match api::write_report_with_fs(&report, &ctx.config, fs) {
        Ok(path) => path,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    if print {
        let rendered = fs
            .read_to_string(&written)
            .and_then(|markdown| style::render_markdown(&markdown, &mut io::stdout()));
        if let Err(e) = rendered {
            style::warning(&format!("Could not print report: {}", e));
        }
    }

    print_summary(&report, &written);
    0
}

fn print_summary(report: &RunReport, written: &Path) {
    match report.mode {
        RunMode::Audit => style::header("Audit complete"),
        RunMode::Fix => style::header("Audit and auto-fix complete"),
    }
    println!("{}", style::metric("projects", report.projects.len()));
    println!("{}", style::metric("issues", report.total_issues()));

    for level in [Severity::High, Severity::Medium, Severity::Low] {
        let count = report
            .projects
            .iter()
            .flat_map(|p| &p.outcome.issues)
            .filter(|i| i.severity == level)
            .count();
        if count > 0 {
            println!("    {} {}", style::severity(level), count);
        }
    }

    if report.mode == RunMode::Fix {
        println!("{}", style::metric("fixes applied", report.total_fixes()));
    }

    let skipped = report.diagnostics().count();
    if skipped > 0 {
        style::warning(&format!(
            "{} file(s) skipped, see the Diagnostics section of the report",
            skipped
        ));
    }

    style::success(&format!("Report written to {}", style::path(written)));
}
