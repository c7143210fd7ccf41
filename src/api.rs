//! Library API for auditfix.
//!
//! The CLI commands print and return exit codes; these functions return
//! `Result`s for callers that embed the audit in their own tooling.
//!
//! # Example
//!
//! ```no_run
//! use auditfix::{RunOptions, audit, write_report};
//! use std::path::Path;
//!
//! let options = RunOptions::default();
//! let config = options.resolve_config(Path::new("/srv/code"))?;
//! let report = audit(Path::new("/srv/code"), options)?;
//! println!("{} issue(s) found", report.total_issues());
//! let path = write_report(&report, &config)?;
//! println!("Report written to {}", path.display());
//! # Ok::<(), auditfix::AuditfixError>(())
//! ```

use crate::analysis;
use crate::config::{Config, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::model::{RunMode, RunReport};
use crate::output::{MarkdownReport, OutputFormatter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Per-file problems never show up here; they are recorded as diagnostics
/// in the [`RunReport`].
#[derive(Debug, Error)]
pub enum AuditfixError {
    /// The scan root could not be found or resolved.
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The final report could not be persisted.
    #[error("Could not write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for [`audit`] and [`fix`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Use this configuration instead of loading `.auditfix.toml` from the root.
    pub config: Option<Config>,

    /// Files scanned per extension per project.
    pub max_files_per_extension: Option<usize>,

    /// Issue rows shown per project, in both modes.
    pub report_rows: Option<usize>,

    /// Order report rows by severity, highest first.
    pub sort_by_severity: bool,
}

impl RunOptions {
    /// The configuration a run under `root` will use, overrides applied.
    pub fn resolve_config(&self, root: &Path) -> Result<Config, AuditfixError> {
        let mut config = match self.config {
            Some(ref config) => config.clone(),
            None => Config::load(&resolve_root(root)?)?,
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut Config) {
        if let Some(max) = self.max_files_per_extension {
            config.limits.max_files_per_extension = max;
        }
        if let Some(rows) = self.report_rows {
            config.limits.audit_report_rows = rows;
            config.limits.fix_report_rows = rows;
        }
        if self.sort_by_severity {
            config.report.sort_by_severity = true;
        }
    }
}

/// Canonicalize the scan root and check that it is a directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, AuditfixError> {
    let resolved = path
        .canonicalize()
        .map_err(|_| AuditfixError::RootNotFound(path.to_path_buf()))?;
    if !resolved.is_dir() {
        return Err(AuditfixError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// Index every project under `root` and report insecure patterns.
///
/// Nothing on disk is modified.
pub fn audit(root: &Path, options: RunOptions) -> Result<RunReport, AuditfixError> {
    let config = options.resolve_config(root)?;
    run(root, &config, RunMode::Audit, default_fs())
}

/// Report insecure patterns under `root` and rewrite the safely fixable ones.
pub fn fix(root: &Path, options: RunOptions) -> Result<RunReport, AuditfixError> {
    let config = options.resolve_config(root)?;
    run(root, &config, RunMode::Fix, default_fs())
}

/// Run one mode with an already resolved configuration.
pub fn run(
    root: &Path,
    config: &Config,
    mode: RunMode,
    fs: &dyn FileSystem,
) -> Result<RunReport, AuditfixError> {
    let root = resolve_root(root)?;
    Ok(analysis::analyze(&root, config, mode, fs))
}

/// Render the markdown report for a finished run.
pub fn render_report(report: &RunReport, config: &Config) -> Result<String, AuditfixError> {
    let formatter = MarkdownReport::for_mode(config, report.mode);
    let mut buffer = Vec::new();
    formatter.format(report, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the report into the scan root, replacing any previous one.
///
/// Returns the path of the written report.
pub fn write_report(report: &RunReport, config: &Config) -> Result<PathBuf, AuditfixError> {
    write_report_with_fs(report, config, default_fs())
}

pub fn write_report_with_fs(
    report: &RunReport,
    config: &Config,
    fs: &dyn FileSystem,
) -> Result<PathBuf, AuditfixError> {
    let markdown = render_report(report, config)?;
    let path = report.root.join(&config.report.file_name);

    fs.write_atomic(&path, &markdown)
        .map_err(|source| AuditfixError::ReportWrite {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
