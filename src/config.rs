use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".auditfix.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub limits: Limits,
    pub scan: ScanSettings,
    pub report: ReportSettings,
}

/// Bounds on the work done per project and on report size.
#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// Files scanned per extension per project; later files are silently not scanned.
    pub max_files_per_extension: usize,
    /// Deepest folder level of the structural tree, the project root being level 0.
    pub max_tree_depth: usize,
    pub audit_report_rows: usize,
    pub fix_report_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// Extensions (without the dot) of files indexed and scanned.
    pub extensions: Vec<String>,
    /// Entry names skipped wherever they appear, in addition to hidden entries.
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub file_name: String,
    pub title: Option<String>,
    pub sort_by_severity: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    limits: Option<RawLimits>,
    scan: Option<RawScan>,
    report: Option<RawReport>,
}

#[derive(Debug, Deserialize)]
struct RawLimits {
    max_files_per_extension: Option<usize>,
    max_tree_depth: Option<usize>,
    audit_report_rows: Option<usize>,
    fix_report_rows: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawScan {
    extensions: Option<Vec<String>>,
    skip_dirs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    file_name: Option<String>,
    title: Option<String>,
    sort_by_severity: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            scan: ScanSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files_per_extension: 100,
            max_tree_depth: 2,
            audit_report_rows: 10,
            fix_report_rows: 5,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["py".into(), "js".into(), "ts".into()],
            skip_dirs: vec![
                "node_modules".into(),
                "__pycache__".into(),
                "tests".into(),
                "docs".into(),
            ],
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            file_name: "REPORT.md".to_string(),
            title: None,
            sort_by_severity: false,
        }
    }
}

impl ScanSettings {
    /// Hidden entries and denylisted names never reach the tree or the scanner.
    pub fn is_skipped(&self, name: &str) -> bool {
        name.starts_with('.') || self.skip_dirs.iter().any(|d| d == name)
    }

    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let limits = match raw.limits {
            Some(l) => Limits {
                max_files_per_extension: l
                    .max_files_per_extension
                    .unwrap_or(defaults.limits.max_files_per_extension),
                max_tree_depth: l.max_tree_depth.unwrap_or(defaults.limits.max_tree_depth),
                audit_report_rows: l
                    .audit_report_rows
                    .unwrap_or(defaults.limits.audit_report_rows),
                fix_report_rows: l.fix_report_rows.unwrap_or(defaults.limits.fix_report_rows),
            },
            None => defaults.limits,
        };

        let scan = match raw.scan {
            Some(s) => ScanSettings {
                extensions: s
                    .extensions
                    .map(|exts| {
                        exts.into_iter()
                            .map(|e| e.trim_start_matches('.').to_string())
                            .collect()
                    })
                    .unwrap_or(defaults.scan.extensions),
                skip_dirs: s.skip_dirs.unwrap_or(defaults.scan.skip_dirs),
            },
            None => defaults.scan,
        };

        let report = match raw.report {
            Some(r) => ReportSettings {
                file_name: r.file_name.unwrap_or(defaults.report.file_name),
                title: r.title,
                sort_by_severity: r.sort_by_severity.unwrap_or(false),
            },
            None => defaults.report,
        };

        Ok(Self {
            limits,
            scan,
            report,
        })
    }
}

pub fn generate_config_template() -> String {
    r#"# auditfix configuration
# Place this file in the scan root. Every key is optional.

[limits]
# Files scanned per extension in each project; the rest are not scanned
max_files_per_extension = 100
# Folder levels shown in the structural tree (project root = 0)
max_tree_depth = 2
# Issue rows per project in the report
audit_report_rows = 10
fix_report_rows = 5

[scan]
# File extensions indexed and scanned
extensions = ["py", "js", "ts"]
# Entry names skipped everywhere (hidden entries are always skipped)
skip_dirs = ["node_modules", "__pycache__", "tests", "docs"]

[report]
# Written to the scan root, replacing any previous report
file_name = "REPORT.md"
# title = "Security Audit Report"
# List HIGH issues first instead of discovery order
sort_by_severity = false
"#
    .to_string()
}
