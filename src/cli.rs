use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "auditfix")]
#[command(about = "Audit multi-project source trees for insecure patterns and apply safe fixes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Index every project and report insecure patterns without changing files
    Audit(RunArgs),

    /// Report insecure patterns and rewrite the ones with a safe fix
    Fix(RunArgs),

    /// Generate a starter .auditfix.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Scan root; each immediate subdirectory is a project (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Render the written report to the terminal
    #[arg(long)]
    pub print: bool,

    /// Files scanned per extension per project
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Issue rows shown per project in the report
    #[arg(long)]
    pub rows: Option<usize>,

    /// Order report rows by severity, highest first
    #[arg(long)]
    pub sort_severity: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            print: false,
            max_files: None,
            rows: None,
            sort_severity: false,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .auditfix.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}
