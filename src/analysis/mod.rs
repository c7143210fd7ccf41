mod fix;
mod registry;
mod scanner;
mod tree;

pub use fix::fix_project;
pub use registry::{Project, discover_projects};
pub use scanner::{discover_files, scan_project};
pub use tree::build_tree;

use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::{FixOutcome, ProjectReport, RunMode, RunReport};
use crate::parser::ParserRegistry;
use crate::rules::RuleEngine;
use log::info;
use std::path::Path;

/// Run the whole pipeline over every project under `root`.
///
/// Audit mode builds each project's tree and scans it; fix mode scans and
/// rewrites. Projects are processed one after another in name order.
pub fn analyze(root: &Path, config: &Config, mode: RunMode, fs: &dyn FileSystem) -> RunReport {
    let engine = RuleEngine::new();
    let parsers = ParserRegistry::new();

    let projects = discover_projects(fs, root, config)
        .into_iter()
        .map(|project| analyze_project(&project, config, mode, fs, &engine, &parsers))
        .collect();

    RunReport {
        root: root.to_path_buf(),
        mode,
        projects,
    }
}

fn analyze_project(
    project: &Project,
    config: &Config,
    mode: RunMode,
    fs: &dyn FileSystem,
    engine: &RuleEngine,
    parsers: &ParserRegistry,
) -> ProjectReport {
    info!("Processing project {}", project.name);

    let (tree, outcome, skipped) = match mode {
        RunMode::Audit => {
            let tree = build_tree(fs, &project.path, config, Some(parsers));
            let (issues, skipped) = scan_project(fs, &project.path, &project.name, config, engine);
            let outcome = FixOutcome {
                issues,
                fixes_applied: 0,
            };
            (Some(tree), outcome, skipped)
        }
        RunMode::Fix => {
            let (outcome, skipped) = fix_project(fs, &project.path, &project.name, config, engine);
            (None, outcome, skipped)
        }
    };

    info!(
        "{}: {} issue(s), {} fix(es), {} skipped file(s)",
        project.name,
        outcome.issues.len(),
        outcome.fixes_applied,
        skipped.len()
    );

    ProjectReport {
        name: project.name.clone(),
        path: project.path.clone(),
        tree,
        outcome,
        skipped,
    }
}
