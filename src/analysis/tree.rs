use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::{ProjectNode, SymbolRecord};
use crate::parser::ParserRegistry;
use log::debug;
use std::path::Path;

/// Build the pruned structural tree of one project.
///
/// Folders deeper than `limits.max_tree_depth` are not entered, and a folder
/// only appears when something below it survives the filters. With a parser
/// registry, file nodes carry their symbols as children. Listing or read
/// failures are treated as empty content.
pub fn build_tree(
    fs: &dyn FileSystem,
    project_root: &Path,
    config: &Config,
    parsers: Option<&ParserRegistry>,
) -> ProjectNode {
    let name = project_root
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("project")
        .to_string();

    let walker = TreeWalker {
        fs,
        project_root,
        config,
        parsers,
    };
    ProjectNode::project(name, walker.explore(project_root, 0))
}

struct TreeWalker<'a> {
    fs: &'a dyn FileSystem,
    project_root: &'a Path,
    config: &'a Config,
    parsers: Option<&'a ParserRegistry>,
}

impl TreeWalker<'_> {
    fn explore(&self, dir: &Path, depth: usize) -> Vec<ProjectNode> {
        if depth > self.config.limits.max_tree_depth {
            return Vec::new();
        }

        let entries = match self.fs.list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Treating {} as empty: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut nodes = Vec::new();
        for entry in entries {
            if self.config.scan.is_skipped(&entry.name) {
                continue;
            }

            if entry.is_dir {
                let children = self.explore(&entry.path, depth + 1);
                if !children.is_empty() {
                    nodes.push(ProjectNode::folder(entry.name, children));
                }
            } else if self.config.scan.is_allowed(&entry.path) {
                let symbols = self.symbols_for(&entry.path);
                nodes.push(ProjectNode::file(entry.name, symbols));
            }
        }
        nodes
    }

    fn symbols_for(&self, path: &Path) -> Vec<SymbolRecord> {
        let Some(parsers) = self.parsers else {
            return Vec::new();
        };

        match self.fs.read_to_string(path) {
            Ok(source) => {
                let relative = path.strip_prefix(self.project_root).unwrap_or(path);
                parsers.extract(relative, &source)
            }
            Err(e) => {
                debug!("No symbols for {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
