use crate::config::Config;
use crate::fs::FileSystem;
use log::warn;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
}

/// Immediate subdirectories of `root`, sorted by name. Hidden and denylisted
/// directories are not projects; plain files (the report included) are ignored.
pub fn discover_projects(fs: &dyn FileSystem, root: &Path, config: &Config) -> Vec<Project> {
    let entries = match fs.list_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list scan root {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter(|e| e.is_dir && !config.scan.is_skipped(&e.name))
        .map(|e| Project {
            name: e.name,
            path: e.path,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_discovers_subdirectories_only() {
        let fs = MockFs::with_files([
            ("/scan/REPORT.md", "old report"),
            ("/scan/beta/main.py", ""),
            ("/scan/alpha/index.js", ""),
            ("/scan/.git/HEAD", ""),
            ("/scan/node_modules/x/index.js", ""),
        ]);

        let projects = discover_projects(&fs, Path::new("/scan"), &Config::default());
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(projects[0].path, PathBuf::from("/scan/alpha"));
    }

    #[test]
    fn test_unlistable_root_yields_nothing() {
        let fs = MockFs::new();
        assert!(discover_projects(&fs, Path::new("/missing"), &Config::default()).is_empty());
    }
}
