use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::{Issue, ScanError, SkippedFile};
use crate::rules::{Evaluation, RuleEngine};
use ignore::WalkBuilder;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Files of one project eligible for rule evaluation, in walk order.
///
/// The walk has no depth limit but prunes hidden and denylisted entries and
/// visits siblings sorted by name. At most `max_files_per_extension` files are
/// kept for each extension; the rest are silently left out. Entries the walk
/// cannot read are returned as skipped.
pub fn discover_files(
    project_root: &Path,
    project: &str,
    config: &Config,
    engine: &RuleEngine,
) -> (Vec<PathBuf>, Vec<SkippedFile>) {
    let skip_dirs = config.scan.skip_dirs.clone();
    let walker = WalkBuilder::new(project_root)
        .standard_filters(false)
        .hidden(true)
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            !skip_dirs.iter().any(|d| name == d.as_str())
        })
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let cap = config.limits.max_files_per_extension;
    let mut per_extension: HashMap<String, usize> = HashMap::new();
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = error_path(&e).unwrap_or(project_root).to_path_buf();
                let message = e.to_string();
                let reason = ScanError::Access(
                    e.into_io_error()
                        .unwrap_or_else(|| io::Error::other(message)),
                );
                warn!("Skipping {}: {}", path.display(), reason);
                skipped.push(SkippedFile {
                    project: project.to_string(),
                    path: relative_to(&path, project_root),
                    reason,
                });
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !config.scan.is_allowed(path) || !engine.handles(path) {
            continue;
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let seen = per_extension.entry(ext).or_default();
        if *seen >= cap {
            debug!("File cap reached, not scanning {}", path.display());
            continue;
        }
        *seen += 1;
        files.push(path.to_path_buf());
    }

    (files, skipped)
}

/// Path of the entry an `ignore` walk error refers to, if it names one.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// Scan one project without modifying anything.
pub fn scan_project(
    fs: &dyn FileSystem,
    project_root: &Path,
    project: &str,
    config: &Config,
    engine: &RuleEngine,
) -> (Vec<Issue>, Vec<SkippedFile>) {
    let mut issues = Vec::new();
    let (files, mut skipped) = discover_files(project_root, project, config, engine);

    for path in files {
        let relative = relative_to(&path, project_root);

        let content = match fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                let reason = ScanError::from_read(e);
                warn!("Skipping {}: {}", path.display(), reason);
                skipped.push(SkippedFile {
                    project: project.to_string(),
                    path: relative,
                    reason,
                });
                continue;
            }
        };

        debug!("Scanning {}", path.display());
        if let Some(eval) = engine.evaluate(&path, &content, false) {
            issues.extend(issues_from(&eval, &relative, project));
        }
    }

    (issues, skipped)
}

/// Convert rule matches into issues, keeping line order.
pub fn issues_from(eval: &Evaluation<'_>, relative: &Path, project: &str) -> Vec<Issue> {
    eval.matches
        .iter()
        .map(|m| Issue {
            rule_id: m.rule.id,
            severity: m.rule.severity,
            file: relative.to_path_buf(),
            line: m.line,
            message: m.rule.message.to_string(),
            project: project.to_string(),
        })
        .collect()
}

pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::default_fs;
    use crate::model::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scan(root: &Path, config: &Config) -> (Vec<Issue>, Vec<SkippedFile>) {
        scan_project(default_fs(), root, "demo", config, &RuleEngine::new())
    }

    #[test]
    fn test_discovery_order_and_filters() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "b.py", "");
        write(root, "a/z.js", "");
        write(root, "a/deep/er/still/ok.ts", "");
        write(root, "notes.md", "eval(x)");
        write(root, ".hidden/x.py", "");
        write(root, "node_modules/lib/index.js", "");
        write(root, "src/tests/test_x.py", "");

        let (files, skipped) = discover_files(root, "demo", &Config::default(), &RuleEngine::new());
        assert!(skipped.is_empty());
        let rel: Vec<_> = files.iter().map(|p| relative_to(p, root)).collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/deep/er/still/ok.ts"),
                PathBuf::from("a/z.js"),
                PathBuf::from("b.py"),
            ]
        );
    }

    #[test]
    fn test_cap_per_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for i in 0..5 {
            write(root, &format!("m{}.py", i), "eval(x)\n");
        }
        write(root, "z.js", "eval(x)\n");

        let mut config = Config::default();
        config.limits.max_files_per_extension = 2;
        let (issues, _) = scan(root, &config);

        let files: Vec<_> = issues.iter().map(|i| i.file.to_string_lossy().to_string()).collect();
        assert_eq!(files, vec!["m0.py", "m1.py", "z.js"]);
    }

    #[test]
    fn test_pickle_line_yields_one_high_issue() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "svc/load.py", "import pickle\n\nobj = pickle.loads(raw)\n");

        let (issues, skipped) = scan(dir.path(), &Config::default());
        assert!(skipped.is_empty());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].message, "Insecure pickle.loads()");
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].file, PathBuf::from("svc/load.py"));
        assert_eq!(issues[0].project, "demo");
    }

    #[test]
    fn test_yaml_rule_disabled_by_safe_loader_anywhere_in_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "unsafe.py", "cfg = yaml.load(f)\n");
        write(
            dir.path(),
            "safe.py",
            "from yaml import SafeLoader\ncfg = yaml.load(f, Loader=SafeLoader)\n",
        );

        let (issues, _) = scan(dir.path(), &Config::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, PathBuf::from("unsafe.py"));
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_undecodable_file_is_skipped_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "eval(x)\n");
        fs::write(dir.path().join("b.py"), [0xff, 0xfe, 0x00, 0x65]).unwrap();
        write(dir.path(), "c.py", "eval(y)\n");

        let (issues, skipped) = scan(dir.path(), &Config::default());
        assert_eq!(issues.len(), 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, PathBuf::from("b.py"));
        assert!(matches!(skipped[0].reason, ScanError::Decode));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "x/a.js", "el.innerHTML = a;\neval(b);\n");
        write(dir.path(), "y.py", "eval(c)\nsubprocess.call(d, shell=True)\n");

        let (first, _) = scan(dir.path(), &Config::default());
        let (second, _) = scan(dir.path(), &Config::default());
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_folder_is_recorded_as_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "sub/a.py", "eval(x)\n");
        write(root, "z.py", "eval(y)\n");
        let sub = root.join("sub");
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read anyway; nothing to observe then.
        if fs::read_dir(&sub).is_ok() {
            fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (issues, skipped) = scan(root, &Config::default());
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, PathBuf::from("z.py"));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, PathBuf::from("sub"));
        assert_eq!(skipped[0].project, "demo");
        assert!(matches!(skipped[0].reason, ScanError::Access(_)));
    }
}
