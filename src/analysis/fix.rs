use crate::analysis::scanner::{discover_files, issues_from, relative_to};
use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::{FixOutcome, ScanError, SkippedFile};
use crate::rules::RuleEngine;
use log::{debug, warn};
use std::path::Path;

/// Scan one project and rewrite the safe subset of matches in place.
///
/// Every match is reported, fixable or not. Each file's edits are staged in
/// full before anything is written, and the new content replaces the file
/// atomically. Files that fail to write keep their issues but contribute no
/// fixes.
pub fn fix_project(
    fs: &dyn FileSystem,
    project_root: &Path,
    project: &str,
    config: &Config,
    engine: &RuleEngine,
) -> (FixOutcome, Vec<SkippedFile>) {
    let mut outcome = FixOutcome::default();
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

        let Some(eval) = engine.evaluate(&path, &content, true) else {
            continue;
        };
        outcome.issues.extend(issues_from(&eval, &relative, project));

        let Some(rewritten) = eval.rewritten else {
            continue;
        };

        match fs.write_atomic(&path, &rewritten) {
            Ok(()) => {
                debug!("Applied {} fix(es) to {}", eval.fixes, path.display());
                outcome.fixes_applied += eval.fixes;
            }
            Err(e) => {
                let reason = ScanError::Write(e);
                warn!("Not fixing {}: {}", path.display(), reason);
                skipped.push(SkippedFile {
                    project: project.to_string(),
                    path: relative,
                    reason,
                });
            }
        }
    }

    (outcome, skipped)
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

    fn fix(root: &Path) -> (FixOutcome, Vec<SkippedFile>) {
        fix_project(default_fs(), root, "demo", &Config::default(), &RuleEngine::new())
    }

    #[test]
    fn test_fixes_safe_matches_and_reports_everything() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let original = "import pickle, subprocess\nsubprocess.run(cmd, shell=True)\nobj = pickle.loads(raw)\n";
        write(root, "job.py", original);

        let (outcome, skipped) = fix(root);
        assert!(skipped.is_empty());
        assert_eq!(outcome.fixes_applied, 1);

        let severities: Vec<_> = outcome.issues.iter().map(|i| (i.line, i.severity)).collect();
        assert_eq!(severities, vec![(2, Severity::High), (3, Severity::High)]);

        let fixed = fs::read_to_string(root.join("job.py")).unwrap();
        assert_eq!(
            fixed,
            "import pickle, subprocess\nsubprocess.run(cmd, shell=False)\nobj = pickle.loads(raw)\n"
        );
        assert_eq!(fixed.lines().count(), original.lines().count());
    }

    #[test]
    fn test_unfixable_only_files_are_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "calc.js", "const v = eval(input)");
        let before = fs::metadata(root.join("calc.js")).unwrap().modified().unwrap();

        let (outcome, _) = fix(root);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.fixes_applied, 0);
        assert_eq!(fs::read_to_string(root.join("calc.js")).unwrap(), "const v = eval(input)");
        assert_eq!(fs::metadata(root.join("calc.js")).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_second_run_applies_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "ui/view.js", "box.innerHTML = html;\n");
        write(root, "run.py", "subprocess.Popen(c, shell = True)\n");

        let (first, _) = fix(root);
        assert_eq!(first.fixes_applied, 2);

        let (second, _) = fix(root);
        assert_eq!(second.fixes_applied, 0);
        assert!(second.issues.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_keeps_issues_and_records_skip() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "locked/app.py", "run(c, shell=True)\n");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users can write anyway; nothing to observe then.
        if fs::write(locked.join(".write-check"), "").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (outcome, skipped) = fix(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.fixes_applied, 0);
        assert_eq!(skipped.len(), 1);
        assert!(matches!(skipped[0].reason, ScanError::Write(_)));
        assert_eq!(
            fs::read_to_string(locked.join("app.py")).unwrap(),
            "run(c, shell=True)\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_file_is_not_rewritten() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "locked.py", "run(c, shell=True)\n");
        write(root, "open.py", "run(c, shell=True)\n");
        fs::set_permissions(root.join("locked.py"), fs::Permissions::from_mode(0o444)).unwrap();

        let (outcome, skipped) = fix(root);

        assert_eq!(outcome.issues.len(), 2);
        assert_eq!(outcome.fixes_applied, 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, Path::new("locked.py"));
        assert!(matches!(skipped[0].reason, ScanError::Write(_)));
        assert_eq!(
            fs::read_to_string(root.join("locked.py")).unwrap(),
            "run(c, shell=True)\n"
        );
        let mode = fs::metadata(root.join("locked.py")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
        assert_eq!(
            fs::read_to_string(root.join("open.py")).unwrap(),
            "run(c, shell=False)\n"
        );
    }
}
