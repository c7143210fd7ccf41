use crate::config::Config;
use crate::model::{Issue, ProjectReport, RunMode, RunReport, sort_by_severity};
use crate::output::{OutputFormatter, table_cell};
use std::io::Write;

pub struct MarkdownReport {
    pub title: String,
    /// Issue rows shown per project.
    pub rows: usize,
    pub sort_by_severity: bool,
}

impl MarkdownReport {
    pub fn new(title: impl Into<String>, rows: usize) -> Self {
        Self {
            title: title.into(),
            rows,
            sort_by_severity: false,
        }
    }

    /// Title and row limit for the given mode, as configured.
    pub fn for_mode(config: &Config, mode: RunMode) -> Self {
        let (default_title, rows) = match mode {
            RunMode::Audit => ("Security Audit Report", config.limits.audit_report_rows),
            RunMode::Fix => (
                "Security Audit & Auto-Fix Report",
                config.limits.fix_report_rows,
            ),
        };
        let title = config
            .report
            .title
            .clone()
            .unwrap_or_else(|| default_title.to_string());

        Self {
            title,
            rows,
            sort_by_severity: config.report.sort_by_severity,
        }
    }

    fn top_issues(&self, issues: &[Issue]) -> Vec<Issue> {
        let mut top = issues.to_vec();
        if self.sort_by_severity {
            sort_by_severity(&mut top);
        }
        top.truncate(self.rows);
        top
    }

    fn write_project<W: Write>(&self, project: &ProjectReport, writer: &mut W) -> std::io::Result<()> {
        let issues = &project.outcome.issues;

        writeln!(writer, "### {}\n", project.name)?;
        writeln!(
            writer,
            "- **Path:** `{}`",
            table_cell(&project.path.display().to_string())
        )?;
        writeln!(writer, "- **Issues identified:** {}", issues.len())?;
        writeln!(writer, "- **Fixes applied:** {}", project.outcome.fixes_applied)?;

        if let Some(ref tree) = project.tree {
            let stats = tree.stats();
            writeln!(
                writer,
                "- **Files indexed:** {} in {} folder(s)",
                stats.files, stats.folders
            )?;
            writeln!(
                writer,
                "- **Symbols indexed:** {} ({} classes, {} functions, {} arrow functions)",
                stats.symbols(),
                stats.classes,
                stats.functions,
                stats.arrow_functions
            )?;
        }
        writeln!(writer)?;

        if issues.is_empty() {
            writeln!(writer, "No security patterns detected in scanned files.\n")?;
        } else {
            writeln!(writer, "| Severity | File | Message |")?;
            writeln!(writer, "|----------|------|---------|")?;
            for issue in self.top_issues(issues) {
                writeln!(
                    writer,
                    "| {} | `{}:{}` | {} |",
                    issue.severity,
                    table_cell(&issue.file.display().to_string()),
                    issue.line,
                    table_cell(&issue.message)
                )?;
            }
            if issues.len() > self.rows {
                writeln!(
                    writer,
                    "\n_Showing {} of {} issues._",
                    self.rows.min(issues.len()),
                    issues.len()
                )?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "---\n")?;
        Ok(())
    }
}

impl OutputFormatter for MarkdownReport {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# {}\n", self.title)?;

        writeln!(writer, "## Executive summary\n")?;
        writeln!(writer, "- **Projects audited:** {}", report.projects.len())?;
        writeln!(writer, "- **Total issues:** {}", report.total_issues())?;
        writeln!(writer, "- **Total fixes applied:** {}\n", report.total_fixes())?;

        if report.projects.is_empty() {
            writeln!(writer, "No projects found under the scan root.")?;
            return Ok(());
        }

        writeln!(writer, "## Projects\n")?;
        for project in &report.projects {
            self.write_project(project, writer)?;
        }

        if report.mode == RunMode::Fix {
            writeln!(
                writer,
                "**Note:** only the safe rewrites (`shell=True` to `shell=False`, `innerHTML` to \
                 `textContent`) were applied automatically. Every other finding above is left \
                 for manual review.\n"
            )?;
        }

        let diagnostics: Vec<_> = report.diagnostics().collect();
        if !diagnostics.is_empty() {
            writeln!(writer, "## Diagnostics\n")?;
            writeln!(writer, "Files left out of the scan or not fixed:\n")?;
            writeln!(writer, "| Project | File | Reason |")?;
            writeln!(writer, "|---------|------|--------|")?;
            for skipped in diagnostics {
                writeln!(
                    writer,
                    "| {} | `{}` | {} |",
                    table_cell(&skipped.project),
                    table_cell(&skipped.path.display().to_string()),
                    table_cell(&skipped.reason.to_string())
                )?;
            }
        }

        Ok(())
    }
}
