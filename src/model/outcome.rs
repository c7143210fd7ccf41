use super::issue::Issue;
use super::node::ProjectNode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single file was left out of a scan or a fix.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("content is not valid UTF-8 text")]
    Decode,
    #[error("cannot read file: {0}")]
    Access(#[source] io::Error),
    #[error("cannot write fixed file: {0}")]
    Write(#[source] io::Error),
}

impl ScanError {
    /// Classify a read failure: undecodable content is distinct from an inaccessible file.
    pub fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::InvalidData {
            ScanError::Decode
        } else {
            ScanError::Access(err)
        }
    }
}

#[derive(Debug)]
pub struct SkippedFile {
    pub project: String,
    /// Path relative to the project root.
    pub path: PathBuf,
    pub reason: ScanError,
}

/// Issues found and fixes applied for one project.
#[derive(Debug, Default)]
pub struct FixOutcome {
    pub issues: Vec<Issue>,
    pub fixes_applied: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Build trees and scan; never touches the scanned files.
    Audit,
    /// Scan and rewrite the safe subset of matches in place.
    Fix,
}

#[derive(Debug)]
pub struct ProjectReport {
    pub name: String,
    pub path: PathBuf,
    /// Structural tree; only built in audit mode.
    pub tree: Option<ProjectNode>,
    pub outcome: FixOutcome,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug)]
pub struct RunReport {
    pub root: PathBuf,
    pub mode: RunMode,
    pub projects: Vec<ProjectReport>,
}

impl RunReport {
    pub fn total_issues(&self) -> usize {
        self.projects.iter().map(|p| p.outcome.issues.len()).sum()
    }

    pub fn total_fixes(&self) -> usize {
        self.projects.iter().map(|p| p.outcome.fixes_applied).sum()
    }

    /// Every skipped file across all projects, in project order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &SkippedFile> {
        self.projects.iter().flat_map(|p| p.skipped.iter())
    }

    pub fn project(&self, name: &str) -> Option<&ProjectReport> {
        self.projects.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_errors_are_classified() {
        let decode = ScanError::from_read(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"));
        assert!(matches!(decode, ScanError::Decode));

        let access = ScanError::from_read(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(access, ScanError::Access(_)));
        assert!(access.to_string().contains("denied"));
    }
}
