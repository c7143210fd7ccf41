mod issue;
mod node;
mod outcome;
mod symbol;

pub use issue::{Issue, Severity, sort_by_severity};
pub use node::{NodeKind, ProjectNode, TreeStats};
pub use outcome::{FixOutcome, ProjectReport, RunMode, RunReport, ScanError, SkippedFile};
pub use symbol::{SymbolKind, SymbolRecord};
