use super::symbol::{SymbolKind, SymbolRecord};

/// One entry of the pruned structural tree of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<ProjectNode>,
    /// Source line, only set for symbol nodes.
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Project,
    Folder,
    File,
    Symbol(SymbolKind),
}

/// Counts gathered from a tree for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
    pub classes: usize,
    pub functions: usize,
    pub arrow_functions: usize,
}

impl TreeStats {
    pub fn symbols(&self) -> usize {
        self.classes + self.functions + self.arrow_functions
    }
}

impl ProjectNode {
    pub fn project(name: impl Into<String>, children: Vec<ProjectNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Project,
            children,
            line: None,
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<ProjectNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            children,
            line: None,
        }
    }

    pub fn file(name: impl Into<String>, symbols: Vec<SymbolRecord>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: symbols.into_iter().map(ProjectNode::symbol).collect(),
            line: None,
        }
    }

    pub fn symbol(record: SymbolRecord) -> Self {
        Self {
            name: record.name,
            kind: NodeKind::Symbol(record.kind),
            children: Vec::new(),
            line: Some(record.line),
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&ProjectNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Nesting depth of folders and files below this node; symbols are not counted.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .filter(|c| !matches!(c.kind, NodeKind::Symbol(_)))
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.collect_stats(&mut stats);
        stats
    }

    fn collect_stats(&self, stats: &mut TreeStats) {
        match self.kind {
            NodeKind::Project => {}
            NodeKind::Folder => stats.folders += 1,
            NodeKind::File => stats.files += 1,
            NodeKind::Symbol(SymbolKind::Class) => stats.classes += 1,
            NodeKind::Symbol(SymbolKind::Function) => stats.functions += 1,
            NodeKind::Symbol(SymbolKind::ArrowFunction) => stats.arrow_functions += 1,
        }
        for child in &self.children {
            child.collect_stats(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str, kind: SymbolKind, line: usize) -> SymbolRecord {
        SymbolRecord {
            name: name.to_string(),
            kind,
            path: PathBuf::from("app.py"),
            line,
        }
    }

    #[test]
    fn test_stats_and_depth() {
        let tree = ProjectNode::project(
            "demo",
            vec![
                ProjectNode::folder(
                    "src",
                    vec![ProjectNode::file(
                        "app.py",
                        vec![
                            record("App", SymbolKind::Class, 1),
                            record("main", SymbolKind::Function, 5),
                        ],
                    )],
                ),
                ProjectNode::file("index.js", vec![record("go", SymbolKind::ArrowFunction, 2)]),
            ],
        );

        let stats = tree.stats();
        assert_eq!(stats.folders, 1);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.symbols(), 3);
        assert_eq!(tree.depth(), 2);

        let app = tree.child("src").and_then(|s| s.child("app.py")).unwrap();
        assert_eq!(app.children[1].line, Some(5));
    }
}
