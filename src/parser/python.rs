use crate::model::{SymbolKind, SymbolRecord};
use crate::parser::LanguageParser;
use crate::parser::common::capture_symbol;
use crate::symbol_regex;
use std::path::Path;

// Only top-level declarations: the keyword must start the line.
symbol_regex!(CLASS_RE, r"^class\s+(\w+)");
symbol_regex!(DEF_RE, r"^def\s+(\w+)");

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonParser {
    fn extensions(&self) -> &[&str] {
        &["py"]
    }

    fn extract_symbols(&self, path: &Path, lines: &[&str]) -> Vec<SymbolRecord> {
        let mut symbols = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if let Some(class) = capture_symbol(&CLASS_RE, 1, SymbolKind::Class, path, line, index) {
                symbols.push(class);
            }
            if let Some(func) = capture_symbol(&DEF_RE, 1, SymbolKind::Function, path, line, index) {
                symbols.push(func);
            }
        }

        symbols
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}
