use crate::model::{SymbolKind, SymbolRecord};
use crate::parser::LanguageParser;
use crate::parser::common::capture_symbol;
use crate::symbol_regex;
use std::path::Path;

// Unlike Python, these match anywhere on the line: exports, nested and inline
// declarations all count.
symbol_regex!(FUNCTION_RE, r"\bfunction\s+(\w+)");
symbol_regex!(ARROW_RE, r"\b(const|let|var)\s+(\w+)\s*=\s*(async\s*)?\(");
symbol_regex!(CLASS_RE, r"\bclass\s+(\w+)");

/// Web-scripting family: JavaScript and TypeScript sources.
pub struct TypeScriptParser;

impl TypeScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for TypeScriptParser {
    fn extensions(&self) -> &[&str] {
        &["ts", "tsx", "js", "jsx", "mjs", "cjs"]
    }

    fn extract_symbols(&self, path: &Path, lines: &[&str]) -> Vec<SymbolRecord> {
        let mut symbols = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let found = [
                capture_symbol(&FUNCTION_RE, 1, SymbolKind::Function, path, line, index),
                capture_symbol(&ARROW_RE, 2, SymbolKind::ArrowFunction, path, line, index),
                capture_symbol(&CLASS_RE, 1, SymbolKind::Class, path, line, index),
            ];
            symbols.extend(found.into_iter().flatten());
        }

        symbols
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}
