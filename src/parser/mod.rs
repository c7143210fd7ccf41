//! Line-based symbol heuristics.
//!
//! These recognisers look at one line at a time. Multi-line signatures are
//! invisible to them and declarations inside comments or strings are reported
//! like real ones.

mod common;
mod python;
mod typescript;

use crate::model::SymbolRecord;
use std::path::Path;

pub use python::PythonParser;
pub use typescript::TypeScriptParser;

pub trait LanguageParser: Send + Sync {
    fn extensions(&self) -> &[&str];
    fn extract_symbols(&self, path: &Path, lines: &[&str]) -> Vec<SymbolRecord>;
}

pub struct ParserRegistry {
    parsers: Vec<Box<dyn LanguageParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(PythonParser::new()), Box::new(TypeScriptParser::new())],
        }
    }

    pub fn find_parser(&self, path: &Path) -> Option<&dyn LanguageParser> {
        let ext = path.extension()?.to_str()?;
        self.parsers
            .iter()
            .find(|p| p.extensions().contains(&ext))
            .map(|p| p.as_ref())
    }

    /// Extract symbols from file content, or nothing when no parser handles the extension.
    pub fn extract(&self, path: &Path, source: &str) -> Vec<SymbolRecord> {
        match self.find_parser(path) {
            Some(parser) => {
                let lines: Vec<&str> = source.lines().collect();
                parser.extract_symbols(path, &lines)
            }
            None => Vec::new(),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
