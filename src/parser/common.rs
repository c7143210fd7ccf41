use crate::model::{SymbolKind, SymbolRecord};
use regex::Regex;
use std::path::Path;

/// Build a record from the given capture group when `re` matches `line`.
/// `index` is the 0-based line index; records carry 1-based lines.
pub fn capture_symbol(
    re: &Regex,
    group: usize,
    kind: SymbolKind,
    path: &Path,
    line: &str,
    index: usize,
) -> Option<SymbolRecord> {
    let name = re.captures(line)?.get(group)?.as_str();
    Some(SymbolRecord {
        name: name.to_string(),
        kind,
        path: path.to_path_buf(),
        line: index + 1,
    })
}

/// Compile one of the built-in heuristic patterns.
#[macro_export]
macro_rules! symbol_regex {
    ($name:ident, $pattern:expr) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
            regex::Regex::new($pattern)
                .expect(concat!("invalid ", stringify!($name), " pattern"))
        });
    };
}
