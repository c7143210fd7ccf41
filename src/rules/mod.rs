//! Declarative security rules shared by scanning and fixing.
//!
//! A rule is a compiled line matcher with a severity and a message. Rules
//! carrying a replacement template are safe to rewrite automatically; every
//! other match is reported for human review only. Rules never depend on each
//! other's matches.

mod python;
mod web;

use crate::model::Severity;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub pattern: Regex,
    /// The rule is inactive for a file containing any of these markers.
    pub unless_file_contains: &'static [&'static str],
    /// Replacement template for `pattern` (`$1`-style groups). `Some` marks the rule fixable.
    pub replacement: Option<&'static str>,
}

impl Rule {
    pub fn is_fixable(&self) -> bool {
        self.replacement.is_some()
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Whether the file-level preconditions hold for this content.
    pub fn applies_to(&self, content: &str) -> bool {
        !self
            .unless_file_contains
            .iter()
            .any(|marker| content.contains(marker))
    }

    /// Rewrite `line`, returning `None` when the rule is not fixable or nothing changed.
    pub fn rewrite(&self, line: &str) -> Option<String> {
        let template = self.replacement?;
        let rewritten = self.pattern.replace_all(line, template);
        if rewritten == line {
            None
        } else {
            Some(rewritten.into_owned())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Python sources.
    Scripting,
    /// JavaScript and TypeScript sources.
    Web,
}

pub struct RuleSet {
    pub family: Family,
    pub extensions: &'static [&'static str],
    pub rules: Vec<Rule>,
}

/// One rule matching one line.
#[derive(Clone, Copy)]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    /// 1-indexed line number in the evaluated content.
    pub line: usize,
}

/// Result of evaluating one file against its rule set.
pub struct Evaluation<'a> {
    pub matches: Vec<RuleMatch<'a>>,
    /// New file content, present only when at least one line changed.
    pub rewritten: Option<String>,
    /// Number of fixable rule applications that changed a line.
    pub fixes: usize,
}

static BUILTIN_RULE_SETS: LazyLock<Vec<RuleSet>> =
    LazyLock::new(|| vec![python::rule_set(), web::rule_set()]);

pub struct RuleEngine {
    sets: &'static [RuleSet],
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            sets: &BUILTIN_RULE_SETS,
        }
    }

    pub fn rule_set_for(&self, path: &Path) -> Option<&RuleSet> {
        let ext = path.extension()?.to_str()?;
        self.sets.iter().find(|s| s.extensions.contains(&ext))
    }

    pub fn handles(&self, path: &Path) -> bool {
        self.rule_set_for(path).is_some()
    }

    /// Evaluate every line of `content` against the rule set for `path`.
    ///
    /// With `apply_fixes`, fixable matches are rewritten line by line; each line
    /// keeps its terminator so the output has exactly as many lines as the input.
    /// Returns `None` when no rule set covers the file's extension.
    pub fn evaluate(&self, path: &Path, content: &str, apply_fixes: bool) -> Option<Evaluation<'_>> {
        let set = self.rule_set_for(path)?;
        let active: Vec<&Rule> = set.rules.iter().filter(|r| r.applies_to(content)).collect();

        let mut matches = Vec::new();
        let mut output = String::with_capacity(content.len());
        let mut fixes = 0;

        for (index, segment) in content.split_inclusive('\n').enumerate() {
            let (body, terminator) = split_terminator(segment);
            let mut current: Option<String> = None;

            for rule in active.iter().copied().filter(|r| r.is_match(body)) {
                matches.push(RuleMatch {
                    rule,
                    line: index + 1,
                });

                if apply_fixes {
                    let base = current.as_deref().unwrap_or(body);
                    if let Some(rewritten) = rule.rewrite(base) {
                        current = Some(rewritten);
                        fixes += 1;
                    }
                }
            }

            if apply_fixes {
                output.push_str(current.as_deref().unwrap_or(body));
                output.push_str(terminator);
            }
        }

        Some(Evaluation {
            matches,
            rewritten: (fixes > 0).then_some(output),
            fixes,
        })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn split_terminator(segment: &str) -> (&str, &str) {
    if let Some(body) = segment.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = segment.strip_suffix('\n') {
        (body, "\n")
    } else {
        (segment, "")
    }
}
