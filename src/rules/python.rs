use crate::model::Severity;
use crate::rules::{Family, Rule, RuleSet};
use regex::Regex;

pub fn rule_set() -> RuleSet {
    RuleSet {
        family: Family::Scripting,
        extensions: &["py"],
        rules: vec![py_eval(), py_pickle(), py_yaml(), py_shell()],
    }
}

fn py_eval() -> Rule {
    Rule {
        id: "PY-EVAL",
        severity: Severity::Medium,
        message: "eval() usage",
        // `\b` keeps ast.literal_eval( out.
        pattern: Regex::new(r"\beval\s*\(").expect("PY-EVAL: invalid regex"),
        unless_file_contains: &[],
        replacement: None,
    }
}

fn py_pickle() -> Rule {
    Rule {
        id: "PY-PICKLE",
        severity: Severity::High,
        message: "Insecure pickle.loads()",
        pattern: Regex::new(r"\bpickle\.loads\s*\(").expect("PY-PICKLE: invalid regex"),
        unless_file_contains: &[],
        replacement: None,
    }
}

fn py_yaml() -> Rule {
    Rule {
        id: "PY-YAML",
        severity: Severity::Medium,
        message: "Insecure yaml.load()",
        pattern: Regex::new(r"\byaml\.load\s*\(").expect("PY-YAML: invalid regex"),
        unless_file_contains: &["SafeLoader", "FullLoader"],
        replacement: None,
    }
}

fn py_shell() -> Rule {
    Rule {
        id: "PY-SHELL",
        severity: Severity::High,
        message: "Shell injection risk via shell=True",
        pattern: Regex::new(r"\bshell(\s*)=(\s*)True\b").expect("PY-SHELL: invalid regex"),
        unless_file_contains: &[],
        replacement: Some("shell${1}=${2}False"),
    }
}
