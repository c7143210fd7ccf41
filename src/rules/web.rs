use crate::model::Severity;
use crate::rules::{Family, Rule, RuleSet};
use regex::Regex;

pub fn rule_set() -> RuleSet {
    RuleSet {
        family: Family::Web,
        extensions: &["js", "jsx", "ts", "tsx", "mjs", "cjs"],
        rules: vec![js_eval(), js_inner_html()],
    }
}

fn js_eval() -> Rule {
    Rule {
        id: "JS-EVAL",
        severity: Severity::Medium,
        message: "eval() usage",
        pattern: Regex::new(r"\beval\s*\(").expect("JS-EVAL: invalid regex"),
        unless_file_contains: &[],
        replacement: None,
    }
}

fn js_inner_html() -> Rule {
    Rule {
        id: "JS-INNERHTML",
        severity: Severity::Low,
        message: "Potential XSS via innerHTML",
        // Plain assignment only: `==`, `===` and `+=` do not match.
        pattern: Regex::new(r"\.innerHTML(\s*)=([^=]|$)").expect("JS-INNERHTML: invalid regex"),
        unless_file_contains: &[],
        replacement: Some(".textContent${1}=${2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_call() {
        let rule = js_eval();
        assert!(rule.is_match("const fn = eval('(' + src + ')');"));
        assert!(rule.is_match("window.eval(code)"));
        assert!(!rule.is_match("const evaluated = compute();"));
    }

    #[test]
    fn test_inner_html_assignment() {
        let rule = js_inner_html();
        assert!(rule.is_match("el.innerHTML = html;"));
        assert!(rule.is_match("el.innerHTML=html;"));
        assert!(rule.is_match("el.innerHTML ="));
        assert!(!rule.is_match("if (el.innerHTML === '') {}"));
        assert!(!rule.is_match("el.innerHTML += row;"));
        assert!(!rule.is_match("const html = el.innerHTML;"));
    }

    #[test]
    fn test_inner_html_rewrite() {
        let rule = js_inner_html();
        assert_eq!(
            rule.rewrite("  list.innerHTML = items.join('');").as_deref(),
            Some("  list.textContent = items.join('');")
        );
        assert_eq!(
            rule.rewrite("el.innerHTML=x").as_deref(),
            Some("el.textContent=x")
        );
        assert_eq!(rule.rewrite("el.innerHTML =").as_deref(), Some("el.textContent ="));
        assert!(rule.rewrite("el.textContent = x").is_none());
    }
}
