//! Structural checks on generated HTML/CSS/JavaScript.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::js_syntax;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[\s>]").unwrap());
static HEAD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head[\s>]").unwrap());
static BODY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[\s>]").unwrap());
static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());
static ALT_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\salt\s*=").unwrap());
static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

const UTILITY_MARKERS: &[&str] = &["bg-", "text-", "p-", "m-", "flex", "grid"];
const BREAKPOINT_MARKERS: &[&str] = &["sm:", "md:", "lg:"];

/// Outcome of validating one generated site.
///
/// Errors block delivery; warnings are advisory and never affect `valid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Run every rule; nothing short-circuits except the CSS line scan, which
/// stops at its first violation.
pub fn validate_generated_code(html: &str, css: &str, javascript: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !html.to_ascii_lowercase().contains("<!doctype html") {
        errors.push("HTML must include DOCTYPE declaration".to_string());
    }
    if !HTML_TAG.is_match(html) {
        errors.push("HTML must include <html> tag".to_string());
    }
    if !HEAD_TAG.is_match(html) {
        errors.push("HTML must include <head> section".to_string());
    }
    if !BODY_TAG.is_match(html) {
        errors.push("HTML must include <body> section".to_string());
    }

    if !html.contains("lang=") {
        warnings.push("HTML should include lang attribute".to_string());
    }
    if IMG_TAG.find_iter(html).any(|tag| !ALT_ATTR.is_match(tag.as_str())) {
        warnings.push("Images should include alt attributes".to_string());
    }
    if !uses_utility_classes(html) {
        warnings.push("HTML should use Tailwind CSS classes for styling".to_string());
    }
    if !BREAKPOINT_MARKERS.iter().any(|marker| html.contains(marker)) {
        warnings.push("Consider adding responsive Tailwind classes".to_string());
    }

    if !css.trim().is_empty() {
        let unclosed = css
            .lines()
            .filter(|line| !line.trim().is_empty())
            .any(|line| line.contains('{') && !line.contains('}'));
        if unclosed {
            errors.push("CSS has unclosed braces".to_string());
        }
    }

    if !javascript.trim().is_empty() {
        if let Err(e) = js_syntax::check_function_body(javascript) {
            errors.push(format!("JavaScript syntax error: {e}"));
        }
    }

    ValidationResult::from_findings(errors, warnings)
}

fn uses_utility_classes(html: &str) -> bool {
    CLASS_ATTR.captures_iter(html).any(|caps| {
        let value = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        UTILITY_MARKERS.iter().any(|marker| value.contains(marker))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Joe's Diner</title></head>
<body class="bg-white text-gray-900"><h1 class="p-4">Joe's Diner</h1></body>
</html>"#;

    #[test]
    fn minimal_document_is_valid() {
        let result = validate_generated_code(MINIMAL, "", "");
        assert!(result.valid);
        assert!(result.errors.is_empty());
        // only the responsive hint remains
        assert_eq!(result.warnings, ["Consider adding responsive Tailwind classes"]);
    }

    #[test]
    fn missing_doctype_is_invalid_regardless_of_quality() {
        let html = MINIMAL.replace("<!DOCTYPE html>", "");
        let result = validate_generated_code(&html, "", "");
        assert!(!result.valid);
        assert_eq!(result.errors, ["HTML must include DOCTYPE declaration"]);
    }

    #[test]
    fn structural_errors_accumulate() {
        let result = validate_generated_code("<div>hi</div>", "", "");
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            [
                "HTML must include DOCTYPE declaration",
                "HTML must include <html> tag",
                "HTML must include <head> section",
                "HTML must include <body> section",
            ]
        );
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn body_with_attributes_counts_as_body() {
        assert!(BODY_TAG.is_match(r#"<body class="min-h-screen">"#));
        assert!(!BODY_TAG.is_match("<bodyguard>"));
    }

    #[test]
    fn image_without_alt_warns() {
        let html = MINIMAL.replace(
            "</h1>",
            r#"</h1><img src="a.png" alt="Front"><img src="b.png">"#,
        );
        let result = validate_generated_code(&html, "", "");
        assert!(result.valid);
        assert!(result.warnings.contains(&"Images should include alt attributes".to_string()));

        let all_alt = MINIMAL.replace("</h1>", r#"</h1><img src="a.png" alt="Front">"#);
        let result = validate_generated_code(&all_alt, "", "");
        assert!(!result.warnings.contains(&"Images should include alt attributes".to_string()));
    }

    #[test]
    fn missing_lang_and_utilities_warn() {
        let html = "<!DOCTYPE html><html><head></head><body><p class=\"intro\">x</p></body></html>";
        let result = validate_generated_code(html, "", "");
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            [
                "HTML should include lang attribute",
                "HTML should use Tailwind CSS classes for styling",
                "Consider adding responsive Tailwind classes",
            ]
        );
    }

    #[test]
    fn responsive_markers_silence_hint() {
        let html = MINIMAL.replace("p-4", "p-4 md:p-8");
        assert!(validate_generated_code(&html, "", "").warnings.is_empty());
    }

    #[test]
    fn css_open_brace_without_close_on_same_line_is_an_error() {
        let result = validate_generated_code(MINIMAL, ".hero {\n  color: red;\n}", "");
        assert_eq!(result.errors, ["CSS has unclosed braces"]);

        let result = validate_generated_code(MINIMAL, ".hero { color: red; }\n.cta { margin: 0; }", "");
        assert!(result.valid);
    }

    #[test]
    fn blank_css_and_js_are_skipped() {
        assert!(validate_generated_code(MINIMAL, "   \n", "\n\t").valid);
    }

    #[test]
    fn javascript_syntax_error_is_reported() {
        let result = validate_generated_code(MINIMAL, "", "document.querySelector('#menu').addEventListener('click', () => {");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("JavaScript syntax error: "), "{:?}", result.errors);
    }

    #[test]
    fn statement_level_javascript_errors_are_reported() {
        for js in [
            "let x = ;",
            "const = 5;",
            "if x { y(); }",
            "function (a, b) { return a + }",
            "await fetch('/x');",
        ] {
            let result = validate_generated_code(MINIMAL, "", js);
            assert!(!result.valid, "{js}");
            assert!(result.errors[0].starts_with("JavaScript syntax error: "), "{js}");
        }
    }

    #[test]
    fn javascript_is_read_as_a_function_body() {
        assert!(validate_generated_code(MINIMAL, "", "return 1;").valid);
    }

    #[test]
    fn regex_after_if_condition_is_valid() {
        let result = validate_generated_code(MINIMAL, "", "if (s) /'/.test(s);");
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn valid_javascript_passes() {
        let result = validate_generated_code(MINIMAL, "", "const y = new Date().getFullYear();\nconsole.log(`Year ${y}`);");
        assert!(result.valid);
    }
}
