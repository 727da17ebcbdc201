//! Whitespace minification for generated code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::js_syntax;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());
static BEFORE_CLOSE_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
pub struct OptimizedCode {
    pub html: String,
    pub css: String,
    pub javascript: String,
}

/// Minify all three parts. Only whitespace is removed or collapsed; every
/// other character survives in order.
pub fn optimize_code(html: &str, css: &str, javascript: &str) -> OptimizedCode {
    OptimizedCode {
        html: optimize_html(html),
        css: optimize_css(css),
        javascript: optimize_javascript(javascript),
    }
}

pub fn optimize_html(html: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(html, " ");
    BETWEEN_TAGS.replace_all(&collapsed, "><").trim().to_string()
}

/// Declaration semicolons are kept.
pub fn optimize_css(css: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(css, " ");
    BEFORE_CLOSE_BRACE.replace_all(&collapsed, "}").trim().to_string()
}

/// Collapse whitespace outside string, template and regex literals. A run
/// that contains a line break becomes a single `\n` so automatic semicolon
/// insertion still applies; any other run becomes one space.
///
/// Source that does not parse is returned trimmed but otherwise untouched.
pub fn optimize_javascript(javascript: &str) -> String {
    let spans = match js_syntax::literal_spans(javascript) {
        Ok(spans) => spans,
        Err(e) => {
            debug!(error = %e, "Skipping JavaScript minification");
            return javascript.trim().to_string();
        }
    };

    let mut out = String::with_capacity(javascript.len());
    let mut cursor = 0;
    for span in spans {
        // nested template spans sit inside their parent
        if span.start < cursor {
            continue;
        }
        collapse_js_whitespace(&javascript[cursor..span.start], &mut out);
        out.push_str(&javascript[span.clone()]);
        cursor = span.end;
    }
    collapse_js_whitespace(&javascript[cursor..], &mut out);
    out.trim().to_string()
}

fn collapse_js_whitespace(code: &str, out: &mut String) {
    let mut last = 0;
    for run in WHITESPACE_RUN.find_iter(code) {
        out.push_str(&code[last..run.start()]);
        out.push(if run.as_str().contains('\n') { '\n' } else { ' ' });
        last = run.end();
    }
    out.push_str(&code[last..]);
}
