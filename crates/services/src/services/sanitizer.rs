//! Strips executable content from generated HTML before it is delivered.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SCRIPT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b([^>]*)>.*?</script\s*>").unwrap());
static TEMPLATE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\btype\s*=\s*["']?text/template\b"#).unwrap());
static EVENT_HANDLER_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});
static JAVASCRIPT_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript\s*:").unwrap());
static HTML_DATA_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)data:text/html").unwrap());

/// Remove script elements (except `type="text/template"` blocks), inline
/// event-handler attributes, `javascript:` and `data:text/html` URLs.
///
/// Passes repeat until nothing changes, so removals that splice a new match
/// together are caught and the output is a fixpoint: sanitizing it again
/// returns it unchanged.
pub fn sanitize_html(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(html: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(html, |caps: &Captures| {
        if TEMPLATE_TYPE.is_match(&caps[1]) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    let without_handlers = EVENT_HANDLER_ATTR.replace_all(&without_scripts, "");
    let without_js_urls = JAVASCRIPT_SCHEME.replace_all(&without_handlers, "");
    let cleaned: Cow<'_, str> = HTML_DATA_URL.replace_all(&without_js_urls, "");
    cleaned.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_scripts() {
        let html = "<body><h1>Hi</h1><script>alert(1)</script><p>x</p></body>";
        assert_eq!(sanitize_html(html), "<body><h1>Hi</h1><p>x</p></body>");
    }

    #[test]
    fn strips_multiline_and_uppercase_scripts() {
        let html = "<div><SCRIPT src=\"x.js\">\nlet a = 1;\n</SCRIPT ></div>";
        assert_eq!(sanitize_html(html), "<div></div>");
    }

    #[test]
    fn keeps_template_scripts() {
        let html = r#"<script type="text/template"><li>{{name}}</li></script>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn strips_event_handlers_in_any_quoting() {
        let html = r#"<button class="p-4" onclick="go()" onMouseOver='x()' onfocus=y()>Go</button>"#;
        assert_eq!(sanitize_html(html), r#"<button class="p-4">Go</button>"#);
    }

    #[test]
    fn leaves_words_starting_with_on_alone() {
        let html = r#"<p data-online="yes">Only online</p>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn neutralizes_dangerous_urls() {
        let html = r#"<a href="javascript:alert(1)">a</a><iframe src="data:text/html,<b>x</b>"></iframe>"#;
        let clean = sanitize_html(html);
        assert!(!clean.to_lowercase().contains("javascript:"));
        assert!(!clean.to_lowercase().contains("data:text/html"));
        assert!(clean.contains(r#"<a href="alert(1)">a</a>"#));
    }

    #[test]
    fn spliced_payloads_are_removed() {
        let html = "<scr<script></script>ipt>alert(1)</script>";
        assert_eq!(sanitize_html(html), "");

        let html = "<a href=\"javajavascript:script:void(0)\">x</a>";
        assert!(!sanitize_html(html).to_lowercase().contains("javascript:"));
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "<body onload=\"init()\"><script>x()</script><a href='JavaScript:y()'>y</a></body>",
            "<p>plain text with no markup issues</p>",
            "<scr<script>a</script>ipt>b</script>",
        ];
        for input in inputs {
            let once = sanitize_html(input);
            assert_eq!(sanitize_html(&once), once);
        }
    }

    #[test]
    fn plain_markup_is_untouched() {
        let html = "<!DOCTYPE html><html lang=\"en\"><body class=\"flex\"><h1>Menu</h1></body></html>";
        assert_eq!(sanitize_html(html), html);
    }
}
