//! Helpers for the HTML error pages the Overpass API answers with
//! when a query cannot be parsed or executed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker of `[out:custom]` output, which is HTML but not an error page
const CUSTOM_OUTPUT_MARKER: &str = "<script";

/// Marker of `[out:popup]` output
const POPUP_OUTPUT_MARKER: &str = "<h2>Public Transport Stops</h2>";

/// Collapsed form of the generic dispatcher diagnostic
pub const DIAGNOSTIC_PLACEHOLDER: &str = "[…]";

static BODY_PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^.*<body>").expect("Failed to compile body prefix regex"));

static BODY_SUFFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)</body>.*").expect("Failed to compile body suffix regex"));

static ATTRIBUTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<p>The data included in this document is from .*?</p>")
        .expect("Failed to compile attribution regex")
});

static DIAGNOSTIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"open64: 0 Success /osm3s_v\d+\.\d+\.\d+_osm_base (\w+::)*\w+\.")
        .expect("Failed to compile diagnostic regex")
});

static ERROR_LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"line (\d+):").expect("Failed to compile error line regex"));

/// Whether an unstructured body reads like an API error page
pub fn is_error_text(text: &str) -> bool {
    text.contains("Error")
        && !text.contains(CUSTOM_OUTPUT_MARKER)
        && !text.contains(POPUP_OUTPUT_MARKER)
}

/// Strip the page around `<body>` and the attribution paragraph,
/// keeping the dispatcher diagnostic intact.
pub fn extract_full_message(text: &str) -> String {
    let message = BODY_PREFIX_PATTERN.replacen(text, 1, "");
    let message = BODY_SUFFIX_PATTERN.replacen(&message, 1, "");
    ATTRIBUTION_PATTERN.replacen(&message, 1, "").into_owned()
}

/// Error message of an HTML error page, cleaned up for display
pub fn extract_error_message(text: &str) -> String {
    let full = extract_full_message(text);
    DIAGNOSTIC_PATTERN
        .replacen(&full, 1, DIAGNOSTIC_PLACEHOLDER)
        .into_owned()
}

/// Escape text for safe inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Query line numbers mentioned in an error message (`line 3: parse error ...`)
pub fn error_lines(message: &str) -> Vec<usize> {
    ERROR_LINE_PATTERN
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
<head>
  <meta http-equiv="content-type" content="text/html; charset=utf-8" lang="en"/>
  <title>OSM3S Response</title>
</head>
<body>
<p>The data included in this document is from www.openstreetmap.org. The data is made available under ODbL.</p>
<p><strong style="color:#FF0000">Error</strong>: line 1: parse error: Unknown type "nod" </p>
<p><strong style="color:#FF0000">Error</strong>: line 3: static error: open64: 0 Success /osm3s_v0.7.61_osm_base Dispatcher_Client::1. Probably the server is down. </p>
</body>
</html>
"#;

    #[test]
    fn test_is_error_text() {
        assert!(is_error_text(ERROR_PAGE));
        assert!(!is_error_text("no problems here"));
        assert!(!is_error_text("<html><script>var Error;</script></html>"));
        assert!(!is_error_text(
            "<h2>Public Transport Stops</h2><p>Error bus stop</p>"
        ));
    }

    #[test]
    fn test_extract_error_message() {
        let message = extract_error_message(ERROR_PAGE);

        assert!(!message.contains("<head>"));
        assert!(!message.contains("</html>"));
        assert!(!message.contains("The data included in this document"));
        assert!(message.contains("line 1: parse error: Unknown type \"nod\""));
        assert!(message.contains("static error: [\u{2026}] Probably the server is down."));
        assert!(!message.contains("open64"));
    }

    #[test]
    fn test_extract_full_message_keeps_diagnostic() {
        let message = extract_full_message(ERROR_PAGE);
        assert!(message.contains("open64: 0 Success /osm3s_v0.7.61_osm_base Dispatcher_Client::1."));
    }

    #[test]
    fn test_extract_without_body() {
        assert_eq!(
            extract_error_message("Error: runtime error"),
            "Error: runtime error"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("a < b && c > \"d\""),
            "a &lt; b &amp;&amp; c &gt; \"d\""
        );
    }

    #[test]
    fn test_error_lines() {
        assert_eq!(error_lines(ERROR_PAGE), vec![1, 3]);
        assert!(error_lines("runtime error: Query timed out").is_empty());
    }
}
