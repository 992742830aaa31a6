use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

static SHORTCUT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{.*?\}\}").expect("Failed to compile shortcut regex"));

/// Language a query is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryLanguage {
    OverpassQl,
    Xml,
}

impl QueryLanguage {
    /// XML queries start with a tag once `{{...}}` shortcuts are removed
    pub fn detect(query: &str) -> Self {
        let stripped = SHORTCUT_PATTERN.replace_all(query, "");
        if stripped.trim().starts_with('<') {
            Self::Xml
        } else {
            Self::OverpassQl
        }
    }
}

impl fmt::Display for QueryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverpassQl => f.write_str("OverpassQL"),
            Self::Xml => f.write_str("xml"),
        }
    }
}

/// Normalise a query before submission.
///
/// XML queries that are not a full document get an `<osm-script>` root (if
/// missing) and an XML declaration, so error line numbers refer to a
/// well-formed document.
pub fn prepare_query(query: &str, language: QueryLanguage) -> String {
    match language {
        QueryLanguage::OverpassQl => query.to_string(),
        QueryLanguage::Xml if query.starts_with("<?xml") => query.to_string(),
        QueryLanguage::Xml => {
            let script = if query.contains("<osm-script") {
                query.to_string()
            } else {
                format!("<osm-script>{query}</osm-script>")
            };
            format!("{XML_DECLARATION}{script}")
        }
    }
}
