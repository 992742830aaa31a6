use crate::classifier::html;
use crate::types::{ClassificationResult, RawResponse, DEFAULT_LARGE_RESPONSE_THRESHOLD};
use serde::Serialize;

/// Everything the presentation layer needs about one query result
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub http_status: u16,
    pub content_type: Option<String>,
    pub size_bytes: usize,
    /// Approximate size, e.g. `about 20 kB`
    pub size_text: String,
    pub is_large: bool,
    /// Query lines an error message points at
    pub error_lines: Vec<usize>,
    #[serde(flatten)]
    pub classification: ClassificationResult,
}

impl QueryReport {
    pub fn new(raw: &RawResponse, classification: ClassificationResult) -> Self {
        Self::with_threshold(raw, classification, DEFAULT_LARGE_RESPONSE_THRESHOLD)
    }

    pub fn with_threshold(
        raw: &RawResponse,
        classification: ClassificationResult,
        large_response_threshold: usize,
    ) -> Self {
        let error_lines = classification
            .payload
            .error_message()
            .map(html::error_lines)
            .unwrap_or_default();

        Self {
            http_status: raw.http_status,
            content_type: raw.content_type.clone(),
            size_bytes: raw.size(),
            size_text: format_data_amount(raw.size()),
            is_large: raw.size() > large_response_threshold,
            error_lines,
            classification,
        }
    }
}

/// Round a byte count to one significant digit and render it with a unit
pub fn format_data_amount(bytes: usize) -> String {
    if bytes == 0 {
        return "0 bytes".to_string();
    }

    let scale = 10f64.powi((bytes as f64).log10().floor() as i32);
    let rounded = ((bytes as f64 / scale).round() * scale) as u64;

    if rounded < 1_000 {
        format!("{rounded} bytes")
    } else if rounded < 1_000_000 {
        format!("{} kB", trim_float(rounded as f64 / 1_000.0))
    } else {
        format!("{} MB", trim_float(rounded as f64 / 1_000_000.0))
    }
}

fn trim_float(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
