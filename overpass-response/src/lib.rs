//! Overpass Response - classification and empty-result diagnosis for Overpass API responses
//!
//! This crate submits queries to an Overpass API instance, works out what
//! actually came back (JSON, XML, an error page or something unstructured)
//! and, when nothing can be drawn, explains why.

// Core modules
pub mod config;
pub mod error;
pub mod types;
pub mod traits;

// Main functionality modules
pub mod classifier;
pub mod geometry;
pub mod http;
pub mod query;
pub mod report;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main types for convenience
pub use classifier::{classify, diagnose_empty, DefaultResponseClassifier, ResponseClassifier};
pub use config::OverpassConfig;
pub use error::{OverpassError, Result};
pub use geometry::{CoordinateFeatureCounter, FeatureCounter, KnownFeatureCount};
pub use http::OverpassClient;
pub use query::{prepare_query, QueryLanguage};
pub use report::{format_data_amount, QueryReport};
pub use session::{QuerySession, SessionOutcome};
pub use traits::Transport;
pub use types::{
    ClassificationResult, DataStats, DecodedPayload, Element, ElementKind, EmptyReason,
    PayloadKind, RawResponse, ResponseMeta,
};

/// Prepare, submit and classify a single query with the given configuration.
///
/// Returns `None` when the query was superseded before it completed.
pub async fn run_query(config: &OverpassConfig, query: &str) -> Result<Option<QueryReport>> {
    let client = OverpassClient::new(config)?;
    let session = QuerySession::new(client, config.kill_on_abort);
    let prepared = prepare_query(query, QueryLanguage::detect(query));

    match session.submit(&prepared).await? {
        SessionOutcome::Completed(raw) => {
            let classification = classify(&raw);
            Ok(Some(QueryReport::with_threshold(
                &raw,
                classification,
                config.large_response_threshold,
            )))
        }
        SessionOutcome::Superseded => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Properties the presentation layer relies on
    #[test]
    fn test_documented_examples() {
        let json = |body: &str| RawResponse::new(body, 200, Some("application/json"));

        let result = classify(&json(r#"{"remark":"runtime error: Query timed out"}"#));
        assert_eq!(result.payload_kind, PayloadKind::Error);
        assert_eq!(
            result.payload.error_message(),
            Some("runtime error: Query timed out")
        );

        let result = classify(&RawResponse::new(
            r#"<?xml version="1.0" encoding="UTF-8"?><osm><remark>x</remark></osm>"#,
            200,
            Some("application/osm3s+xml"),
        ));
        assert_eq!(result.payload.error_message(), Some("x"));

        let area = classify(&json(r#"{"elements":[{"type":"area","id":1}]}"#));
        assert_eq!(diagnose_empty(&area.payload, 0), EmptyReason::OnlyAreas);

        let node = classify(&json(r#"{"elements":[{"type":"node","id":1}]}"#));
        assert_eq!(diagnose_empty(&node.payload, 0), EmptyReason::NoCoordinates);

        let empty = classify(&json(r#"{"elements":[]}"#));
        assert_eq!(empty.empty_reason, EmptyReason::EmptyDataset);

        let text = classify(&RawResponse::new(
            "Error: runtime error: open64: 2 No such file or directory",
            200,
            Some("text/plain"),
        ));
        assert_eq!(text.payload_kind, PayloadKind::Error);
        assert_eq!(diagnose_empty(&text.payload, 0), EmptyReason::ErrorOccurred);
    }

    #[test]
    fn test_error_types() {
        let error = OverpassError::invalid_config("test error");
        assert!(error.to_string().contains("Invalid configuration"));
    }
}
