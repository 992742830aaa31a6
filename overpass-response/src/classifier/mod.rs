//! Response classification
//!
//! The Overpass API does not reliably label what it sends back: JSON may
//! arrive as `text/plain`, XML error pages come with `text/html`, and syntax
//! errors arrive with status 400. The content type is therefore sniffed from
//! the body. The decision table, in order:
//!
//! 1. a body starting with `{` that parses as JSON: a non-empty `remark`
//!    makes it an error, otherwise the `elements` array is decoded
//! 2. a `<?xml` body with status 200, a non-HTML content type and an `<osm`
//!    root that parses as XML: a non-empty `<remark>` makes it an error,
//!    otherwise the children of `<osm>` are decoded
//! 3. any other body mentioning `Error` (but not custom/popup output) is an
//!    HTML error page
//! 4. anything else is unstructured

pub mod diagnose;
pub mod html;
pub mod json;
pub mod xml;

pub use diagnose::diagnose_empty;

use crate::geometry::{CoordinateFeatureCounter, FeatureCounter};
use crate::types::{ClassificationResult, DataStats, DecodedPayload, EmptyReason, RawResponse, ResponseMeta};

/// Trait for response classification
pub trait ResponseClassifier: Send + Sync {
    /// Classify a raw response; never fails, unparseable bodies become `Unknown`
    fn classify(&self, raw: &RawResponse) -> ClassificationResult;
}

/// Default classifier, counting renderable features with a [`FeatureCounter`]
#[derive(Debug, Clone, Default)]
pub struct DefaultResponseClassifier<C = CoordinateFeatureCounter> {
    counter: C,
}

impl DefaultResponseClassifier {
    /// Create a classifier using [`CoordinateFeatureCounter`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: FeatureCounter> DefaultResponseClassifier<C> {
    /// Create a classifier with a custom feature counter
    pub fn with_counter(counter: C) -> Self {
        Self { counter }
    }
}

impl<C: FeatureCounter> ResponseClassifier for DefaultResponseClassifier<C> {
    fn classify(&self, raw: &RawResponse) -> ClassificationResult {
        let (payload, meta) = decode(raw);
        let renderable_features = self.counter.count(&payload);
        let empty_reason = if renderable_features == 0 {
            diagnose_empty(&payload, renderable_features)
        } else {
            EmptyReason::None
        };

        tracing::debug!(
            payload_kind = %payload.kind(),
            elements = payload.elements().len(),
            renderable_features,
            empty_reason = ?empty_reason,
            "classified response"
        );

        ClassificationResult {
            payload_kind: payload.kind(),
            empty_reason,
            stats: DataStats::from_elements(payload.elements()),
            payload,
            meta,
            renderable_features,
        }
    }
}

/// Classify a raw response with the default classifier
pub fn classify(raw: &RawResponse) -> ClassificationResult {
    DefaultResponseClassifier::new().classify(raw)
}

/// Sniff the format of a body and decode it
pub fn decode(raw: &RawResponse) -> (DecodedPayload, ResponseMeta) {
    let body = raw.body_text.as_str();

    if body.trim_start().starts_with('{') {
        if let Some(object) = json::parse_object(body) {
            if let Some(remark) = json::remark(&object) {
                return error_payload(html::escape_html(remark));
            }
            return match json::elements(&object) {
                Some(elements) => (DecodedPayload::Json { elements }, json::meta(&object)),
                None => unknown_payload(body),
            };
        }
    }

    if looks_like_osm_xml(raw) {
        if xml::exceeds_depth(body, xml::MAX_NESTING_DEPTH) {
            tracing::debug!("body looked like OSM XML but nests too deeply");
        } else {
            match roxmltree::Document::parse(body) {
                Ok(doc) => {
                    if let Some(remark) = xml::remark(&doc) {
                        return error_payload(remark);
                    }
                    return (
                        DecodedPayload::Xml {
                            elements: xml::elements(&doc),
                        },
                        xml::meta(&doc),
                    );
                }
                Err(e) => tracing::debug!(error = %e, "body looked like OSM XML but did not parse"),
            }
        }
    }

    if html::is_error_text(body) {
        tracing::debug!(message = %html::extract_full_message(body), "Overpass API error");
        return error_payload(html::extract_error_message(body));
    }

    unknown_payload(body)
}

/// XML is only trusted on a 200 response that is not labelled as HTML
fn looks_like_osm_xml(raw: &RawResponse) -> bool {
    raw.body_text.starts_with("<?xml")
        && raw.http_status == 200
        && !raw.content_type().to_ascii_lowercase().contains("text/html")
        && raw.body_text.contains("<osm")
}

fn error_payload(message: String) -> (DecodedPayload, ResponseMeta) {
    (DecodedPayload::Error { message }, ResponseMeta::default())
}

fn unknown_payload(body: &str) -> (DecodedPayload, ResponseMeta) {
    (
        DecodedPayload::Unknown {
            raw: body.to_string(),
        },
        ResponseMeta::default(),
    )
}
