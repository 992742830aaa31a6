//! Empty-result diagnosis
//!
//! When a query succeeds but nothing can be drawn, the most common cause is a
//! query that asked only for ids or tags (`out ids;`, `out tags;`) or that
//! returned area summaries. Rules are checked in order and the first match wins.

use crate::types::{DecodedPayload, Element, ElementKind, EmptyReason};

/// Explain why a decoded payload produced no renderable features.
///
/// Returns [`EmptyReason::None`] when `renderable_feature_count` is non-zero.
pub fn diagnose_empty(payload: &DecodedPayload, renderable_feature_count: usize) -> EmptyReason {
    if renderable_feature_count > 0 {
        return EmptyReason::None;
    }

    let elements = match payload {
        DecodedPayload::Error { .. } => return EmptyReason::ErrorOccurred,
        DecodedPayload::Unknown { .. } => return EmptyReason::UnstructuredData,
        DecodedPayload::Json { elements } | DecodedPayload::Xml { elements } => elements,
    };

    if elements.is_empty() {
        EmptyReason::EmptyDataset
    } else if elements.iter().all(|e| e.kind == ElementKind::Area) {
        EmptyReason::OnlyAreas
    } else if elements.iter().any(|e| e.kind == ElementKind::Node) {
        EmptyReason::NoCoordinates
    } else if lacks_references(elements, &ElementKind::Way) {
        EmptyReason::NoCoordinates
    } else if lacks_references(elements, &ElementKind::Relation) {
        EmptyReason::NoCoordinates
    } else {
        EmptyReason::NoVisibleData
    }
}

/// Elements of `kind` exist, but none of them references nodes or members
fn lacks_references(elements: &[Element], kind: &ElementKind) -> bool {
    let mut of_kind = elements.iter().filter(|e| &e.kind == kind).peekable();
    of_kind.peek().is_some() && of_kind.all(|e| !e.has_members)
}
