use crate::types::{DecodedPayload, Element, ElementKind};

/// Counts the features (points, lines, polygons) a payload would render as.
///
/// Real geometry conversion lives outside this crate; implementations only
/// need to report how many drawable features came out of it.
pub trait FeatureCounter: Send + Sync {
    fn count(&self, payload: &DecodedPayload) -> usize;
}

/// Counts every node, way and relation that carries its own coordinates.
///
/// Areas are never drawn and unrecognised element types are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateFeatureCounter;

impl CoordinateFeatureCounter {
    pub fn new() -> Self {
        Self
    }

    fn is_renderable(element: &Element) -> bool {
        matches!(
            element.kind,
            ElementKind::Node | ElementKind::Way | ElementKind::Relation
        ) && element.has_coordinates
    }
}

impl FeatureCounter for CoordinateFeatureCounter {
    fn count(&self, payload: &DecodedPayload) -> usize {
        payload
            .elements()
            .iter()
            .filter(|element| Self::is_renderable(element))
            .count()
    }
}

/// A count produced elsewhere, e.g. by a renderer that already converted the data
#[derive(Debug, Clone, Copy)]
pub struct KnownFeatureCount(pub usize);

impl FeatureCounter for KnownFeatureCount {
    fn count(&self, _payload: &DecodedPayload) -> usize {
        self.0
    }
}
