use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default threshold above which a response is considered huge (~1MB)
pub const DEFAULT_LARGE_RESPONSE_THRESHOLD: usize = 1_000_000;

/// Raw HTTP response as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub body_text: String,
    pub http_status: u16,
    pub content_type: Option<String>,
}

impl RawResponse {
    /// Create a new raw response
    pub fn new<S: Into<String>>(body_text: S, http_status: u16, content_type: Option<&str>) -> Self {
        Self {
            body_text: body_text.into(),
            http_status,
            content_type: content_type.map(str::to_string),
        }
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.http_status >= 200 && self.http_status < 300
    }

    /// Content type header, empty when absent
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or("")
    }

    /// Size of the response body in bytes
    pub fn size(&self) -> usize {
        self.body_text.len()
    }
}

/// Kind of a geographic entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    Area,
    /// Anything else the API emits at element level (e.g. `count`)
    Other(String),
}

impl ElementKind {
    /// Map an Overpass element type name to its kind
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "node" => Self::Node,
            "way" => Self::Way,
            "relation" => Self::Relation,
            "area" => Self::Area,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
            Self::Area => "area",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity of a decoded query response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<i64>,
    pub has_coordinates: bool,
    /// Whether child node (way) or member (relation) references are present
    pub has_members: bool,
    pub tags: BTreeMap<String, String>,
}

impl Element {
    /// Create an element without tags
    pub fn new(kind: ElementKind, id: Option<i64>) -> Self {
        Self {
            kind,
            id,
            has_coordinates: false,
            has_members: false,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_coordinates(mut self, has_coordinates: bool) -> Self {
        self.has_coordinates = has_coordinates;
        self
    }

    pub fn with_members(mut self, has_members: bool) -> Self {
        self.has_members = has_members;
        self
    }

    pub fn with_tag<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DecodedPayload {
    Json { elements: Vec<Element> },
    Xml { elements: Vec<Element> },
    Error { message: String },
    Unknown { raw: String },
}

impl DecodedPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Json { .. } => PayloadKind::Json,
            Self::Xml { .. } => PayloadKind::Xml,
            Self::Error { .. } => PayloadKind::Error,
            Self::Unknown { .. } => PayloadKind::Unknown,
        }
    }

    /// Decoded elements; empty for error and unknown payloads
    pub fn elements(&self) -> &[Element] {
        match self {
            Self::Json { elements } | Self::Xml { elements } => elements,
            Self::Error { .. } | Self::Unknown { .. } => &[],
        }
    }

    /// Error message reported by the API, if this is an error payload
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Tag of a [`DecodedPayload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Json,
    Xml,
    Error,
    Unknown,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Error => "error",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Why a successfully handled response produced nothing to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmptyReason {
    None,
    OnlyAreas,
    NoCoordinates,
    NoVisibleData,
    ErrorOccurred,
    UnstructuredData,
    EmptyDataset,
}

impl EmptyReason {
    /// Short diagnostic text, as shown next to the blank map badge
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::OnlyAreas => "only areas returned",
            Self::NoCoordinates => "no coordinates returned",
            Self::NoVisibleData => "no visible data",
            Self::ErrorOccurred => "an error occured",
            Self::UnstructuredData => "unstructured data returned",
            Self::EmptyDataset => "received empty dataset",
        }
    }

    /// True for every reason except [`EmptyReason::None`]
    pub fn is_blank(&self) -> bool {
        *self != Self::None
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Dataset metadata carried alongside the elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub timestamp_osm_base: Option<DateTime<Utc>>,
    pub timestamp_areas_base: Option<DateTime<Utc>>,
    pub copyright: Option<String>,
}

impl ResponseMeta {
    pub fn is_empty(&self) -> bool {
        self.timestamp_osm_base.is_none()
            && self.timestamp_areas_base.is_none()
            && self.copyright.is_none()
    }
}

/// Element counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStats {
    pub nodes: usize,
    pub ways: usize,
    pub relations: usize,
    pub areas: usize,
}

impl DataStats {
    /// Count the elements of a decoded payload
    pub fn from_elements(elements: &[Element]) -> Self {
        elements.iter().fold(Self::default(), |mut stats, element| {
            match element.kind {
                ElementKind::Node => stats.nodes += 1,
                ElementKind::Way => stats.ways += 1,
                ElementKind::Relation => stats.relations += 1,
                ElementKind::Area => stats.areas += 1,
                ElementKind::Other(_) => {}
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.nodes + self.ways + self.relations + self.areas
    }
}

/// Outcome of classifying one raw response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub payload_kind: PayloadKind,
    pub empty_reason: EmptyReason,
    pub payload: DecodedPayload,
    pub meta: ResponseMeta,
    pub stats: DataStats,
    pub renderable_features: usize,
}

impl ClassificationResult {
    pub fn is_error(&self) -> bool {
        self.payload_kind == PayloadKind::Error
    }

    /// True when nothing can be drawn for this response
    pub fn is_blank(&self) -> bool {
        self.empty_reason.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_from_type_name() {
        assert_eq!(ElementKind::from_type_name("node"), ElementKind::Node);
        assert_eq!(ElementKind::from_type_name("area"), ElementKind::Area);
        assert_eq!(
            ElementKind::from_type_name("count"),
            ElementKind::Other("count".to_string())
        );
        assert_eq!(ElementKind::Other("count".to_string()).to_string(), "count");
    }

    #[test]
    fn test_payload_elements() {
        let payload = DecodedPayload::Json {
            elements: vec![Element::new(ElementKind::Node, Some(1))],
        };
        assert_eq!(payload.kind(), PayloadKind::Json);
        assert_eq!(payload.elements().len(), 1);
        assert!(payload.error_message().is_none());

        let payload = DecodedPayload::Error {
            message: "line 1: parse error".to_string(),
        };
        assert!(payload.elements().is_empty());
        assert_eq!(payload.error_message(), Some("line 1: parse error"));
    }

    #[test]
    fn test_data_stats() {
        let elements = vec![
            Element::new(ElementKind::Node, Some(1)),
            Element::new(ElementKind::Node, Some(2)),
            Element::new(ElementKind::Way, Some(3)),
            Element::new(ElementKind::Area, Some(3600000001)),
            Element::new(ElementKind::Other("count".to_string()), None),
        ];
        let stats = DataStats::from_elements(&elements);
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.ways, 1);
        assert_eq!(stats.relations, 0);
        assert_eq!(stats.areas, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_empty_reason_text() {
        assert_eq!(EmptyReason::OnlyAreas.to_string(), "only areas returned");
        assert_eq!(EmptyReason::EmptyDataset.to_string(), "received empty dataset");
        assert!(!EmptyReason::None.is_blank());
        assert!(EmptyReason::NoVisibleData.is_blank());
    }

    #[test]
    fn test_raw_response() {
        let raw = RawResponse::new("{}", 200, Some("application/json"));
        assert!(raw.is_success());
        assert_eq!(raw.content_type(), "application/json");
        assert_eq!(raw.size(), 2);

        let raw = RawResponse::new("", 429, None);
        assert!(!raw.is_success());
        assert_eq!(raw.content_type(), "");
    }
}
