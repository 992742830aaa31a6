//! Decoding of `[out:json]` responses

use crate::types::{Element, ElementKind, ResponseMeta};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Keys carrying geometry of ways, relations and areas
const GEOMETRY_KEYS: [&str; 3] = ["geometry", "bounds", "center"];

/// Parse a body as a JSON object; anything else is not an Overpass JSON response
pub fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Non-empty `remark` reported alongside (or instead of) the data
pub fn remark(object: &Map<String, Value>) -> Option<&str> {
    object
        .get("remark")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|remark| !remark.is_empty())
}

/// Elements of the `elements` array, `None` when there is no such array
pub fn elements(object: &Map<String, Value>) -> Option<Vec<Element>> {
    let elements = object.get("elements")?.as_array()?;
    Some(elements.iter().map(decode_element).collect())
}

/// Dataset metadata from the `osm3s` block
pub fn meta(object: &Map<String, Value>) -> ResponseMeta {
    let Some(osm3s) = object.get("osm3s").and_then(Value::as_object) else {
        return ResponseMeta::default();
    };

    ResponseMeta {
        timestamp_osm_base: osm3s
            .get("timestamp_osm_base")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        timestamp_areas_base: osm3s
            .get("timestamp_areas_base")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        copyright: osm3s
            .get("copyright")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Parse an Overpass timestamp such as `2024-05-01T12:00:00Z`
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn decode_element(value: &Value) -> Element {
    let Some(object) = value.as_object() else {
        return Element::new(ElementKind::Other(String::new()), None);
    };

    let kind = ElementKind::from_type_name(
        object.get("type").and_then(Value::as_str).unwrap_or_default(),
    );
    let id = object.get("id").and_then(Value::as_i64);

    let has_coordinates = match kind {
        ElementKind::Node => is_number(object, "lat") && is_number(object, "lon"),
        ElementKind::Way | ElementKind::Relation | ElementKind::Area => GEOMETRY_KEYS
            .iter()
            .any(|key| object.get(*key).is_some_and(|v| !v.is_null())),
        ElementKind::Other(_) => false,
    };

    let has_members = match kind {
        ElementKind::Way => is_non_empty_array(object, "nodes"),
        ElementKind::Relation => is_non_empty_array(object, "members"),
        _ => false,
    };

    Element {
        kind,
        id,
        has_coordinates,
        has_members,
        tags: decode_tags(object.get("tags")),
    }
}

fn decode_tags(tags: Option<&Value>) -> BTreeMap<String, String> {
    let Some(tags) = tags.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    tags.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn is_number(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(Value::is_number)
}

fn is_non_empty_array(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|array| !array.is_empty())
}
