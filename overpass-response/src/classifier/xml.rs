//! Decoding of `[out:xml]` responses

use super::json::parse_timestamp;
use crate::types::{Element, ElementKind, ResponseMeta};
use roxmltree::{Document, Node};
use std::collections::BTreeMap;

/// Children of `<osm>` that describe the dataset rather than being part of it
const NON_DATA_CHILDREN: [&str; 4] = ["note", "meta", "bounds", "remark"];

/// Deepest element nesting accepted before parsing. Overpass output nests
/// four levels at most (`osm > relation > member > nd`).
pub const MAX_NESTING_DEPTH: usize = 256;

/// Whether the markup nests deeper than `max_depth` elements.
///
/// A single pass over the bytes; the document parser recurses per level and
/// must not see unbounded nesting.
pub fn exceeds_depth(text: &str, max_depth: usize) -> bool {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'/') => {
                depth = depth.saturating_sub(1);
                i += 2;
            }
            Some(b'?') | Some(b'!') => i += 2,
            _ => {
                let (end, self_closing) = tag_end(bytes, i + 1);
                if !self_closing {
                    depth += 1;
                    if depth > max_depth {
                        return true;
                    }
                }
                i = end;
            }
        }
    }
    false
}

/// Position after the `>` closing a start tag, and whether it was `/>`
fn tag_end(bytes: &[u8], start: usize) -> (usize, bool) {
    let mut quote = None;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return (i + 1, i > start && bytes[i - 1] == b'/'),
            None => {}
        }
        i += 1;
    }
    (i, false)
}

/// Non-empty `<remark>` anywhere in the document, including text inside inline markup
pub fn remark(doc: &Document<'_>) -> Option<String> {
    let node = doc.descendants().find(|node| node.has_tag_name("remark"))?;
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Data elements among the children of the `<osm>` root
pub fn elements(doc: &Document<'_>) -> Vec<Element> {
    let root = doc.root_element();
    if !root.has_tag_name("osm") {
        return Vec::new();
    }

    root.children()
        .filter(Node::is_element)
        .filter(|node| !NON_DATA_CHILDREN.contains(&node.tag_name().name()))
        .map(decode_element)
        .collect()
}

/// Dataset metadata from the first `<meta>` and `<note>` children
pub fn meta(doc: &Document<'_>) -> ResponseMeta {
    let root = doc.root_element();
    let meta = first_child(root, "meta");

    ResponseMeta {
        timestamp_osm_base: meta
            .and_then(|meta| meta.attribute("osm_base"))
            .and_then(parse_timestamp),
        timestamp_areas_base: meta
            .and_then(|meta| meta.attribute("areas"))
            .and_then(parse_timestamp),
        copyright: first_child(root, "note")
            .and_then(|note| note.text())
            .map(str::to_string),
    }
}

fn decode_element(node: Node<'_, '_>) -> Element {
    let kind = ElementKind::from_type_name(node.tag_name().name());
    let id = node.attribute("id").and_then(|id| id.parse().ok());

    let has_coordinates = match kind {
        ElementKind::Node => has_position(node),
        ElementKind::Way | ElementKind::Relation | ElementKind::Area => has_child_geometry(node),
        ElementKind::Other(_) => false,
    };

    let has_members = match kind {
        ElementKind::Way => first_child(node, "nd").is_some(),
        ElementKind::Relation => first_child(node, "member").is_some(),
        _ => false,
    };

    let tags: BTreeMap<String, String> = node
        .children()
        .filter(|child| child.has_tag_name("tag"))
        .filter_map(|tag| Some((tag.attribute("k")?.to_string(), tag.attribute("v")?.to_string())))
        .collect();

    Element {
        kind,
        id,
        has_coordinates,
        has_members,
        tags,
    }
}

/// Geometry of `out geom` / `out center` / `out bb` output
fn has_child_geometry(node: Node<'_, '_>) -> bool {
    node.children().filter(Node::is_element).any(|child| {
        match child.tag_name().name() {
            "bounds" | "center" => true,
            "nd" => has_position(child),
            "member" => {
                has_position(child)
                    || child
                        .children()
                        .any(|nd| nd.has_tag_name("nd") && has_position(nd))
            }
            _ => false,
        }
    })
}

fn has_position(node: Node<'_, '_>) -> bool {
    let coordinate = |name: &str| {
        node.attribute(name)
            .is_some_and(|value| value.trim().parse::<f64>().is_ok())
    };
    coordinate("lat") && coordinate("lon")
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="Overpass API 0.7.61">
<note>The data included in this document is from www.openstreetmap.org. The data is made available under ODbL.</note>
<meta osm_base="2024-05-01T12:00:00Z" areas="2024-04-30T08:15:00Z"/>
  <node id="1" lat="51.5" lon="-0.12">
    <tag k="amenity" v="cafe"/>
  </node>
  <node id="2"/>
  <way id="10">
    <nd ref="1"/>
    <nd ref="2"/>
  </way>
  <way id="11">
    <bounds minlat="0" minlon="0" maxlat="1" maxlon="1"/>
    <nd ref="1" lat="51.5" lon="-0.12"/>
  </way>
  <relation id="20">
    <member type="way" ref="10" role="outer">
      <nd lat="51.5" lon="-0.12"/>
    </member>
  </relation>
  <relation id="21">
    <tag k="type" v="multipolygon"/>
  </relation>
  <area id="3600000001">
    <tag k="name" v="Somewhere"/>
  </area>
</osm>
"#;

    #[test]
    fn test_elements() {
        let doc = Document::parse(XML_RESPONSE).unwrap();
        let elements = elements(&doc);

        let kinds: Vec<&str> = elements.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["node", "node", "way", "way", "relation", "relation", "area"]
        );

        assert!(elements[0].has_coordinates);
        assert_eq!(elements[0].tags.get("amenity").map(String::as_str), Some("cafe"));
        assert!(!elements[1].has_coordinates);

        assert!(elements[2].has_members);
        assert!(!elements[2].has_coordinates);
        assert!(elements[3].has_members);
        assert!(elements[3].has_coordinates);

        assert!(elements[4].has_members);
        assert!(elements[4].has_coordinates);
        assert!(!elements[5].has_members);
        assert!(!elements[5].has_coordinates);

        assert_eq!(elements[6].id, Some(3600000001));
        assert!(!elements[6].has_coordinates);
    }

    #[test]
    fn test_meta() {
        let doc = Document::parse(XML_RESPONSE).unwrap();
        let meta = meta(&doc);

        assert!(meta.timestamp_osm_base.is_some());
        assert!(meta.timestamp_areas_base.is_some());
        assert!(meta.copyright.unwrap().starts_with("The data included"));
    }

    #[test]
    fn test_remark() {
        let doc = Document::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?><osm><remark> runtime error: Query timed out </remark></osm>"#,
        )
        .unwrap();
        assert_eq!(
            remark(&doc).as_deref(),
            Some("runtime error: Query timed out")
        );
        assert!(elements(&doc).is_empty());

        let doc = Document::parse(r#"<osm><remark>   </remark></osm>"#).unwrap();
        assert_eq!(remark(&doc), None);
    }

    #[test]
    fn test_other_children() {
        let doc = Document::parse(
            r#"<osm><count id="0"><tag k="total" v="5"/></count></osm>"#,
        )
        .unwrap();
        let elements = elements(&doc);

        assert_eq!(
            elements,
            vec![Element::new(ElementKind::Other("count".to_string()), Some(0)).with_tag("total", "5")]
        );
    }

    #[test]
    fn test_remark_with_inline_markup() {
        let doc = Document::parse(
            r#"<?xml version="1.0"?><osm><remark>runtime error: <b>bad</b> query at line 3</remark></osm>"#,
        )
        .unwrap();
        assert_eq!(
            remark(&doc).as_deref(),
            Some("runtime error: bad query at line 3")
        );
    }

    #[test]
    fn test_elements_need_osm_root() {
        let doc = Document::parse(r#"<?xml version="1.0"?><result><osm/><foo/><bar/></result>"#)
            .unwrap();
        assert!(elements(&doc).is_empty());
    }

    #[test]
    fn test_coordinates_must_be_numeric() {
        let doc = Document::parse(
            r#"<osm><node id="1" lat="x" lon="y"/><node id="2" lat="1.5" lon="-2"/></osm>"#,
        )
        .unwrap();
        let elements = elements(&doc);

        assert!(!elements[0].has_coordinates);
        assert!(elements[1].has_coordinates);
    }

    #[test]
    fn test_exceeds_depth() {
        assert!(!exceeds_depth(XML_RESPONSE, MAX_NESTING_DEPTH));
        assert!(!exceeds_depth(&"<nd ref=\"1\"/>".repeat(10_000), 3));
        assert!(!exceeds_depth("<a x=\"/>\"><b>text</b></a>", 2));
        assert!(exceeds_depth(&"<a>".repeat(4), 3));
        assert!(exceeds_depth(&format!("<osm>{}", "<a>".repeat(100_000)), MAX_NESTING_DEPTH));
    }
}
