//! Shared fixtures for the integration tests: canned Overpass API bodies
//! and a helper that points a configuration at a mock server.

use overpass_response::OverpassConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/osm3s+xml";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A small dataset with one drawable node, one way without geometry and an area
pub const JSON_DATASET: &str = r#"{
  "version": 0.6,
  "generator": "Overpass API 0.7.62",
  "osm3s": {
    "timestamp_osm_base": "2024-05-01T12:00:00Z",
    "timestamp_areas_base": "2024-04-30T08:00:00Z",
    "copyright": "The data included in this document is from www.openstreetmap.org. The data is made available under ODbL."
  },
  "elements": [
    {"type": "node", "id": 1, "lat": 52.5, "lon": 13.4, "tags": {"amenity": "cafe"}},
    {"type": "way", "id": 2, "nodes": [1, 3]},
    {"type": "area", "id": 3600062422}
  ]
}"#;

pub const JSON_TIMEOUT_REMARK: &str = r#"{
  "version": 0.6,
  "elements": [],
  "remark": "runtime error: Query timed out in \"query\" at line 3 after 26 seconds."
}"#;

pub const XML_DATASET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="Overpass API 0.7.62">
<note>The data included in this document is from www.openstreetmap.org. The data is made available under ODbL.</note>
<meta osm_base="2024-05-01T12:00:00Z"/>
  <node id="1" lat="52.5" lon="13.4">
    <tag k="amenity" v="cafe"/>
  </node>
</osm>"#;

/// The page the interpreter sends back for a parse error
pub const HTML_SYNTAX_ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
<head>
  <meta http-equiv="content-type" content="text/html; charset=utf-8" lang="en"/>
  <title>OSM3S Response</title>
</head>
<body>

<p>The data included in this document is from www.openstreetmap.org. The data is made available under ODbL.</p>
<p><strong style="color:#FF0000">Error</strong>: line 2: parse error: ';' expected - ')' found. </p>

</body>
</html>"#;

pub const HTML_RATE_LIMITED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html>
<body>
<p><strong style="color:#FF0000">Error</strong>: runtime error: open64: 0 Success /osm3s_v0.7.62_osm_base Dispatcher_Client::request_read_and_idx::rate_limited. Please check /api/status for the quota of your IP address. </p>
</body>
</html>"#;

/// Configuration pointing at a mock server's `/api/` path
pub fn config_for(server_uri: &str) -> OverpassConfig {
    OverpassConfig {
        timeout_seconds: 5,
        ..OverpassConfig::default().with_server(format!("{server_uri}/api/"))
    }
}

/// Write a turbo.toml for the given server into `dir`
pub fn write_config(dir: &Path, server_uri: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("turbo.toml");
    fs::write(
        &path,
        format!("server = \"{server_uri}/api/\"\ntimeout_seconds = 5\nkill_on_abort = true\n"),
    )?;
    Ok(path)
}
