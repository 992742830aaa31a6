use crate::error::{OverpassError, Result};
use std::fs;
use std::path::Path;

/// Generate default turbo.toml template with comments
pub fn generate_default_config_template() -> String {
    format!(
        r#"# Turbo configuration
# Settings used when submitting queries to an Overpass API instance

# Base URL of the Overpass API (the interpreter endpoint is resolved below it)
server = "{server}"

# Request timeout in seconds
timeout_seconds = {timeout}

# User agent sent with every request
user_agent = "turbo/{version}"

# Ask the server to kill running queries when a query is aborted or superseded
kill_on_abort = true

# Responses larger than this many bytes ask for confirmation before processing
large_response_threshold = {threshold}
"#,
        server = super::types::DEFAULT_SERVER,
        timeout = super::types::DEFAULT_TIMEOUT_SECONDS,
        version = env!("CARGO_PKG_VERSION"),
        threshold = crate::types::DEFAULT_LARGE_RESPONSE_THRESHOLD,
    )
}

/// Write the default configuration if the file does not exist yet (or `force` is set).
///
/// Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(config_path: P, force: bool) -> Result<bool> {
    let config_path = config_path.as_ref();

    if config_path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(OverpassError::Io)?;
        }
    }

    fs::write(config_path, generate_default_config_template()).map_err(OverpassError::Io)?;
    Ok(true)
}
