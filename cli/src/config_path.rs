use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "turbo.toml";

/// Resolve the configuration path: an explicit `--config` wins, then the
/// per-user config directory, then the working directory.
pub fn resolve(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join("turbo").join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(resolve(Some("custom.toml")), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_default_path_file_name() {
        let path = resolve(None);
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(CONFIG_FILE_NAME)
        );
    }
}
