use crate::config_path;
use crate::error::{ResultExt, Result};
use crate::ui;
use overpass_response::config::ensure_config_file_exists;

pub fn execute(config: Option<String>, force: bool) -> Result<()> {
    let path = config_path::resolve(config.as_deref());

    ui::section_header("Turbo Configuration Setup");
    let written = ensure_config_file_exists(&path, force)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if written {
        ui::success_message(&format!("Configuration written to {}", path.display()));
        ui::info_message("Edit `server` to point turbo at another Overpass API instance");
    } else {
        ui::warning_message(&format!(
            "{} already exists. Use --force to overwrite it",
            path.display()
        ));
    }

    Ok(())
}
