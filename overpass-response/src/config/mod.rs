pub mod loader;
pub mod templates;
pub mod types;

pub use loader::{validate, ConfigLoader, DefaultConfigLoader};
pub use templates::{ensure_config_file_exists, generate_default_config_template};
pub use types::{OverpassConfig, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECONDS};
