//! Localizer configuration: settings, validation, and the optional `.l10n.json` file.
mod loader;
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
    load_settings,
};
pub use types::{
    ConfigError,
    LocalizerSettings,
    ValidationError,
};
