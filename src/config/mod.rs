//! Configuration management
//!
//! Every field has a default matching the stock markup, so an empty config
//! (or a JS object with only some fields) is valid.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherConfig {
    /// localStorage key holding the chosen theme
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_toggle_id")]
    pub toggle_id: String,

    #[serde(default = "default_menu_id")]
    pub menu_id: String,

    #[serde(default = "default_option_selector")]
    pub option_selector: String,

    /// Container holding toggle and panel; clicks outside it close the menu
    #[serde(default = "default_dropdown_selector")]
    pub dropdown_selector: String,

    /// Class put on the panel while the menu is open
    #[serde(default = "default_open_class")]
    pub open_class: String,

    /// Attribute on each option carrying its theme id
    #[serde(default = "default_theme_attribute")]
    pub theme_attribute: String,
}

fn default_storage_key() -> String {
    "preferredTheme".to_string()
}

fn default_toggle_id() -> String {
    "themeToggle".to_string()
}

fn default_menu_id() -> String {
    "themeMenu".to_string()
}

fn default_option_selector() -> String {
    ".theme-menu button".to_string()
}

fn default_dropdown_selector() -> String {
    ".theme-dropdown".to_string()
}

fn default_open_class() -> String {
    "show".to_string()
}

fn default_theme_attribute() -> String {
    "data-theme".to_string()
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            toggle_id: default_toggle_id(),
            menu_id: default_menu_id(),
            option_selector: default_option_selector(),
            dropdown_selector: default_dropdown_selector(),
            open_class: default_open_class(),
            theme_attribute: default_theme_attribute(),
        }
    }
}

/// Config file base name (extension picks the format: toml, json, yaml, ...)
#[cfg(feature = "cli")]
const CONFIG_FILE_NAME: &str = "theme-switcher";

/// Get config directory (THEME_SWITCHER_CONFIG_DIR or the current directory)
#[cfg(feature = "cli")]
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("THEME_SWITCHER_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }
    std::path::PathBuf::from(".")
}

/// Load config for native tools: defaults, then an optional config file,
/// then `THEME_SWITCHER_*` environment variables.
#[cfg(feature = "cli")]
pub fn load_config() -> anyhow::Result<SwitcherConfig> {
    let config_dir = get_config_dir();

    let config = ::config::Config::builder()
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join(CONFIG_FILE_NAME).to_string_lossy())
                .required(false),
        )
        // Override with environment variables (THEME_SWITCHER_STORAGE_KEY, etc.)
        .add_source(
            ::config::Environment::with_prefix("THEME_SWITCHER")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
