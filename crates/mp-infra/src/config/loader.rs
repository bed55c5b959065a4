use std::path::{Path, PathBuf};

use anyhow::Context;
use mp_core::PickerConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    picker: PickerConfig,
}

/// `<config dir>/media-picker/picker.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("media-picker").join("picker.toml"))
}

pub fn parse_picker_config(content: &str) -> anyhow::Result<PickerConfig> {
    let file: ConfigFile = toml::from_str(content).context("Failed to parse config as TOML")?;
    Ok(file.picker)
}

/// Load picker configuration from a TOML file.
///
/// # Errors / 错误
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_picker_config(config_path: &Path) -> anyhow::Result<PickerConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    parse_picker_config(&content)
}
