//! # Configuration Loader / 配置加载器
//!
//! Reads the `[picker]` table of a TOML file into [`PickerConfig`].
//! Missing keys fall back to the defaults; validation happens at mount.

mod loader;

pub use loader::{default_config_path, load_picker_config, parse_picker_config};
