//! # Picker configuration / 选择器配置
//!
//! Recognized options for one picker widget. Defaults live in
//! [`defaults`]; loading from disk lives in `mp-infra`.

mod defaults;
pub mod picker_config;

pub use picker_config::{PickerConfig, PickerConfigError};
