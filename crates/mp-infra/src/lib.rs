pub mod asset_source;
pub mod config;
pub mod events;

pub use asset_source::{InMemoryAssetSource, ManifestAssetSource};
pub use config::{default_config_path, load_picker_config, parse_picker_config};
pub use events::{ChannelEventEmitter, TracingEventEmitter};
