//! Port interfaces for the application layer
//!
//! Ports define the contract between the picker use cases and whatever hosts
//! them. The asset source is implemented by infrastructure (an OS media
//! store, a manifest file, a test double); the event port is implemented by
//! the presentation/host side.

pub mod asset_source;
pub mod picker_events;


pub use asset_source::{AssetSourceError, AssetSourcePort};
pub use picker_events::{PickerEvent, PickerEventPort};
