//! # mp-core
//!
//! Core domain models and business logic for the media picker.
//!
//! This crate contains the pagination and selection state machines plus the
//! ports they talk through. It has no infrastructure dependencies.

pub mod asset;
pub mod config;
pub mod ids;
pub mod page;
pub mod pagination;
pub mod ports;
pub mod selection;

pub use asset::{Asset, AssetKind, AssetKindFilter};
pub use config::{PickerConfig, PickerConfigError};
pub use ids::{AlbumName, AssetUri};
pub use page::{AssetFilter, Cursor, PageRequest, PageResult};
pub use pagination::{should_load_more, FetchTicket, PageApplied, PaginationState};
pub use selection::{SeedReport, SelectionState, ToggleOutcome};
