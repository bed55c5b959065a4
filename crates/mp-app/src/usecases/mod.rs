//! Picker use cases
//!
//! [AssetSourcePort]
//         ↓
// PaginationController   → PageAppended / FirstAssetResolved / FetchFailed
//         ↓
// PickerSession           ← tap / load_more / filter change from presentation
//         ↓
// SelectionManager        → SelectionChanged / MaximumReached

pub mod pagination_controller;
pub mod picker_session;
pub mod selection_manager;

pub use pagination_controller::{FetchOutcome, InitializeOutcome, PaginationController};
pub use picker_session::{PickerSession, PickerSessionError};
pub use selection_manager::SelectionManager;
