//! Media picker application layer
//!
//! This crate contains the use cases that drive the picker: loading pages
//! from an asset source and maintaining the bounded selection.

pub mod usecases;

pub use usecases::{
    FetchOutcome, InitializeOutcome, PaginationController, PickerSession, PickerSessionError,
    SelectionManager,
};
