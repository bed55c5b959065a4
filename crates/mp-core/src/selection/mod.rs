//! Selection domain module.
//!
//! Bounded, insertion-ordered selection of asset identifiers.

pub mod state;

pub use state::{SeedReport, SelectionState, ToggleOutcome};
