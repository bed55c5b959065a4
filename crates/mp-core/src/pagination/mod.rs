//! Pagination domain module.
//!
//! Pure state for incremental asset loading. The async driver lives in
//! `mp-app`; everything here is synchronous and side-effect free.

pub mod state;
pub mod threshold;

pub use state::{FetchTicket, PageApplied, PaginationState};
pub use threshold::should_load_more;
