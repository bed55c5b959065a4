//! Pagination state.
//!
//! 分页状态：只负责状态迁移，不发起任何请求。

use crate::asset::Asset;
use crate::page::{AssetFilter, Cursor, PageRequest, PageResult};

/// Proof that the holder owns the single in-flight fetch slot.
///
/// Carries the filter generation the fetch was issued under, so a result that
/// arrives after a filter reset can be recognised as stale.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened when a page result was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum PageApplied {
    /// Assets were appended (possibly zero of them).
    Appended { items: Vec<Asset>, exhausted: bool },
    /// The filter changed while the fetch was running; the result was dropped.
    Stale,
}

/// Growing, append-only view of one filter configuration.
///
/// Invariants:
/// - at most one fetch is in flight (`try_claim` refuses a second one);
/// - `exhausted` never goes back to `false` until the next `reset`;
/// - `items` only grows until the next `reset`.
#[derive(Debug, Clone)]
pub struct PaginationState {
    items: Vec<Asset>,
    cursor: Cursor,
    exhausted: bool,
    fetch_in_flight: bool,
    primed: bool,
    total_count: Option<u64>,
    generation: u64,
    filter: AssetFilter,
}

impl PaginationState {
    pub fn new(filter: AssetFilter) -> Self {
        Self {
            items: Vec::new(),
            cursor: Cursor::Start,
            exhausted: false,
            fetch_in_flight: false,
            primed: false,
            total_count: None,
            generation: 0,
            filter,
        }
    }

    /// Claim the fetch slot. Returns `None` while another fetch is running.
    pub fn try_claim(&mut self) -> Option<FetchTicket> {
        if self.fetch_in_flight {
            return None;
        }
        self.fetch_in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Release the fetch slot. Called exactly once per successful `try_claim`.
    pub fn finish_fetch(&mut self) {
        self.fetch_in_flight = false;
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Request for the next page, or `None` once the source is exhausted.
    pub fn next_page_request(&self, page_size: usize) -> Option<PageRequest> {
        if self.exhausted {
            return None;
        }
        Some(PageRequest::page(
            page_size,
            self.cursor.clone(),
            &self.filter,
        ))
    }

    pub fn first_asset_request(&self) -> PageRequest {
        PageRequest::first_asset(self.filter.kind)
    }

    /// Record that the first-asset preview step ran for this generation.
    pub fn mark_primed(&mut self, ticket: &FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.primed = true;
        true
    }

    /// Merge a page into the collection.
    ///
    /// An empty page with `has_more == true` is a valid, non-terminal page:
    /// the cursor still advances.
    pub fn apply_page(&mut self, ticket: &FetchTicket, result: PageResult) -> PageApplied {
        if !self.is_current(ticket) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                issued = ticket.generation,
                current = self.generation,
                "Dropping page fetched under a previous filter"
            );
            return PageApplied::Stale;
        }

        let PageResult {
            assets,
            has_more,
            next_cursor,
            total_count,
        } = result;

        self.items.extend(assets.iter().cloned());
        self.cursor = next_cursor;
        self.total_count = Some(total_count);
        if !has_more {
            self.exhausted = true;
        }

        PageApplied::Appended {
            items: assets,
            exhausted: self.exhausted,
        }
    }

    /// Drop everything loaded under the old filter and switch to `filter`.
    ///
    /// A fetch that is still in flight keeps its slot until it settles; its
    /// result will be reported as [`PageApplied::Stale`].
    pub fn reset(&mut self, filter: AssetFilter) {
        self.items.clear();
        self.cursor = Cursor::Start;
        self.exhausted = false;
        self.primed = false;
        self.total_count = None;
        self.generation += 1;
        self.filter = filter;
    }

    pub fn items(&self) -> &[Asset] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &AssetFilter {
        &self.filter
    }

    /// Stable list key for the item at `index`.
    pub fn item_key(&self, index: usize) -> Option<String> {
        self.items
            .get(index)
            .map(|asset| format!("{}__{}", asset.uri, index))
    }
}
