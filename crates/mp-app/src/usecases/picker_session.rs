//! Picker session: one mounted picker widget.
//!
//! Wires a [`PaginationController`] and a [`SelectionManager`] to the same
//! host observer and translates presentation intents (mount, scroll near the
//! end, tap, filter change, unmount) into calls on them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mp_core::ports::{AssetSourcePort, PickerEventPort};
use mp_core::{
    should_load_more, AlbumName, AssetKindFilter, AssetUri, PickerConfig, PickerConfigError,
    ToggleOutcome,
};
use tracing::{info, info_span, Instrument};

use super::pagination_controller::{FetchOutcome, InitializeOutcome, PaginationController};
use super::selection_manager::SelectionManager;

#[derive(Debug, thiserror::Error)]
pub enum PickerSessionError {
    #[error("invalid picker configuration: {0}")]
    InvalidConfig(#[from] PickerConfigError),
}

pub struct PickerSession {
    config: PickerConfig,
    pagination: PaginationController,
    selection: Mutex<SelectionManager>,
}

impl PickerSession {
    /// Build a session for a freshly mounted picker.
    ///
    /// Seeds `initial_selection` but does not fetch; call [`start`](Self::start).
    pub fn mount(
        config: PickerConfig,
        source: Arc<dyn AssetSourcePort>,
        events: Arc<dyn PickerEventPort>,
    ) -> Result<Self, PickerSessionError> {
        config.validate()?;

        let pagination =
            PaginationController::new(source, events.clone(), config.page_size, config.filter());

        let mut selection = SelectionManager::new(config.maximum_selection, events);
        selection.set_enabled(config.can_select);
        selection.seed(config.initial_selection.iter().cloned());

        info!(
            page_size = config.page_size,
            maximum = config.maximum_selection,
            kind = ?config.asset_kind,
            album = ?config.album,
            "Picker mounted"
        );

        Ok(Self {
            config,
            pagination,
            selection: Mutex::new(selection),
        })
    }

    /// Initial load for the current filter.
    ///
    /// When `preselect_first_asset` is on, the resolved first asset is added
    /// to the selection (without a change notification).
    pub async fn start(&self) -> InitializeOutcome {
        let span = info_span!("usecase.picker_session.start");

        async {
            loop {
                let outcome = self
                    .pagination
                    .initialize(self.config.prime_first_asset)
                    .await;

                // The filter changed under us; load the new one instead.
                if outcome.page == FetchOutcome::Discarded && !self.pagination.is_primed() {
                    continue;
                }

                if self.config.preselect_first_asset {
                    if let Some(asset) = &outcome.first_asset {
                        self.lock_selection().seed([asset.uri.clone()]);
                    }
                }
                return outcome;
            }
        }
        .instrument(span)
        .await
    }

    /// Presentation reached its end threshold.
    pub async fn load_more(&self) -> FetchOutcome {
        let outcome = self.pagination.fetch_next().await;
        if outcome == FetchOutcome::Discarded && !self.pagination.is_primed() {
            return self.start().await.page;
        }
        outcome
    }

    /// Scroll position changed. Loads the next page once the remaining
    /// distance drops under `end_reached_threshold` viewports.
    ///
    /// Returns `None` when the threshold was not crossed.
    pub async fn on_scroll(&self, distance_from_end: f32, viewport_len: f32) -> Option<FetchOutcome> {
        if !should_load_more(
            distance_from_end,
            viewport_len,
            self.config.end_reached_threshold,
        ) {
            return None;
        }
        Some(self.load_more().await)
    }

    /// User tapped the tile for `asset_uri`.
    ///
    /// Ids that are not loaded can still be toggled; their notification
    /// carries no asset record.
    pub fn tap(&self, asset_uri: &AssetUri) -> ToggleOutcome {
        let asset = self.pagination.find(asset_uri.as_str());
        self.lock_selection().toggle_asset(asset_uri, asset)
    }

    /// User tapped the tile at `index` in the loaded list.
    pub fn tap_index(&self, index: usize) -> Option<ToggleOutcome> {
        let asset = self.pagination.item(index)?;
        let uri = asset.uri.clone();
        Some(self.lock_selection().toggle_asset(&uri, Some(asset)))
    }

    /// Switch album. Returns `None` when the album did not change.
    pub async fn set_album_filter(&self, album: Option<AlbumName>) -> Option<InitializeOutcome> {
        let mut filter = self.pagination.filter();
        if filter.album == album {
            return None;
        }
        filter.album = album;
        self.pagination.reset_for_filter_change(filter);
        Some(self.start().await)
    }

    /// Switch asset kind. Returns `None` when the kind did not change.
    pub async fn set_kind_filter(&self, kind: AssetKindFilter) -> Option<InitializeOutcome> {
        let mut filter = self.pagination.filter();
        if filter.kind == kind {
            return None;
        }
        filter.kind = kind;
        self.pagination.reset_for_filter_change(filter);
        Some(self.start().await)
    }

    pub fn set_can_select(&self, can_select: bool) {
        self.lock_selection().set_enabled(can_select);
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selected(&self) -> Vec<AssetUri> {
        self.lock_selection().selected()
    }

    pub fn order(&self, asset_uri: &str) -> usize {
        self.lock_selection().order(asset_uri)
    }

    pub fn is_selected(&self, asset_uri: &str) -> bool {
        self.lock_selection().is_selected(asset_uri)
    }

    /// Tear the picker down and hand the final selection back.
    pub fn unmount(self) -> Vec<AssetUri> {
        let selection = self
            .selection
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_selection();
        info!(selected = selection.len(), loaded = self.pagination.len(), "Picker unmounted");
        selection
    }

    fn lock_selection(&self) -> MutexGuard<'_, SelectionManager> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
