//! Use case for maintaining the bounded selection
//! 维护有上限的选择集合

use std::sync::Arc;

use mp_core::ports::{PickerEvent, PickerEventPort};
use mp_core::{Asset, AssetUri, SeedReport, SelectionState, ToggleOutcome};
use tracing::{debug, warn};

/// Owns the selection and reports every change to the host.
///
/// Callers never get mutable access to the underlying set; they toggle and
/// query, and receive [`PickerEvent::SelectionChanged`] after each toggle.
pub struct SelectionManager {
    state: SelectionState,
    events: Arc<dyn PickerEventPort>,
}

impl SelectionManager {
    pub fn new(maximum: usize, events: Arc<dyn PickerEventPort>) -> Self {
        Self {
            state: SelectionState::new(maximum),
            events,
        }
    }

    /// Pre-populate the selection without notifying the host.
    ///
    /// Meant for mount time: restoring a previous choice or preselecting the
    /// first asset. Ids beyond the maximum are dropped with a warning.
    pub fn seed<I>(&mut self, ids: I) -> SeedReport
    where
        I: IntoIterator<Item = AssetUri>,
    {
        let report = self.state.seed(ids);
        if !report.dropped.is_empty() {
            warn!(
                maximum = self.state.maximum(),
                dropped = ?report.dropped,
                "Initial selection exceeds maximum, extra ids dropped"
            );
        }
        debug!(
            accepted = report.accepted,
            duplicates = report.duplicates,
            "Selection seeded"
        );
        report
    }

    /// Toggle `asset_id` in or out of the selection.
    ///
    /// Any identifier may be toggled, loaded or not. The host is notified
    /// with the full ordered selection on every call, rejected ones included;
    /// a rejection because of the cap additionally fires
    /// [`PickerEvent::MaximumReached`] first.
    pub fn toggle(&mut self, asset_id: &AssetUri) -> ToggleOutcome {
        self.toggle_asset(asset_id, None)
    }

    /// Same as [`toggle`](Self::toggle), attaching the tapped asset's record
    /// to the change notification.
    pub fn toggle_asset(&mut self, asset_id: &AssetUri, asset: Option<Asset>) -> ToggleOutcome {
        let outcome = self.state.toggle(asset_id);

        match outcome {
            ToggleOutcome::Selected { order } => {
                debug!(uri = %asset_id, order, "Asset selected");
            }
            ToggleOutcome::Deselected { previous_order } => {
                debug!(uri = %asset_id, previous_order, "Asset deselected");
            }
            ToggleOutcome::MaximumReached => {
                debug!(uri = %asset_id, maximum = self.state.maximum(), "Selection is full");
                self.events.emit(PickerEvent::MaximumReached {
                    maximum: self.state.maximum(),
                });
            }
            ToggleOutcome::Disabled => {
                debug!(uri = %asset_id, "Selection disabled, toggle ignored");
            }
        }

        self.events.emit(PickerEvent::SelectionChanged {
            selection: self.state.selected().to_vec(),
            triggering: asset_id.clone(),
            triggering_asset: asset,
        });

        outcome
    }

    /// 1-based selection number, 0 when not selected.
    pub fn order(&self, asset_id: &str) -> usize {
        self.state.order(asset_id)
    }

    pub fn is_selected(&self, asset_id: &str) -> bool {
        self.state.is_selected(asset_id)
    }

    pub fn selected(&self) -> Vec<AssetUri> {
        self.state.selected().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn maximum(&self) -> usize {
        self.state.maximum()
    }

    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Hand the final selection back, e.g. at unmount.
    pub fn into_selection(self) -> Vec<AssetUri> {
        self.state.into_selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::Sequence;

    mock! {
        Events {}

        impl PickerEventPort for Events {
            fn emit(&self, event: PickerEvent);
        }
    }

    fn uri(s: &str) -> AssetUri {
        AssetUri::from(s)
    }

    fn quiet_events() -> Arc<MockEvents> {
        let mut events = MockEvents::new();
        events.expect_emit().return_const(());
        Arc::new(events)
    }

    #[test]
    fn test_every_toggle_notifies_with_full_selection() {
        let mut events = MockEvents::new();
        let mut seq = Sequence::new();
        events
            .expect_emit()
            .withf(|event| {
                *event
                    == PickerEvent::SelectionChanged {
                        selection: vec![uri("a")],
                        triggering: uri("a"),
                        triggering_asset: None,
                    }
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        events
            .expect_emit()
            .withf(|event| {
                *event
                    == PickerEvent::SelectionChanged {
                        selection: vec![],
                        triggering: uri("a"),
                        triggering_asset: None,
                    }
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut manager = SelectionManager::new(8, Arc::new(events));
        manager.toggle(&uri("a"));
        manager.toggle(&uri("a"));
    }

    #[test]
    fn test_maximum_reached_fires_before_selection_changed() {
        let mut events = MockEvents::new();
        events
            .expect_emit()
            .withf(|event| matches!(event, PickerEvent::SelectionChanged { .. }))
            .times(2)
            .return_const(());

        let mut manager = SelectionManager::new(2, Arc::new(events));
        manager.toggle(&uri("A"));
        manager.toggle(&uri("B"));

        let mut rejected = MockEvents::new();
        let mut seq = Sequence::new();
        rejected
            .expect_emit()
            .withf(|event| *event == PickerEvent::MaximumReached { maximum: 2 })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        rejected
            .expect_emit()
            .withf(|event| {
                *event
                    == PickerEvent::SelectionChanged {
                        selection: vec![uri("A"), uri("B")],
                        triggering: uri("C"),
                        triggering_asset: None,
                    }
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        manager.events = Arc::new(rejected);

        assert_eq!(manager.toggle(&uri("C")), ToggleOutcome::MaximumReached);
        assert_eq!(manager.selected(), vec![uri("A"), uri("B")]);
    }

    #[test]
    fn test_disabled_toggle_still_notifies() {
        let mut events = MockEvents::new();
        events
            .expect_emit()
            .withf(|event| {
                *event
                    == PickerEvent::SelectionChanged {
                        selection: vec![],
                        triggering: uri("a"),
                        triggering_asset: None,
                    }
            })
            .times(1)
            .return_const(());

        let mut manager = SelectionManager::new(8, Arc::new(events));
        manager.set_enabled(false);

        assert_eq!(manager.toggle(&uri("a")), ToggleOutcome::Disabled);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_seed_does_not_notify_and_clamps() {
        let mut events = MockEvents::new();
        events.expect_emit().times(0);

        let mut manager = SelectionManager::new(2, Arc::new(events));
        let report = manager.seed([uri("a"), uri("b"), uri("c")]);

        assert_eq!(report.dropped, vec![uri("c")]);
        assert_eq!(manager.selected(), vec![uri("a"), uri("b")]);
        assert!(manager.is_full());
    }

    #[test]
    fn test_order_renumbers_after_removal() {
        let mut manager = SelectionManager::new(3, quiet_events());
        manager.toggle(&uri("a"));
        manager.toggle(&uri("b"));
        manager.toggle(&uri("c"));
        manager.toggle(&uri("b"));

        assert_eq!(manager.order("a"), 1);
        assert_eq!(manager.order("c"), 2);
        assert_eq!(manager.order("b"), 0);
        assert!(!manager.is_selected("b"));
        assert_eq!(manager.into_selection(), vec![uri("a"), uri("c")]);
    }
}
