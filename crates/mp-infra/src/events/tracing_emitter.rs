use mp_core::ports::{PickerEvent, PickerEventPort};
use tracing::{info, warn};

/// Logs every picker event. Useful as a default observer and in demos.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventEmitter;

impl PickerEventPort for TracingEventEmitter {
    fn emit(&self, event: PickerEvent) {
        match event {
            PickerEvent::FirstAssetResolved(asset) => {
                info!(uri = %asset.uri, kind = ?asset.kind, "First asset resolved");
            }
            PickerEvent::PageAppended { items, exhausted } => {
                info!(count = items.len(), exhausted, "Page appended");
            }
            PickerEvent::SelectionChanged {
                selection,
                triggering,
                triggering_asset,
            } => {
                info!(
                    selected = selection.len(),
                    triggering = %triggering,
                    kind = ?triggering_asset.as_ref().map(|asset| asset.kind),
                    "Selection changed"
                );
            }
            PickerEvent::MaximumReached { maximum } => {
                warn!(maximum, "Selection maximum reached");
            }
            PickerEvent::FetchFailed(err) => {
                warn!(error = %err, "Asset fetch failed");
            }
        }
    }
}
