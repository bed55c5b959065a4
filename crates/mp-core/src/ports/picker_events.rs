use crate::asset::Asset;
use crate::ids::AssetUri;
use crate::ports::AssetSourceError;

/// Notifications the picker sends to its host.
///
/// 选择器发给宿主的通知。宿主自行决定何时刷新界面。
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// Newest asset resolved for the host preview.
    FirstAssetResolved(Asset),

    /// A page was merged; `items` holds only the new assets.
    PageAppended { items: Vec<Asset>, exhausted: bool },

    /// Fired on every toggle, including rejected ones.
    ///
    /// `triggering_asset` is the loaded record for `triggering`, or `None`
    /// when the toggled id is not in the loaded list.
    SelectionChanged {
        selection: Vec<AssetUri>,
        triggering: AssetUri,
        triggering_asset: Option<Asset>,
    },

    /// A toggle was rejected because the selection is full.
    MaximumReached { maximum: usize },

    FetchFailed(AssetSourceError),
}

impl PickerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PickerEvent::FirstAssetResolved(_) => "first_asset_resolved",
            PickerEvent::PageAppended { .. } => "page_appended",
            PickerEvent::SelectionChanged { .. } => "selection_changed",
            PickerEvent::MaximumReached { .. } => "maximum_reached",
            PickerEvent::FetchFailed(_) => "fetch_failed",
        }
    }
}

/// Host-side observer.
///
/// `emit` is called synchronously from inside picker operations and must not
/// block.
pub trait PickerEventPort: Send + Sync {
    fn emit(&self, event: PickerEvent);
}
