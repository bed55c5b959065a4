use crate::asset::AssetKindFilter;

use super::picker_config::PickerConfig;

pub const DEFAULT_PAGE_SIZE: usize = 90;
pub const DEFAULT_MAXIMUM_SELECTION: usize = 8;
pub const DEFAULT_COLUMN_COUNT: u32 = 3;
pub const DEFAULT_END_REACHED_THRESHOLD: f32 = 0.8;

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            maximum_selection: DEFAULT_MAXIMUM_SELECTION,
            asset_kind: AssetKindFilter::All,
            album: None,
            column_count: DEFAULT_COLUMN_COUNT,
            initial_selection: Vec::new(),
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            can_select: true,
            prime_first_asset: true,
            preselect_first_asset: false,
        }
    }
}
