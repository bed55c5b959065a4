use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::AssetKindFilter;
use crate::ids::{AlbumName, AssetUri};
use crate::page::AssetFilter;

/// Options recognized by the picker.
///
/// `column_count` and `end_reached_threshold` belong to the presentation
/// layer; the core only passes them through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Assets requested per page.
    pub page_size: usize,

    /// Hard cap on the selection size.
    pub maximum_selection: usize,

    pub asset_kind: AssetKindFilter,

    /// Narrow the source to one album. Changing it resets pagination.
    pub album: Option<AlbumName>,

    pub column_count: u32,

    /// Ids selected at mount, in selection order.
    pub initial_selection: Vec<AssetUri>,

    /// Fraction of a viewport from the end at which presentation asks for more.
    pub end_reached_threshold: f32,

    /// When false, taps still notify the host but never change the selection.
    pub can_select: bool,

    /// Resolve the newest asset for the host preview before the first page.
    pub prime_first_asset: bool,

    /// Add the resolved first asset to the selection.
    pub preselect_first_asset: bool,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerConfigError {
    #[error("page_size must be at least 1")]
    ZeroPageSize,

    #[error("maximum_selection must be at least 1")]
    ZeroMaximumSelection,

    #[error("column_count must be at least 1")]
    ZeroColumns,

    #[error("end_reached_threshold must be within 0..=1, got {0}")]
    ThresholdOutOfRange(f32),
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), PickerConfigError> {
        if self.page_size == 0 {
            return Err(PickerConfigError::ZeroPageSize);
        }
        if self.maximum_selection == 0 {
            return Err(PickerConfigError::ZeroMaximumSelection);
        }
        if self.column_count == 0 {
            return Err(PickerConfigError::ZeroColumns);
        }
        if !(0.0..=1.0).contains(&self.end_reached_threshold) {
            return Err(PickerConfigError::ThresholdOutOfRange(
                self.end_reached_threshold,
            ));
        }
        Ok(())
    }

    pub fn filter(&self) -> AssetFilter {
        AssetFilter::new(self.asset_kind, self.album.clone())
    }
}
