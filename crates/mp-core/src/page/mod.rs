//! Page request/response types exchanged with an asset source.

use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetKindFilter};
use crate::ids::AlbumName;

/// Opaque continuation position inside a source.
///
/// Offset-based sources use [`Cursor::Offset`], token-based ones
/// [`Cursor::Token`]. The core never interprets either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Start,
    Offset(u64),
    Token(String),
}

/// Active filter configuration. Changing it resets pagination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetFilter {
    pub kind: AssetKindFilter,
    pub album: Option<AlbumName>,
}

impl AssetFilter {
    pub fn new(kind: AssetKindFilter, album: Option<AlbumName>) -> Self {
        Self { kind, album }
    }
}

/// One fetch call against the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Always at least 1.
    pub limit: usize,
    pub cursor: Cursor,
    pub kind: AssetKindFilter,
    pub album: Option<AlbumName>,
}

impl PageRequest {
    pub fn page(limit: usize, cursor: Cursor, filter: &AssetFilter) -> Self {
        Self {
            limit: limit.max(1),
            cursor,
            kind: filter.kind,
            album: filter.album.clone(),
        }
    }

    /// Single-item request used to prime the host preview.
    ///
    /// Keeps the kind filter but ignores the album, so the preview shows the
    /// newest asset of the whole library.
    pub fn first_asset(kind: AssetKindFilter) -> Self {
        Self {
            limit: 1,
            cursor: Cursor::Start,
            kind,
            album: None,
        }
    }
}

/// Source reply to one [`PageRequest`].
///
/// `has_more == false` is terminal for the filter the request was made with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub assets: Vec<Asset>,
    pub has_more: bool,
    pub next_cursor: Cursor,
    pub total_count: u64,
}

impl PageResult {
    pub fn last(assets: Vec<Asset>, total_count: u64) -> Self {
        Self {
            assets,
            has_more: false,
            next_cursor: Cursor::Start,
            total_count,
        }
    }
}
