//! Asset records as the picker core sees them.
//!
//! Sources normalize whatever shape their backend returns into [`Asset`]
//! before handing it over; the core only ever reads `uri`, `kind` and
//! `duration_seconds`. The remaining fields ride along for presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AlbumName, AssetUri};

/// Media kind of a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Photo,
    Video,
}

/// Which kinds a page request should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKindFilter {
    Photo,
    Video,
    #[default]
    All,
}

impl AssetKindFilter {
    pub fn matches(self, kind: AssetKind) -> bool {
        match self {
            AssetKindFilter::All => true,
            AssetKindFilter::Photo => kind == AssetKind::Photo,
            AssetKindFilter::Video => kind == AssetKind::Video,
        }
    }
}

/// One media item fetched from an asset source.
///
/// Immutable once fetched; owned by the pagination state for the widget's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub uri: AssetUri,
    pub kind: AssetKind,

    /// Playback length, only meaningful for videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumName>,

    /// Capture time reported by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn photo(uri: impl Into<AssetUri>) -> Self {
        Self::bare(uri.into(), AssetKind::Photo, None)
    }

    pub fn video(uri: impl Into<AssetUri>, duration_seconds: Option<f64>) -> Self {
        Self::bare(uri.into(), AssetKind::Video, duration_seconds)
    }

    fn bare(uri: AssetUri, kind: AssetKind, duration_seconds: Option<f64>) -> Self {
        Self {
            uri,
            kind,
            // Photos never carry a duration, whatever the source claims.
            duration_seconds: duration_seconds.filter(|_| kind == AssetKind::Video),
            width: None,
            height: None,
            filename: None,
            album: None,
            timestamp: None,
        }
    }

    pub fn with_album(mut self, album: impl Into<AlbumName>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == AssetKind::Video
    }
}
