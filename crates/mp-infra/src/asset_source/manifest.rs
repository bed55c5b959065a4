//! # Gallery manifest source / 图库清单数据源
//!
//! Reads a JSON gallery export and serves it page by page.
//!
//! Two record shapes show up in exported galleries and both are accepted:
//!
//! ```json
//! { "uri": "file:///a.jpg", "type": "photo", "group_name": "Camera" }
//! { "node": { "type": "video", "group_name": "Camera",
//!             "image": { "uri": "file:///b.mp4", "playableDuration": 12.0 } } }
//! ```
//!
//! Normalization into [`Asset`] happens here so the picker core only ever
//! sees one shape.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mp_core::ports::{AssetSourceError, AssetSourcePort};
use mp_core::{Asset, AssetKind, PageRequest, PageResult};
use serde::Deserialize;

use super::in_memory::InMemoryAssetSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Wrapped { assets: Vec<ManifestRecord> },
    Bare(Vec<ManifestRecord>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestRecord {
    Nested { node: NestedNode },
    Flat(FlatRecord),
}

#[derive(Debug, Deserialize)]
struct NestedNode {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    timestamp: Option<f64>,
    image: NestedImage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedImage {
    uri: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    playable_duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FlatRecord {
    uri: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default, alias = "playableDuration")]
    duration: Option<f64>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default, alias = "album")]
    group_name: Option<String>,
    #[serde(default)]
    timestamp: Option<f64>,
}

/// Raw fields shared by both record shapes.
struct RawAsset {
    uri: String,
    kind: Option<String>,
    duration: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
    filename: Option<String>,
    album: Option<String>,
    timestamp: Option<f64>,
}

impl From<ManifestRecord> for RawAsset {
    fn from(record: ManifestRecord) -> Self {
        match record {
            ManifestRecord::Nested { node } => RawAsset {
                uri: node.image.uri,
                kind: node.kind,
                duration: node.image.playable_duration,
                width: node.image.width,
                height: node.image.height,
                filename: node.image.filename,
                album: node.group_name,
                timestamp: node.timestamp,
            },
            ManifestRecord::Flat(flat) => RawAsset {
                uri: flat.uri,
                kind: flat.kind,
                duration: flat.duration,
                width: flat.width,
                height: flat.height,
                filename: flat.filename,
                album: flat.group_name,
                timestamp: flat.timestamp,
            },
        }
    }
}

/// `video`, `Video`, `ALAssetTypeVideo` and `video/mp4` all mean video;
/// anything else, including a missing type, is a photo.
fn parse_kind(kind: Option<&str>) -> AssetKind {
    match kind {
        Some(kind) if kind.to_ascii_lowercase().contains("video") => AssetKind::Video,
        _ => AssetKind::Photo,
    }
}

fn parse_timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.trunc() as i64;
    let nanos = ((seconds - seconds.trunc()) * 1e9).round() as u32;
    DateTime::from_timestamp(whole, nanos.min(999_999_999))
}

fn normalize(raw: RawAsset) -> Asset {
    let mut asset = match parse_kind(raw.kind.as_deref()) {
        AssetKind::Video => Asset::video(raw.uri, raw.duration),
        AssetKind::Photo => Asset::photo(raw.uri),
    };
    asset.width = raw.width;
    asset.height = raw.height;
    asset.filename = raw.filename;
    asset.album = raw.album.map(Into::into);
    asset.timestamp = raw.timestamp.and_then(parse_timestamp);
    asset
}

/// Asset source backed by a JSON manifest loaded once at construction.
pub struct ManifestAssetSource {
    inner: InMemoryAssetSource,
}

impl ManifestAssetSource {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: ManifestFile =
            serde_json::from_str(json).context("Failed to parse gallery manifest")?;
        let records = match file {
            ManifestFile::Wrapped { assets } => assets,
            ManifestFile::Bare(assets) => assets,
        };
        let assets: Vec<Asset> = records
            .into_iter()
            .map(|record| normalize(record.into()))
            .collect();

        tracing::info!(assets = assets.len(), "Gallery manifest loaded");
        Ok(Self {
            inner: InMemoryAssetSource::new(assets),
        })
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gallery manifest: {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl AssetSourcePort for ManifestAssetSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult, AssetSourceError> {
        self.inner.fetch_page(request).await
    }
}
