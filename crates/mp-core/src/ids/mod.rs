//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifier of one asset, unique within a picker session.
///
/// The source hands us a URI (`ph://…`, `content://…`, `file://…`); we never
/// parse it, only compare it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetUri(String);

/// Album (asset group) name used to narrow a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumName(String);

impl_id!(AssetUri, AlbumName);
