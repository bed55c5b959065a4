use async_trait::async_trait;
use thiserror::Error;

use crate::page::{PageRequest, PageResult};

/// Provider failure while fetching a page.
///
/// Reported to the host verbatim; never fatal to the picker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetSourceError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("asset provider error: {0}")]
    Provider(String),
}

/// Paged access to a media library.
///
/// Contract: for a fixed filter, repeatedly following `next_cursor` must
/// eventually yield `has_more == false`. The picker does not guard against a
/// source that returns empty non-terminal pages forever.
#[async_trait]
pub trait AssetSourcePort: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult, AssetSourceError>;
}
