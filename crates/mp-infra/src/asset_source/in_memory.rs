//! Offset-cursor asset source over an in-memory list.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mp_core::ports::{AssetSourceError, AssetSourcePort};
use mp_core::{Asset, Cursor, PageRequest, PageResult};
use tracing::debug;

/// Serves assets from a `Vec`, newest first as given.
///
/// Cursors are [`Cursor::Offset`] into the filtered list. A
/// [`Cursor::Token`] holding a decimal offset is accepted too.
pub struct InMemoryAssetSource {
    assets: Vec<Asset>,
    latency: Option<Duration>,
    pending_failures: Mutex<VecDeque<AssetSourceError>>,
    request_count: AtomicUsize,
}

impl InMemoryAssetSource {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            latency: None,
            pending_failures: Mutex::new(VecDeque::new()),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Delay every reply, to simulate a slow media store.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next request fail with `err`. Failures queue up in order.
    pub fn fail_next(&self, err: AssetSourceError) {
        self.pending_failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(err);
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn offset(cursor: &Cursor) -> Result<usize, AssetSourceError> {
        match cursor {
            Cursor::Start => Ok(0),
            Cursor::Offset(offset) => usize::try_from(*offset)
                .map_err(|_| AssetSourceError::InvalidCursor(offset.to_string())),
            Cursor::Token(token) => token
                .parse::<usize>()
                .map_err(|_| AssetSourceError::InvalidCursor(token.clone())),
        }
    }
}

#[async_trait]
impl AssetSourcePort for InMemoryAssetSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult, AssetSourceError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self
            .pending_failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        if let Some(err) = failure {
            return Err(err);
        }

        let offset = Self::offset(&request.cursor)?;
        let matching: Vec<&Asset> = self
            .assets
            .iter()
            .filter(|asset| request.kind.matches(asset.kind))
            .filter(|asset| match &request.album {
                Some(album) => asset.album.as_ref() == Some(album),
                None => true,
            })
            .collect();

        let total = matching.len();
        let start = offset.min(total);
        let end = start.saturating_add(request.limit).min(total);
        let assets: Vec<Asset> = matching[start..end].iter().map(|asset| (*asset).clone()).collect();

        debug!(offset = start, returned = assets.len(), total, "Serving in-memory page");

        Ok(PageResult {
            assets,
            has_more: end < total,
            next_cursor: Cursor::Offset(end as u64),
            total_count: total as u64,
        })
    }
}
