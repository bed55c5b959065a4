//! Use case for incremental asset loading
//! 增量加载资源的用例

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mp_core::ports::{AssetSourceError, AssetSourcePort, PickerEvent, PickerEventPort};
use mp_core::{Asset, AssetFilter, Cursor, FetchTicket, PageApplied, PaginationState};
use tracing::{debug, info, info_span, warn, Instrument};

/// Result of one fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A page was merged. `count` may be zero for an empty non-terminal page.
    Appended { count: usize, exhausted: bool },
    /// Nothing left to load; no request was issued.
    Exhausted,
    /// Another fetch is in flight; no request was issued.
    Busy,
    /// The filter changed while the request was running; its result was dropped.
    Discarded,
    /// The source failed. State is unchanged and a retry is allowed.
    Failed(AssetSourceError),
}

/// Result of [`PaginationController::initialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeOutcome {
    /// Newest asset resolved for the host preview, when priming was requested
    /// and the source had one.
    pub first_asset: Option<Asset>,
    pub page: FetchOutcome,
}

impl InitializeOutcome {
    fn page_only(page: FetchOutcome) -> Self {
        Self {
            first_asset: None,
            page,
        }
    }
}

/// Loads pages from an [`AssetSourcePort`] into a growing, ordered list.
///
/// ## Behavior / 行为
/// - At most one request is outstanding at any time. Calls made while one is
///   running return [`FetchOutcome::Busy`] without touching the source.
/// - A failed request leaves items, cursor and the exhausted flag untouched.
///   The controller never retries on its own.
/// - A filter reset while a request is running keeps the slot busy until
///   that request settles, then drops its result.
///
/// The state lock is never held across an `.await`; the source call is the
/// only suspension point.
pub struct PaginationController {
    source: Arc<dyn AssetSourcePort>,
    events: Arc<dyn PickerEventPort>,
    page_size: usize,
    state: Mutex<PaginationState>,
}

/// Releases the fetch slot when dropped, including when the owning future is
/// dropped mid-request.
struct InFlight<'a> {
    state: &'a Mutex<PaginationState>,
    ticket: FetchTicket,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).finish_fetch();
    }
}

fn lock(state: &Mutex<PaginationState>) -> MutexGuard<'_, PaginationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PaginationController {
    pub fn new(
        source: Arc<dyn AssetSourcePort>,
        events: Arc<dyn PickerEventPort>,
        page_size: usize,
        filter: AssetFilter,
    ) -> Self {
        Self {
            source,
            events,
            page_size: page_size.max(1),
            state: Mutex::new(PaginationState::new(filter)),
        }
    }

    /// Initial load: optionally resolve the first asset, then fetch a page.
    ///
    /// The fetch slot is held across both steps. When the first-asset step
    /// fails, the page step is skipped and the error is reported once.
    pub async fn initialize(&self, prime_first_item: bool) -> InitializeOutcome {
        let span = info_span!("usecase.pagination.initialize", prime_first_item);

        async {
            let Some(flight) = self.claim() else {
                debug!("Initialize ignored, a fetch is already in flight");
                return InitializeOutcome::page_only(FetchOutcome::Busy);
            };

            let mut first_asset = None;
            if prime_first_item {
                let request = lock(&self.state).first_asset_request();
                match self.source.fetch_page(request).await {
                    Ok(result) => {
                        let primed = lock(&self.state).mark_primed(&flight.ticket);
                        if !primed {
                            debug!("First asset resolved under a stale filter, dropping");
                            return InitializeOutcome::page_only(FetchOutcome::Discarded);
                        }
                        first_asset = result.assets.into_iter().next();
                        match &first_asset {
                            Some(asset) => {
                                info!(uri = %asset.uri, "First asset resolved");
                                self.events
                                    .emit(PickerEvent::FirstAssetResolved(asset.clone()));
                            }
                            None => info!("Source is empty, no first asset to resolve"),
                        }
                    }
                    Err(err) => {
                        return InitializeOutcome::page_only(self.report_failure(flight, err));
                    }
                }
            } else {
                lock(&self.state).mark_primed(&flight.ticket);
            }

            let page = self.fetch_with(flight).await;
            InitializeOutcome { first_asset, page }
        }
        .instrument(span)
        .await
    }

    /// Fetch the next page at the current cursor.
    ///
    /// No-op when exhausted or when a fetch is in flight.
    pub async fn fetch_next(&self) -> FetchOutcome {
        let span = info_span!("usecase.pagination.fetch_next");

        async {
            let Some(flight) = self.claim() else {
                debug!("Fetch ignored, a fetch is already in flight");
                return FetchOutcome::Busy;
            };
            self.fetch_with(flight).await
        }
        .instrument(span)
        .await
    }

    /// Drop everything loaded for the current filter and switch to `filter`.
    ///
    /// Does not fetch; callers re-run [`initialize`](Self::initialize).
    pub fn reset_for_filter_change(&self, filter: AssetFilter) {
        let mut state = lock(&self.state);
        let dropped = state.len();
        let in_flight = state.is_fetch_in_flight();
        state.reset(filter);
        info!(
            dropped,
            in_flight,
            generation = state.generation(),
            "Pagination reset for filter change"
        );
    }

    fn claim(&self) -> Option<InFlight<'_>> {
        let ticket = lock(&self.state).try_claim()?;
        Some(InFlight {
            state: &self.state,
            ticket,
        })
    }

    async fn fetch_with(&self, flight: InFlight<'_>) -> FetchOutcome {
        let request = lock(&self.state).next_page_request(self.page_size);
        let Some(request) = request else {
            debug!("Source exhausted, not fetching");
            return FetchOutcome::Exhausted;
        };

        debug!(limit = request.limit, cursor = ?request.cursor, "Requesting page");
        let result = match self.source.fetch_page(request).await {
            Ok(result) => result,
            Err(err) => return self.report_failure(flight, err),
        };

        let applied = lock(&self.state).apply_page(&flight.ticket, result);
        drop(flight);

        match applied {
            PageApplied::Stale => {
                debug!("Page fetched under a previous filter, discarded");
                FetchOutcome::Discarded
            }
            PageApplied::Appended { items, exhausted } => {
                let count = items.len();
                info!(count, exhausted, total = self.len(), "Page appended");
                self.events
                    .emit(PickerEvent::PageAppended { items, exhausted });
                FetchOutcome::Appended { count, exhausted }
            }
        }
    }

    fn report_failure(&self, flight: InFlight<'_>, err: AssetSourceError) -> FetchOutcome {
        let current = lock(&self.state).is_current(&flight.ticket);
        drop(flight);

        if !current {
            debug!(error = %err, "Fetch under a previous filter failed, ignoring");
            return FetchOutcome::Discarded;
        }

        warn!(error = %err, "Asset fetch failed");
        self.events.emit(PickerEvent::FetchFailed(err.clone()));
        FetchOutcome::Failed(err)
    }

    /// Snapshot of all loaded assets, in display order.
    pub fn items(&self) -> Vec<Asset> {
        lock(&self.state).items().to_vec()
    }

    pub fn item(&self, index: usize) -> Option<Asset> {
        lock(&self.state).items().get(index).cloned()
    }

    pub fn find(&self, uri: &str) -> Option<Asset> {
        lock(&self.state)
            .items()
            .iter()
            .find(|asset| asset.uri.as_str() == uri)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        lock(&self.state).is_exhausted()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_fetch_in_flight()
    }

    pub fn is_primed(&self) -> bool {
        lock(&self.state).is_primed()
    }

    /// Presentation shows a loading footer until the source is exhausted.
    pub fn show_loading_footer(&self) -> bool {
        !self.is_exhausted()
    }

    pub fn cursor(&self) -> Cursor {
        lock(&self.state).cursor().clone()
    }

    pub fn total_count(&self) -> Option<u64> {
        lock(&self.state).total_count()
    }

    pub fn filter(&self) -> AssetFilter {
        lock(&self.state).filter().clone()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn item_key(&self, index: usize) -> Option<String> {
        lock(&self.state).item_key(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mp_core::{AlbumName, AssetKindFilter, PageRequest, PageResult};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Source that replays scripted replies and records every request.
    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<PageResult, AssetSourceError>>>,
        requests: Mutex<Vec<PageRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<PageResult, AssetSourceError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn gated(replies: Vec<Result<PageResult, AssetSourceError>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(replies)
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AssetSourcePort for ScriptedSource {
        async fn fetch_page(&self, request: PageRequest) -> Result<PageResult, AssetSourceError> {
            self.requests.lock().unwrap().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AssetSourceError::Provider("script exhausted".into())))
        }
    }

    #[derive(Default)]
    struct RecordingEvents {
        events: Mutex<Vec<PickerEvent>>,
        failures: AtomicUsize,
    }

    impl PickerEventPort for RecordingEvents {
        fn emit(&self, event: PickerEvent) {
            if matches!(event, PickerEvent::FetchFailed(_)) {
                self.failures.fetch_add(1, Ordering::SeqCst);
            }
            self.events.lock().unwrap().push(event);
        }
    }

    fn page(uris: &[&str], has_more: bool, next: Cursor) -> Result<PageResult, AssetSourceError> {
        Ok(PageResult {
            assets: uris.iter().map(|uri| Asset::photo(*uri)).collect(),
            has_more,
            next_cursor: next,
            total_count: 3,
        })
    }

    fn controller(
        source: Arc<ScriptedSource>,
        events: Arc<RecordingEvents>,
        page_size: usize,
    ) -> PaginationController {
        PaginationController::new(source, events, page_size, AssetFilter::default())
    }

    #[tokio::test]
    async fn test_initialize_then_fetch_next_until_exhausted() {
        let source = Arc::new(ScriptedSource::new(vec![
            page(&["X", "Y"], true, Cursor::Token("c1".into())),
            page(&["Z"], false, Cursor::Token("c2".into())),
        ]));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source.clone(), events.clone(), 2);

        let init = controller.initialize(false).await;
        assert_eq!(
            init.page,
            FetchOutcome::Appended {
                count: 2,
                exhausted: false
            }
        );

        let next = controller.fetch_next().await;
        assert_eq!(
            next,
            FetchOutcome::Appended {
                count: 1,
                exhausted: true
            }
        );

        let uris: Vec<String> = controller
            .items()
            .into_iter()
            .map(|asset| asset.uri.into_inner())
            .collect();
        assert_eq!(uris, vec!["X", "Y", "Z"]);
        assert!(controller.is_exhausted());
        assert!(!controller.show_loading_footer());

        assert_eq!(controller.fetch_next().await, FetchOutcome::Exhausted);
        assert_eq!(source.requests().len(), 2, "third call issues no request");
        assert_eq!(source.requests()[1].cursor, Cursor::Token("c1".into()));
        assert_eq!(source.requests()[1].limit, 2);
    }

    #[tokio::test]
    async fn test_initialize_primes_first_asset_without_album() {
        let source = Arc::new(ScriptedSource::new(vec![
            page(&["newest"], true, Cursor::Offset(1)),
            page(&["a", "b"], true, Cursor::Offset(2)),
        ]));
        let events = Arc::new(RecordingEvents::default());
        let controller = PaginationController::new(
            source.clone(),
            events.clone(),
            2,
            AssetFilter::new(AssetKindFilter::Photo, Some(AlbumName::from("Camera"))),
        );

        let init = controller.initialize(true).await;

        assert_eq!(init.first_asset, Some(Asset::photo("newest")));
        assert!(controller.is_primed());

        let requests = source.requests();
        assert_eq!(requests[0], PageRequest::first_asset(AssetKindFilter::Photo));
        assert_eq!(requests[1].album, Some(AlbumName::from("Camera")));
        assert_eq!(requests[1].cursor, Cursor::Start);

        let recorded = events.events.lock().unwrap();
        assert_eq!(recorded[0], PickerEvent::FirstAssetResolved(Asset::photo("newest")));
        assert!(matches!(recorded[1], PickerEvent::PageAppended { .. }));
        // The preview asset is not part of the paged list.
        assert_eq!(controller.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_fetch_next_issues_one_request() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource::gated(
            vec![page(&["X"], true, Cursor::Offset(1))],
            gate.clone(),
        ));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source.clone(), events, 1);

        let first = controller.fetch_next();
        let second = async {
            tokio::task::yield_now().await;
            let outcome = controller.fetch_next().await;
            gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, FetchOutcome::Busy);
        assert!(matches!(first, FetchOutcome::Appended { count: 1, .. }));
        assert_eq!(source.requests().len(), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_failure_leaves_state_untouched_and_allows_retry() {
        let source = Arc::new(ScriptedSource::new(vec![
            page(&["X"], true, Cursor::Offset(1)),
            Err(AssetSourceError::Io("disk unplugged".into())),
            page(&["Y"], false, Cursor::Offset(2)),
        ]));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source.clone(), events.clone(), 1);
        controller.fetch_next().await;

        let before = (controller.items(), controller.cursor(), controller.is_exhausted());
        let outcome = controller.fetch_next().await;
        let after = (controller.items(), controller.cursor(), controller.is_exhausted());

        assert_eq!(
            outcome,
            FetchOutcome::Failed(AssetSourceError::Io("disk unplugged".into()))
        );
        assert_eq!(before, after);
        assert_eq!(events.failures.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());

        let retry = controller.fetch_next().await;
        assert!(matches!(retry, FetchOutcome::Appended { count: 1, exhausted: true }));
        assert_eq!(source.requests()[2].cursor, Cursor::Offset(1));
    }

    #[tokio::test]
    async fn test_prime_failure_skips_page_and_stays_unprimed() {
        let source = Arc::new(ScriptedSource::new(vec![Err(
            AssetSourceError::PermissionDenied("denied".into()),
        )]));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source.clone(), events.clone(), 10);

        let init = controller.initialize(true).await;

        assert!(matches!(init.page, FetchOutcome::Failed(_)));
        assert_eq!(init.first_asset, None);
        assert!(!controller.is_primed());
        assert_eq!(source.requests().len(), 1);
        assert_eq!(events.failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_source_resolves_no_first_asset() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(PageResult::last(Vec::new(), 0)),
            Ok(PageResult::last(Vec::new(), 0)),
        ]));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source, events.clone(), 10);

        let init = controller.initialize(true).await;

        assert_eq!(init.first_asset, None);
        assert_eq!(
            init.page,
            FetchOutcome::Appended {
                count: 0,
                exhausted: true
            }
        );
        assert!(!events
            .events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, PickerEvent::FirstAssetResolved(_))));
    }

    #[tokio::test]
    async fn test_reset_during_fetch_discards_result() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource::gated(
            vec![page(&["stale"], false, Cursor::Offset(1))],
            gate.clone(),
        ));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source, events.clone(), 1);

        let fetch = controller.fetch_next();
        let reset = async {
            tokio::task::yield_now().await;
            controller.reset_for_filter_change(AssetFilter::new(
                AssetKindFilter::Video,
                None,
            ));
            assert!(controller.is_loading(), "slot stays held by the stale fetch");
            assert_eq!(controller.fetch_next().await, FetchOutcome::Busy);
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(fetch, reset);

        assert_eq!(outcome, FetchOutcome::Discarded);
        assert!(controller.is_empty());
        assert!(!controller.is_exhausted());
        assert!(!controller.is_loading());
        assert_eq!(controller.filter().kind, AssetKindFilter::Video);
        assert!(events.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_while_busy_is_ignored() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource::gated(
            vec![page(&["X"], true, Cursor::Offset(1))],
            gate.clone(),
        ));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source.clone(), events, 1);

        let fetch = controller.fetch_next();
        let init = async {
            tokio::task::yield_now().await;
            let outcome = controller.initialize(true).await;
            gate.notify_one();
            outcome
        };

        let (_, init) = tokio::join!(fetch, init);

        assert_eq!(init, InitializeOutcome::page_only(FetchOutcome::Busy));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_fetch_releases_slot() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource::gated(Vec::new(), gate));
        let events = Arc::new(RecordingEvents::default());
        let controller = controller(source, events, 1);

        let fetch = controller.fetch_next();
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(10), fetch).await;

        assert!(timed_out.is_err());
        assert!(!controller.is_loading());
    }
}
