//! Drive one picker session against a gallery manifest and report the result.

use std::sync::Arc;

use anyhow::Context;
use mp_app::{FetchOutcome, PickerSession};
use mp_core::ports::PickerEvent;
use mp_core::{AssetUri, ToggleOutcome};
use mp_infra::{ChannelEventEmitter, ManifestAssetSource};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, info_span, warn, Instrument};

use super::config::resolve_config;
use crate::cli::RunOptions;

/// What the picker ended up showing and holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub first_asset: Option<AssetUri>,
    pub loaded: usize,
    pub exhausted: bool,
    pub total_count: Option<u64>,
    pub selected: Vec<AssetUri>,
    /// Taps rejected because the selection was full or disabled.
    pub rejected_taps: Vec<AssetUri>,
    /// Event names in emission order.
    pub events: Vec<&'static str>,
    /// Last fetch error, if loading stopped early.
    pub fetch_error: Option<String>,
}

pub async fn run(options: RunOptions) -> anyhow::Result<RunReport> {
    let span = info_span!("bootstrap.run", manifest = %options.manifest.display());

    async {
        let config = resolve_config(&options)?;
        let source = ManifestAssetSource::from_path(&options.manifest)?;
        info!(assets = source.len(), "Manifest loaded");

        let (emitter, mut events_rx) = ChannelEventEmitter::new();
        let session = PickerSession::mount(config, Arc::new(source), Arc::new(emitter))
            .context("Failed to mount picker")?;

        let start = session.start().await;
        let mut fetch_error = match start.page {
            FetchOutcome::Failed(err) => Some(err.to_string()),
            _ => None,
        };

        let mut remaining = options.extra_pages;
        while fetch_error.is_none() && remaining != Some(0) {
            match session.load_more().await {
                FetchOutcome::Exhausted => break,
                FetchOutcome::Failed(err) => {
                    warn!(error = %err, "Stopped loading after fetch failure");
                    fetch_error = Some(err.to_string());
                }
                _ => {}
            }
            remaining = remaining.map(|n| n - 1);
        }

        let mut rejected_taps = Vec::new();
        for uri in &options.taps {
            if matches!(
                session.tap(uri),
                ToggleOutcome::MaximumReached | ToggleOutcome::Disabled
            ) {
                rejected_taps.push(uri.clone());
            }
        }

        let pagination = session.pagination();
        let loaded = pagination.len();
        let exhausted = pagination.is_exhausted();
        let total_count = pagination.total_count();
        let selected = session.unmount();

        let report = RunReport {
            first_asset: start.first_asset.map(|asset| asset.uri),
            loaded,
            exhausted,
            total_count,
            selected,
            rejected_taps,
            events: drain_event_names(&mut events_rx),
            fetch_error,
        };
        info!(loaded, selected = report.selected.len(), "Picker run finished");
        Ok(report)
    }
    .instrument(span)
    .await
}

fn drain_event_names(rx: &mut UnboundedReceiver<PickerEvent>) -> Vec<&'static str> {
    let mut names = Vec::new();
    while let Ok(event) = rx.try_recv() {
        names.push(event.name());
    }
    names
}
