//! Tracing configuration for the media picker
//!
//! ## Behavior / 行为
//!
//! - **Development**: debug level for the picker crates
//! - **Production**: info level
//! - `RUST_LOG` overrides the defaults entirely

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        // Dependencies stay quiet unless asked for.
        "warn".to_string(),
        format!("media_picker_lib={level}"),
        format!("mp_core={level}"),
        format!("mp_app={level}"),
        format!("mp_infra={level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr so the JSON report on stdout stays machine-readable.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // "2026-01-15 10:30:45.123 INFO [run.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stderr);

    registry().with(env_filter).with(stderr_layer).try_init()?;

    Ok(())
}
