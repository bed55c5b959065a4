//! Process bootstrap: logging, configuration and the picker run loop.

pub mod config;
pub mod run;
pub mod tracing;
