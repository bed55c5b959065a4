//! Media picker host: bootstrap, command-line handling and the demo runner
//! that drives a [`mp_app::PickerSession`] against a gallery manifest.

pub mod bootstrap;
pub mod cli;

pub use bootstrap::run::{run, RunReport};
pub use cli::RunOptions;
