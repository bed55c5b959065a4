//! Host-side [`PickerEventPort`](mp_core::ports::PickerEventPort) adapters.

pub mod channel;
pub mod tracing_emitter;

pub use channel::ChannelEventEmitter;
pub use tracing_emitter::TracingEventEmitter;
