use mp_core::ports::{PickerEvent, PickerEventPort};
use tokio::sync::mpsc;

/// Forwards picker events into an unbounded channel.
///
/// `emit` never blocks, so it is safe to call from inside picker operations.
/// Events sent after the receiver is dropped are discarded.
#[derive(Clone)]
pub struct ChannelEventEmitter {
    tx: mpsc::UnboundedSender<PickerEvent>,
}

impl ChannelEventEmitter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PickerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PickerEventPort for ChannelEventEmitter {
    fn emit(&self, event: PickerEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::debug!(event = name, "Picker event receiver dropped");
        }
    }
}
