use tokio::sync::watch;
use tracing::debug;

/// Creates a connected [`CloseNotifier`] / [`CloseNotify`] pair.
///
/// The connection owner keeps the notifier and fires it when the peer goes away,
/// response sinks hand out clones of the receiving side.
pub fn close_channel() -> (CloseNotifier, CloseNotify) {
    let (sender, receiver) = watch::channel(false);
    (CloseNotifier { sender }, CloseNotify { receiver })
}

/// Sending half of a close signal. Dropping it counts as closed.
#[derive(Debug)]
pub struct CloseNotifier {
    sender: watch::Sender<bool>,
}

impl CloseNotifier {
    pub fn notify(&self) {
        // no receiver left is fine, nobody is waiting
        if self.sender.send(true).is_err() {
            debug!("close notified without any listener");
        }
    }
}

/// Receiving half of a close signal, cheap to clone.
#[derive(Debug, Clone)]
pub struct CloseNotify {
    receiver: watch::Receiver<bool>,
}

impl CloseNotify {
    /// Returns true once the connection is known to be closed
    pub fn is_closed(&self) -> bool {
        *self.receiver.borrow() || self.receiver.has_changed().is_err()
    }

    /// Waits until the connection is closed
    pub async fn closed(&mut self) {
        // `wait_for` errors only when the notifier is dropped, which also means closed
        let _ = self.receiver.wait_for(|closed| *closed).await;
    }
}
