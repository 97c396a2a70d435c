//! Change notifications for views.
//!
//! The controller signals after every state change (dispatch, commit,
//! failure). Views wait on the receiver and re-read props when woken;
//! bursts of signals collapse into one re-render.

use tokio::sync::mpsc;

/// Sending half, owned by the controller.
#[derive(Clone, Debug)]
pub(crate) struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Signals a change.
    ///
    /// Never blocks. A full buffer already guarantees a pending wakeup and a
    /// dropped receiver means nobody is watching, so errors are ignored.
    pub(crate) fn send(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiving half, handed to a view by
/// [`DataTableController::subscribe`](crate::DataTableController::subscribe).
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Waits for the next change.
    ///
    /// Returns `None` once the controller is torn down.
    pub async fn changed(&mut self) -> Option<()> {
        let signal = self.rx.recv().await;
        self.drain();
        signal
    }

    /// Consumes buffered signals without waiting.
    ///
    /// Returns `true` if any change was pending.
    pub fn drain(&mut self) -> bool {
        let mut pending = false;
        while self.rx.try_recv().is_ok() {
            pending = true;
        }
        pending
    }
}

/// Creates a new wakeup channel pair.
pub(crate) fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (WakeupSender { tx }, WakeupReceiver { rx })
}
