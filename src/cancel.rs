//! Cooperative cancellation for in-flight requests.
//!
//! A [`CancelHandle`] is the trigger side; every [`CancelSignal`] subscribed
//! from it observes the trigger. The descriptor stores a signal opaquely and
//! forwards it to the executor, which races the outbound request against it.

use tokio::sync::watch;

/// Trigger side of a cancellation pair.
///
/// Dropping the handle without cancelling leaves its signals permanently
/// un-cancelled.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Creates a new, un-triggered handle.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Subscribes a signal to this handle.
    #[must_use]
    pub fn signal(&self) -> CancelSignal {
        CancelSignal { rx: Some(self.tx.subscribe()) }
    }

    /// Triggers cancellation. All subscribed signals observe it.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether this handle has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation pair.
///
/// Cheap to clone; [`CancelSignal::never`] produces a signal that can never
/// fire, for calls that are not cancellable.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires.
    #[must_use]
    pub const fn never() -> Self {
        Self { rx: None }
    }

    /// Whether cancellation has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once cancellation is triggered. Pends forever for a
    /// [`never`](Self::never) signal or when the handle is dropped without
    /// triggering.
    pub async fn cancelled(&self) {
        let Some(rx) = self.rx.as_ref() else {
            std::future::pending::<()>().await;
            return;
        };
        let mut rx = rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
                return;
            }
        }
    }
}
