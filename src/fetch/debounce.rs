use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Trailing-edge debouncer: coalesces a burst of `schedule` calls into one
/// callback invocation with the arguments of the last call, `wait` after the
/// burst ends. Fire-and-forget; the callback's return value goes nowhere.
///
/// Construct once per logical input source and reuse it. A fresh instance
/// per keystroke has no pending timer to cancel and coalesces nothing.
pub struct Debouncer<T: Send + 'static> {
    wait: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(wait: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    /// Arm the trailing timer with `args`, cancelling any timer from an
    /// earlier call that has not fired yet.
    pub fn schedule(&mut self, args: T) {
        self.cancel();

        let wait = self.wait;
        let callback = Arc::clone(&self.callback);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(args);
        }));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
