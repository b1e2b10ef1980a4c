use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

enum Signal<T> {
    Value(T),
    Cancel,
}

/// Trailing-edge debouncer: forwards the last value pushed once `delay` has
/// passed without a newer one. Nothing is forwarded while input keeps coming,
/// and the final value is never dropped unless cancelled.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Signal<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn(handle: &Handle, delay: Duration, out: mpsc::Sender<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        handle.spawn(run(delay, rx, out));
        Self { tx }
    }

    pub fn push(&self, value: T) {
        let _ = self.tx.send(Signal::Value(value));
    }

    /// Drops a value that has not been forwarded yet.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }
}

async fn run<T>(delay: Duration, mut rx: mpsc::UnboundedReceiver<Signal<T>>, out: mpsc::Sender<T>) {
    let mut pending: Option<T> = None;
    loop {
        let signal = if pending.is_some() {
            tokio::select! {
                s = rx.recv() => s,
                _ = tokio::time::sleep(delay) => {
                    if let Some(value) = pending.take() {
                        debug!("debounce settled after {delay:?}");
                        if out.send(value).await.is_err() {
                            return;
                        }
                    }
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match signal {
            Some(Signal::Value(v)) => pending = Some(v),
            Some(Signal::Cancel) => pending = None,
            None => return,
        }
    }
}
