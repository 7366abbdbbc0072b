//! # Debounced Recalculation
//!
//! Collapses a burst of session snapshots into the last one.
//!
//! ## Timing
//! ```text
//! submit:   s1   s2  s3                 s4
//!           │    │   │                  │
//!           ▼    ▼   ▼                  ▼
//! time ─────┬────┬───┬───────── 300 ms ─┬──────── 300 ms ──────►
//!                    └──────────────────┤                       │
//! emit:                                 s3                      s4
//! ```
//!
//! Every new snapshot restarts the quiet period. When the sender side is
//! dropped, a pending snapshot is emitted immediately and the output closes.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::trace;

/// Quiet period before a recalculation runs.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Sending half of a debounced channel.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task and returns the sender and the output.
    pub fn spawn(quiet: Duration) -> (Self, mpsc::Receiver<T>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::channel(1);
        tokio::spawn(debounce_loop(quiet, input_rx, output));
        (Debouncer { input }, output_rx)
    }

    /// Queues a snapshot. Returns false once the output has gone away.
    pub fn submit(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}

async fn debounce_loop<T>(
    quiet: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::Sender<T>,
) {
    while let Some(first) = input.recv().await {
        let mut latest = first;
        let mut superseded = 0u32;

        let closed = loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => {
                        latest = value;
                        superseded += 1;
                    }
                    None => break true,
                },
                _ = sleep(quiet) => break false,
            }
        };

        trace!(superseded, "Debounced snapshot ready");
        if output.send(latest).await.is_err() || closed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_latest_only() {
        let (debouncer, mut rx) = Debouncer::spawn(DEBOUNCE);
        for value in 1..=5 {
            assert!(debouncer.submit(value));
        }

        assert_eq!(rx.recv().await, Some(5));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_snapshots_each_emit() {
        let (debouncer, mut rx) = Debouncer::spawn(DEBOUNCE);

        debouncer.submit("a");
        assert_eq!(rx.recv().await, Some("a"));

        advance(Duration::from_secs(1)).await;
        debouncer.submit("b");
        assert_eq!(rx.recv().await, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_snapshot_restarts_quiet_period() {
        let (debouncer, mut rx) = Debouncer::spawn(DEBOUNCE);

        debouncer.submit(1);
        advance(Duration::from_millis(200)).await;
        debouncer.submit(2);
        advance(Duration::from_millis(100)).await;

        // Still inside the quiet period
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending() {
        let (debouncer, mut rx) = Debouncer::spawn(DEBOUNCE);
        debouncer.submit(7);
        drop(debouncer);

        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(rx.recv().await, None);
    }
}
