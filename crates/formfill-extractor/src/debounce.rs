//! Quiet-window debouncing of source text changes
//!
//! Turns a high-frequency stream of text-change events into at most one
//! settled value per quiet window. Every new event restarts the window; only
//! the last value observed during a burst is forwarded. Identical consecutive
//! values are not de-duplicated. Dropping the [`Debouncer`] tears the
//! pipeline down permanently; a window still pending at teardown never fires.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::debug;

/// Handle to a running debounce task.
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    /// Spawn the debounce task.
    ///
    /// Settled values are delivered on the returned receiver once the quiet
    /// window elapses with no further change.
    pub fn spawn(quiet_window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        tokio::spawn(run(quiet_window, input_rx, settled_tx));

        (Self { input: input_tx }, settled_rx)
    }

    /// Observe a text change, restarting the quiet window.
    ///
    /// Returns false once the pipeline has been torn down.
    pub fn observe(&self, text: impl Into<String>) -> bool {
        self.input.send(text.into()).is_ok()
    }
}

async fn run(
    quiet_window: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    settled: mpsc::UnboundedSender<String>,
) {
    while let Some(first) = input.recv().await {
        let mut latest = first;
        let timer = time::sleep(quiet_window);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                _ = &mut timer => {
                    debug!("Text settled after quiet window ({} chars)", latest.len());
                    if settled.send(latest).is_err() {
                        return;
                    }
                    break;
                }
                next = input.recv() => match next {
                    Some(text) => {
                        latest = text;
                        timer.as_mut().reset(Instant::now() + quiet_window);
                    }
                    // Teardown: a pending window must not fire an extraction.
                    None => return,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const QUIET: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_with_last_value() {
        let (debouncer, mut settled) = Debouncer::spawn(QUIET);

        debouncer.observe("J");
        debouncer.observe("Ja");
        debouncer.observe("Jane Doe");

        assert_eq!(settled.recv().await.as_deref(), Some("Jane Doe"));
        assert!(timeout(Duration::from_secs(1), settled.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_changes_settle_separately() {
        let (debouncer, mut settled) = Debouncer::spawn(QUIET);

        debouncer.observe("first");
        assert_eq!(settled.recv().await.as_deref(), Some("first"));

        debouncer.observe("second");
        assert_eq!(settled.recv().await.as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_values_are_not_deduplicated() {
        let (debouncer, mut settled) = Debouncer::spawn(QUIET);

        debouncer.observe("same");
        assert_eq!(settled.recv().await.as_deref(), Some("same"));

        debouncer.observe("same");
        assert_eq!(settled.recv().await.as_deref(), Some("same"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_within_window_restarts_it() {
        let (debouncer, mut settled) = Debouncer::spawn(QUIET);

        debouncer.observe("a");
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.observe("ab");
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(200)).await;

        // 400ms elapsed since the first change, but only 200ms since the
        // second; nothing has settled yet.
        assert!(settled.try_recv().is_err());

        assert_eq!(settled.recv().await.as_deref(), Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_window() {
        let (debouncer, mut settled) = Debouncer::spawn(QUIET);

        debouncer.observe("pending");
        tokio::task::yield_now().await;
        drop(debouncer);

        assert_eq!(timeout(Duration::from_secs(1), settled.recv()).await, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_observe_after_teardown_reports_closed() {
        let (debouncer, settled) = Debouncer::spawn(QUIET);

        drop(settled);
        debouncer.observe("x");
        // The task exits once it fails to deliver; subsequent observes fail.
        tokio::time::sleep(QUIET * 2).await;
        assert!(!debouncer.observe("y"));
    }
}
