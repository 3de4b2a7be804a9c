//! Quiet-period stage for free-text input.
//!
//! Every new value restarts the timer; only the latest value is forwarded once
//! the input has been quiet for the configured delay.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now >= *at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Take the pending value regardless of the timer
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Spawn a task forwarding debounced values from `input`.
///
/// When `input` closes, a pending value is forwarded immediately and the
/// returned receiver is closed after it.
pub fn debounce_channel<T>(mut input: mpsc::Receiver<T>, delay: Duration) -> mpsc::Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(delay);
        loop {
            let next = match debouncer.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        value = input.recv() => Some(value),
                        _ = tokio::time::sleep_until(deadline) => None,
                    }
                }
                None => Some(input.recv().await),
            };

            match next {
                Some(Some(value)) => debouncer.schedule(value, Instant::now()),
                Some(None) => {
                    if let Some(value) = debouncer.flush() {
                        let _ = tx.send(value).await;
                    }
                    break;
                }
                None => {
                    if let Some(value) = debouncer.take_due(Instant::now()) {
                        trace!("Debounce quiet period elapsed, forwarding value");
                        if tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule("ma", start);
        assert!(debouncer.take_due(start + Duration::from_millis(299)).is_none());
        assert_eq!(debouncer.take_due(start + Duration::from_millis(300)), Some("ma"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_reschedule_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule("ma", start);
        debouncer.schedule("mat", start + Duration::from_millis(200));
        assert!(debouncer.take_due(start + Duration::from_millis(350)).is_none());
        assert_eq!(debouncer.take_due(start + Duration::from_millis(500)), Some("mat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_channel_forwards_last_value_of_burst() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce_channel(rx, Duration::from_millis(300));

        for text in ["m", "ma", "mat", "matrix"] {
            tx.send(text.to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(out.recv().await.as_deref(), Some("matrix"));

        tx.send("heat".to_string()).await.unwrap();
        assert_eq!(out.recv().await.as_deref(), Some("heat"));

        drop(tx);
        assert!(out.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_channel_flushes_on_close() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce_channel(rx, Duration::from_secs(10));
        tx.send(1).await.unwrap();
        drop(tx);
        assert_eq!(out.recv().await, Some(1));
        assert!(out.recv().await.is_none());
    }
}
