//! Quiescence-window debouncing.
//!
//! [`Debouncer`] is the clock-driven core: callers feed it values with the
//! current instant and ask it whether the pending value has settled.
//! [`DebouncedChannel`] wraps it in a tokio task for channel-based callers.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Holds back a changing value until it has stayed unchanged for `window`.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// The initial value counts as already settled.
    pub fn new(initial: T, window: Duration) -> Self {
        Debouncer {
            window,
            settled: initial,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Last value that made it through the window
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// Record a new input value; restarts the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// When the pending value will settle, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending value once its window has elapsed.
    ///
    /// A value equal to the one already settled is swallowed: downstream only
    /// sees changes.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }

    /// Drop the pending value without propagating it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Treat `value` as settled without propagating it, e.g. after the input
    /// was cleared programmatically.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.settled = value;
    }
}

/// A debouncer running on its own task.
///
/// Values sent through [`DebouncedChannel::send`] come out of
/// [`DebouncedChannel::recv`] only once they have settled. Dropping the
/// channel aborts the task, so nothing is delivered after disposal.
pub struct DebouncedChannel<T> {
    input: mpsc::UnboundedSender<T>,
    output: mpsc::UnboundedReceiver<T>,
    task: JoinHandle<()>,
}

impl<T> DebouncedChannel<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn spawn(initial: T, window: Duration) -> Self {
        let (input, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (output_tx, output) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            let mut debouncer = Debouncer::new(initial, window);
            loop {
                let deadline = debouncer.deadline();
                tokio::select! {
                    value = input_rx.recv() => match value {
                        Some(value) => debouncer.push(value, Instant::now()),
                        None => break,
                    },
                    _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        if let Some(value) = debouncer.poll(Instant::now()) {
                            if output_tx.send(value).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        DebouncedChannel {
            input,
            output,
            task,
        }
    }

    /// Feed a new input value
    pub fn send(&self, value: T) {
        // Only fails once the task is gone, at which point nothing listens anyway
        let _ = self.input.send(value);
    }

    /// Wait for the next settled value
    pub async fn recv(&mut self) -> Option<T> {
        self.output.recv().await
    }
}

impl<T> Drop for DebouncedChannel<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_value_settles_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), WINDOW);

        debouncer.push("egg".to_string(), start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("egg".to_string())
        );
        assert_eq!(debouncer.settled(), "egg");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), WINDOW);

        debouncer.push("c".to_string(), start);
        debouncer.push("ch".to_string(), start + Duration::from_millis(100));
        debouncer.push("chi".to_string(), start + Duration::from_millis(200));

        // 300ms after "c" but only 100ms after "chi"
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(500))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("chi".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_is_not_propagated() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("rice".to_string(), WINDOW);

        debouncer.push("rice".to_string(), start);
        assert_eq!(debouncer.poll(start + WINDOW), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), WINDOW);

        debouncer.push("tofu".to_string(), start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + WINDOW), None);
        assert_eq!(debouncer.settled(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_channel_emits_only_final_value() {
        let mut channel = DebouncedChannel::spawn(String::new(), WINDOW);

        for text in ["c", "ch", "chi"] {
            channel.send(text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let start = Instant::now();
        assert_eq!(channel.recv().await, Some("chi".to_string()));
        // "chi" was sent 100ms before `start`, so it settles 200ms later
        assert_eq!(Instant::now() - start, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_channel_stops_task() {
        let channel = DebouncedChannel::spawn(0u32, WINDOW);
        channel.send(7);
        let task_finished = {
            let handle = channel.task.abort_handle();
            drop(channel);
            tokio::time::sleep(WINDOW * 2).await;
            handle.is_finished()
        };
        assert!(task_finished);
    }
}
