use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::events::ReplyReady;

/// Timers that report back once a submission's reply delay has elapsed.
///
/// Each armed timer is a tokio task keyed by submission id and can be
/// cancelled individually. Expired timers post a [`ReplyReady`] on the
/// channel returned by [`ReplyScheduler::new`]; the owner drains it from
/// its own loop, so conversation state never leaves the UI task.
pub struct ReplyScheduler {
    delay: Duration,
    sender: mpsc::UnboundedSender<ReplyReady>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

impl ReplyScheduler {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ReplyReady>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            sender,
            timers: HashMap::new(),
        };
        (scheduler, receiver)
    }

    /// Arm a timer for `submission_id`, replacing any existing one.
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, submission_id: Uuid) {
        let sender = self.sender.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI shut down
            let _ = sender.send(ReplyReady { submission_id });
        });

        if let Some(previous) = self.timers.insert(submission_id, handle) {
            previous.abort();
        }
        tracing::debug!(%submission_id, delay_ms = delay.as_millis() as u64, "reply timer armed");
    }

    /// Drop bookkeeping for a timer that has fired
    pub fn complete(&mut self, submission_id: Uuid) {
        self.timers.remove(&submission_id);
    }

    /// Cancel one timer. Returns whether it was still armed.
    #[allow(dead_code)]
    pub fn cancel(&mut self, submission_id: Uuid) -> bool {
        match self.timers.remove(&submission_id) {
            Some(handle) => {
                handle.abort();
                tracing::debug!(%submission_id, "reply timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every armed timer
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }

    #[allow(dead_code)]
    pub fn armed(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let (mut scheduler, mut ready) = ReplyScheduler::new(Duration::from_millis(1500));
        let id = Uuid::new_v4();
        let started = Instant::now();

        scheduler.schedule(id);
        assert_eq!(scheduler.armed(), 1);

        let event = ready.recv().await.expect("timer should fire");
        assert_eq!(event.submission_id, id);
        assert!(started.elapsed() >= Duration::from_millis(1500));

        scheduler.complete(id);
        assert_eq!(scheduler.armed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_delay() {
        let (mut scheduler, mut ready) = ReplyScheduler::new(Duration::from_millis(1500));
        scheduler.schedule(Uuid::new_v4());

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(ready.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(ready.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (mut scheduler, mut ready) = ReplyScheduler::new(Duration::from_millis(100));
        let cancelled = Uuid::new_v4();
        let kept = Uuid::new_v4();

        scheduler.schedule(cancelled);
        scheduler.schedule(kept);
        assert!(scheduler.cancel(cancelled));
        assert!(!scheduler.cancel(cancelled));

        let event = ready.recv().await.unwrap();
        assert_eq!(event.submission_id, kept);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(ready.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_silences_everything() {
        let (mut scheduler, mut ready) = ReplyScheduler::new(Duration::from_millis(100));
        for _ in 0..3 {
            scheduler.schedule(Uuid::new_v4());
        }
        scheduler.cancel_all();
        assert_eq!(scheduler.armed(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(ready.try_recv().is_err());
    }
}
