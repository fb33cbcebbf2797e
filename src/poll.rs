//! Immediate-then-periodic timers.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Reference poll period of the game and session endpoints.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Owned handle to a running timer. Dropping it cancels the timer.
///
/// Cancelling only stops future ticks: requests already started by earlier
/// ticks run to completion.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Whether the timer task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Invokes `action` once right away, then every `period`.
///
/// Each invocation runs as its own task.
pub fn run_now_and_every<F, Fut>(period: Duration, mut action: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let task = tokio::spawn(async move {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // First tick completes immediately.
            ticker.tick().await;
            tokio::spawn(action());
        }
    });
    PollHandle { task }
}

/// A single-purpose poll with an exclusive start/stop contract.
#[derive(Debug, Default)]
pub struct PollLoop {
    purpose: &'static str,
    handle: Option<PollHandle>,
}

impl PollLoop {
    /// Creates a stopped loop; `purpose` only labels log output.
    pub fn new(purpose: &'static str) -> Self {
        Self {
            purpose,
            handle: None,
        }
    }

    /// Starts polling, replacing any loop already running.
    #[instrument(skip(self, action), fields(purpose = self.purpose))]
    pub fn start<F, Fut>(&mut self, period: Duration, action: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.handle.is_some() {
            debug!("Replacing running poll");
            self.stop();
        }
        info!(period_ms = period.as_millis() as u64, "Poll started");
        self.handle = Some(run_now_and_every(period, action));
    }

    /// Cancels the timer. No-op when not running.
    #[instrument(skip(self), fields(purpose = self.purpose))]
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            info!("Poll stopped");
            drop(handle);
        }
    }

    /// Whether the timer is live.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}
