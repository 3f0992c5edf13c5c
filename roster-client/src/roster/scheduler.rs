//! Autosave scheduler
//!
//! Debounced trigger: every `arm()` restarts one countdown of the quiet
//! period. When a countdown runs out uninterrupted, the flush callback is
//! spawned once and the scheduler returns to idle.
//!
//! ```text
//! Idle ──arm()──▶ Armed ──quiet period──▶ Idle (+ flush)
//!                  │  ▲
//!                  └──┘ arm(): cancel + restart
//! ```

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type OnElapsed = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed,
}

/// The single outstanding countdown
struct Countdown {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Restartable deferred flush trigger, owned by one table session.
///
/// Dropping the scheduler cancels the countdown without flushing.
pub struct AutosaveScheduler {
    quiet_period: Duration,
    on_elapsed: OnElapsed,
    countdown: Option<Countdown>,
}

impl AutosaveScheduler {
    /// Create an idle scheduler. Must be armed from inside a tokio runtime.
    pub fn new<F, Fut>(quiet_period: Duration, on_elapsed: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            quiet_period,
            on_elapsed: Arc::new(move || on_elapsed().boxed()),
            countdown: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn state(&self) -> SchedulerState {
        match &self.countdown {
            Some(countdown) if !countdown.handle.is_finished() => SchedulerState::Armed,
            _ => SchedulerState::Idle,
        }
    }

    /// Start the countdown, replacing any countdown already running
    pub fn arm(&mut self) {
        let restarted = self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let quiet_period = self.quiet_period;
        let on_elapsed = self.on_elapsed.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(quiet_period) => {
                    tracing::debug!("Autosave quiet period elapsed");
                    // Own task: a later arm() must not abort an in-flight flush
                    tokio::spawn(on_elapsed());
                }
            }
        });

        tracing::debug!(
            restarted,
            quiet_secs = quiet_period.as_secs_f64(),
            "Autosave armed"
        );
        self.countdown = Some(Countdown { token, handle });
    }

    /// Cancel the pending countdown, if any. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        let armed = self.state() == SchedulerState::Armed;
        if let Some(countdown) = self.countdown.take() {
            countdown.token.cancel();
        }
        armed
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        if self.cancel() {
            tracing::debug!("Autosave countdown dropped without flush");
        }
    }
}

impl std::fmt::Debug for AutosaveScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutosaveScheduler")
            .field("quiet_period", &self.quiet_period)
            .field("state", &self.state())
            .finish()
    }
}
