//! Timer that drives a shared [`Playback`]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::model::Playback;

pub const DEFAULT_TICK: Duration = Duration::from_millis(30);

/// Repeating tick task. At most one task runs per ticker; it is aborted when
/// a new one starts. Stopping or dropping the ticker also pauses the playback
/// it was driving.
#[derive(Debug)]
pub struct PlaybackTicker {
    period: Duration,
    task: Option<JoinHandle<()>>,
    playback: Option<Arc<Mutex<Playback>>>,
}

impl Default for PlaybackTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl PlaybackTicker {
    /// A zero period falls back to [`DEFAULT_TICK`].
    pub fn new(period: Duration) -> Self {
        let period = if period.is_zero() { DEFAULT_TICK } else { period };
        Self {
            period,
            task: None,
            playback: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts playback and the tick task. Must be called within a tokio runtime.
    pub fn play(&mut self, playback: &Arc<Mutex<Playback>>) {
        playback.lock().play();
        self.start(Arc::clone(playback));
    }

    /// Spawns a tick task, cancelling any previous one. The task ends on its
    /// own once `tick()` reports playback has stopped.
    pub fn start(&mut self, playback: Arc<Mutex<Playback>>) {
        self.cancel();
        self.playback = Some(Arc::clone(&playback));

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !playback.lock().tick() {
                    debug!("Playback ticker finished");
                    break;
                }
            }
        }));
    }

    /// Cancels the running task, if any, and pauses its playback.
    pub fn stop(&mut self) {
        self.cancel();
        if let Some(playback) = self.playback.take() {
            playback.lock().pause();
        }
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for PlaybackTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
