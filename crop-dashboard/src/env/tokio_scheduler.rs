use std::time::Duration;

use tokio::task::{spawn_local, JoinHandle};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use super::{Scheduler, TimerHandle, MIN_INTERVAL};

/// Native [`Scheduler`] backed by tokio timers.
///
/// Callbacks are not `Send`, so timers are spawned with
/// [`tokio::task::spawn_local`] and must be created inside a
/// [`tokio::task::LocalSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

fn abort_on_cancel(task: JoinHandle<()>) -> TimerHandle {
    TimerHandle::new(move || task.abort())
}

impl Scheduler for TokioScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let task = spawn_local(async move {
            sleep(delay).await;
            callback();
        });
        abort_on_cancel(task)
    }

    fn set_interval(&self, period: Duration, mut callback: Box<dyn FnMut()>) -> TimerHandle {
        // tokio panics on a zero period
        let period = period.max(MIN_INTERVAL);
        let task = spawn_local(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                callback();
            }
        });
        abort_on_cancel(task)
    }
}
