use std::time::Duration;

use tracing::debug;

use crate::env::{Scheduler, TimerHandle};

/// Periodically re-runs a callback, typically to reload dashboard data.
#[derive(Debug, Default)]
pub struct AutoRefresh {
    handle: Option<TimerHandle>,
}

impl AutoRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts refreshing every `period`. A schedule that is already running
    /// is replaced.
    pub fn start<S, F>(&mut self, scheduler: &S, period: Duration, callback: F)
    where
        S: Scheduler + ?Sized,
        F: FnMut() + 'static,
    {
        self.stop();
        debug!(?period, "auto refresh started");
        self.handle = Some(scheduler.set_interval(period, Box::new(callback)));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            debug!("auto refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}
