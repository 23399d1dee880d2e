//! Seams between the dashboard logic and the page it runs in.
//!
//! The browser build implements these traits over `web_sys`; tests and the
//! command line tool provide their own implementations.

pub mod timer;
#[cfg(not(target_arch = "wasm32"))]
pub mod tokio_scheduler;

pub use timer::*;
#[cfg(not(target_arch = "wasm32"))]
pub use tokio_scheduler::*;

use std::time::Duration;

use crate::charts::ChartConfig;
use crate::models::Severity;

/// Read access to the page plus the few mutations the dashboard needs.
pub trait Document {
    /// Handle to an alert element found on the page.
    type Alert: 'static;

    /// Whether an element with this id is present.
    fn contains(&self, element_id: &str) -> bool;

    /// Every alert currently shown on the page.
    fn alerts(&self) -> Vec<Self::Alert>;

    /// Closes an alert. Closing an alert that is already gone is a no-op.
    fn dismiss_alert(&self, alert: &Self::Alert);
}

/// Shortest interval period a scheduler honors. Shorter periods, zero
/// included, are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Timer scheduling. Callbacks run on the scheduler's own thread.
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;

    /// Runs `callback` every `period`, first after one full period.
    /// A period below [`MIN_INTERVAL`] runs at [`MIN_INTERVAL`].
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("canvas `{0}` is not a drawable canvas")]
    NotACanvas(String),
    #[error("chart configuration could not be encoded: {0}")]
    Encode(String),
    #[error("charting library rejected the chart: {0}")]
    Library(String),
}

/// The charting library, bound to canvases by element id.
pub trait ChartSurface {
    /// Draws a chart on the canvas, replacing any chart already bound to it.
    fn draw(&self, canvas_id: &str, config: &ChartConfig) -> Result<(), SurfaceError>;

    /// Swaps the data of the chart bound to the canvas. Returns `false` when
    /// no chart is bound there.
    fn update(&self, canvas_id: &str, config: &ChartConfig) -> Result<bool, SurfaceError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("download of `{filename}` failed: {reason}")]
pub struct DownloadError {
    pub filename: String,
    pub reason: String,
}

/// Hands a generated file to the user.
pub trait Downloader {
    fn download(&self, filename: &str, mime_type: &str, contents: &str) -> Result<(), DownloadError>;
}

/// Identifier of a banner mounted by a [`NotificationSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(pub u64);

/// A dismissible notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
}

impl Banner {
    pub fn class_name(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show position-fixed top-0 start-50 translate-middle-x mt-3",
            self.severity
        )
    }
}

/// Where toast notifications are drawn.
pub trait NotificationSurface {
    fn mount(&self, banner: &Banner) -> BannerId;

    /// Removes a banner. Must tolerate ids that were already removed.
    fn remove(&self, id: BannerId);
}
