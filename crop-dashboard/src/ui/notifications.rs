use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::config::TOAST_LIFETIME;
use crate::env::{Banner, BannerId, NotificationSurface, Scheduler, TimerHandle};
use crate::models::Severity;

/// Shows auto-expiring toast banners.
pub struct Notifications<N: ?Sized, S: ?Sized> {
    surface: Rc<N>,
    scheduler: Rc<S>,
    lifetime: Duration,
}

impl<N, S> Notifications<N, S>
where
    N: NotificationSurface + ?Sized + 'static,
    S: Scheduler + ?Sized,
{
    pub fn new(surface: Rc<N>, scheduler: Rc<S>) -> Self {
        Self::with_lifetime(surface, scheduler, TOAST_LIFETIME)
    }

    pub fn with_lifetime(surface: Rc<N>, scheduler: Rc<S>, lifetime: Duration) -> Self {
        Self {
            surface,
            scheduler,
            lifetime,
        }
    }

    pub fn show(&self, message: &str, severity: Severity) -> Toast<N> {
        let banner = Banner {
            message: message.to_string(),
            severity,
        };
        let id = self.surface.mount(&banner);
        debug!(?id, %severity, "toast shown");

        let surface = Rc::clone(&self.surface);
        let expiry = self
            .scheduler
            .set_timeout(self.lifetime, Box::new(move || surface.remove(id)));

        Toast {
            id,
            surface: Rc::clone(&self.surface),
            expiry: Some(expiry),
        }
    }

    pub fn success(&self, message: &str) -> Toast<N> {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: &str) -> Toast<N> {
        self.show(message, Severity::Danger)
    }

    pub fn warning(&self, message: &str) -> Toast<N> {
        self.show(message, Severity::Warning)
    }

    pub fn info(&self, message: &str) -> Toast<N> {
        self.show(message, Severity::Info)
    }
}

/// A toast that is on screen until it expires or is dismissed.
pub struct Toast<N: NotificationSurface + ?Sized> {
    id: BannerId,
    surface: Rc<N>,
    expiry: Option<TimerHandle>,
}

impl<N: NotificationSurface + ?Sized> Toast<N> {
    pub fn id(&self) -> BannerId {
        self.id
    }

    /// Removes the toast now and cancels its expiry timer.
    pub fn dismiss(mut self) {
        if let Some(expiry) = self.expiry.take() {
            expiry.cancel();
        }
        self.surface.remove(self.id);
    }
}
