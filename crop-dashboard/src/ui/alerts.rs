use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::env::{Document, Scheduler, TimerHandle};

/// Schedules every alert on the page to close after `delay`.
///
/// Returns one handle per alert so callers can keep an alert open by
/// cancelling its timer.
pub fn schedule_alert_dismissal<D, S>(
    document: Rc<D>,
    scheduler: &S,
    delay: Duration,
) -> Vec<TimerHandle>
where
    D: Document + 'static,
    S: Scheduler + ?Sized,
{
    let alerts = document.alerts();
    debug!(count = alerts.len(), ?delay, "scheduling alert dismissal");

    alerts
        .into_iter()
        .map(|alert| {
            let document = Rc::clone(&document);
            scheduler.set_timeout(delay, Box::new(move || document.dismiss_alert(&alert)))
        })
        .collect()
}
