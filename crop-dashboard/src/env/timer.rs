use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Handle to a scheduled timeout or interval.
///
/// Dropping the handle leaves the timer running; only [`TimerHandle::cancel`]
/// stops it.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn cancel(mut self) {
        self.cancelled.set(true);
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Flag that flips once the timer is cancelled.
    pub fn cancelled_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.cancelled)
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancelled", &self.cancelled.get())
            .finish()
    }
}
