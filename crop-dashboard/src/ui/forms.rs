use std::rc::Rc;
use std::time::Duration;

use crate::env::{Scheduler, TimerHandle};

/// Label shown on the prediction button while a submission is in flight.
pub const PENDING_LABEL: &str = "Prédiction en cours...";

/// Clamps a numeric input to its `min`/`max` attributes.
///
/// Missing bounds and a non-numeric value leave the value unchanged.
pub fn clamp_to_range(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut value = value;
    if let Some(min) = min {
        if value < min {
            value = min;
        }
    }
    if let Some(max) = max {
        if value > max {
            value = max;
        }
    }
    value
}

/// What a submit handler does for a form with the `needs-validation` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOutcome {
    /// Stop the submission and its propagation.
    pub prevent_submit: bool,
    /// Add the `was-validated` class so the browser shows feedback.
    pub mark_validated: bool,
}

pub fn check_form(is_valid: bool) -> FormOutcome {
    FormOutcome {
        prevent_submit: !is_valid,
        mark_validated: true,
    }
}

/// A submit button whose label and enabled state can be driven.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

/// Disables the button, shows `pending_label` and schedules the original
/// label back after `reset_after`.
pub fn begin_submit<C, S>(
    control: Rc<C>,
    scheduler: &S,
    reset_after: Duration,
    pending_label: &str,
) -> TimerHandle
where
    C: SubmitControl + 'static,
    S: Scheduler + ?Sized,
{
    let original = control.label();
    control.set_disabled(true);
    control.set_label(pending_label);

    scheduler.set_timeout(
        reset_after,
        Box::new(move || {
            control.set_disabled(false);
            control.set_label(&original);
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(clamp_to_range(-3.0, Some(0.0), Some(14.0)), 0.0);
        assert_eq!(clamp_to_range(15.5, Some(0.0), Some(14.0)), 14.0);
        assert_eq!(clamp_to_range(6.5, Some(0.0), Some(14.0)), 6.5);
    }

    #[test]
    fn missing_bounds_leave_value() {
        assert_eq!(clamp_to_range(500.0, None, None), 500.0);
        assert_eq!(clamp_to_range(-1.0, None, Some(10.0)), -1.0);
        assert!(clamp_to_range(f64::NAN, Some(0.0), Some(1.0)).is_nan());
    }

    #[test]
    fn invalid_form_is_blocked_but_always_marked() {
        assert_eq!(
            check_form(false),
            FormOutcome {
                prevent_submit: true,
                mark_validated: true
            }
        );
        assert!(!check_form(true).prevent_submit);
        assert!(check_form(true).mark_validated);
    }
}
