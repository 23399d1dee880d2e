//! Timer-driven UI behavior: auto refresh, toast expiry, alert dismissal and
//! the pending state of the prediction submit button.
//!
//! Everything runs on a paused tokio clock inside a `LocalSet`, so timers
//! fire deterministically as the test sleeps.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::LocalSet;
use tokio::time::sleep;

use crop_dashboard::env::{Banner, BannerId, Document, NotificationSurface, TokioScheduler};
use crop_dashboard::ui::{
    begin_submit, schedule_alert_dismissal, AutoRefresh, Notifications, SubmitControl,
    PENDING_LABEL,
};
use crop_dashboard::Severity;

#[derive(Default)]
struct RecordingSurface {
    next_id: Cell<u64>,
    visible: RefCell<Vec<(BannerId, Banner)>>,
}

impl NotificationSurface for RecordingSurface {
    fn mount(&self, banner: &Banner) -> BannerId {
        let id = BannerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.visible.borrow_mut().push((id, banner.clone()));
        id
    }

    fn remove(&self, id: BannerId) {
        self.visible.borrow_mut().retain(|(shown, _)| *shown != id);
    }
}

struct AlertPage {
    open: RefCell<Vec<u32>>,
}

impl Document for AlertPage {
    type Alert = u32;

    fn contains(&self, _element_id: &str) -> bool {
        false
    }

    fn alerts(&self) -> Vec<u32> {
        self.open.borrow().clone()
    }

    fn dismiss_alert(&self, alert: &u32) {
        self.open.borrow_mut().retain(|open| open != alert);
    }
}

struct FakeButton {
    label: RefCell<String>,
    disabled: Cell<bool>,
}

impl SubmitControl for FakeButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn auto_refresh_runs_until_stopped() {
    LocalSet::new()
        .run_until(async {
            let runs = Rc::new(Cell::new(0));
            let counter = Rc::clone(&runs);
            let mut refresh = AutoRefresh::new();
            assert!(!refresh.is_running());

            refresh.start(&TokioScheduler, Duration::from_secs(30), move || {
                counter.set(counter.get() + 1)
            });
            assert!(refresh.is_running());

            sleep(Duration::from_secs(65)).await;
            assert_eq!(runs.get(), 2);

            refresh.stop();
            assert!(!refresh.is_running());
            sleep(Duration::from_secs(120)).await;
            assert_eq!(runs.get(), 2);
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn restarting_auto_refresh_replaces_the_old_schedule() {
    LocalSet::new()
        .run_until(async {
            let old_runs = Rc::new(Cell::new(0));
            let new_runs = Rc::new(Cell::new(0));
            let mut refresh = AutoRefresh::new();

            let counter = Rc::clone(&old_runs);
            refresh.start(&TokioScheduler, Duration::from_secs(10), move || {
                counter.set(counter.get() + 1)
            });
            sleep(Duration::from_secs(15)).await;

            let counter = Rc::clone(&new_runs);
            refresh.start(&TokioScheduler, Duration::from_secs(10), move || {
                counter.set(counter.get() + 1)
            });
            sleep(Duration::from_secs(25)).await;

            assert_eq!(old_runs.get(), 1);
            assert_eq!(new_runs.get(), 2);
            refresh.stop();
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn zero_period_auto_refresh_still_ticks() {
    LocalSet::new()
        .run_until(async {
            let runs = Rc::new(Cell::new(0));
            let counter = Rc::clone(&runs);
            let mut refresh = AutoRefresh::new();

            refresh.start(&TokioScheduler, Duration::ZERO, move || {
                counter.set(counter.get() + 1)
            });
            sleep(Duration::from_millis(20)).await;
            assert!(refresh.is_running());
            assert!(runs.get() >= 10, "only {} runs", runs.get());

            refresh.stop();
            let stopped_at = runs.get();
            sleep(Duration::from_millis(50)).await;
            assert_eq!(runs.get(), stopped_at);
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toast_expires_after_five_seconds() {
    LocalSet::new()
        .run_until(async {
            let surface = Rc::new(RecordingSurface::default());
            let notifications = Notifications::new(Rc::clone(&surface), Rc::new(TokioScheduler));

            let _toast = notifications.success("Prediction saved");
            {
                let visible = surface.visible.borrow();
                assert_eq!(visible.len(), 1);
                assert_eq!(visible[0].1.severity, Severity::Success);
                assert!(visible[0].1.class_name().starts_with("alert alert-success "));
            }

            sleep(Duration::from_millis(4_500)).await;
            assert_eq!(surface.visible.borrow().len(), 1);
            sleep(Duration::from_secs(1)).await;
            assert!(surface.visible.borrow().is_empty());
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn dismissed_toast_leaves_others_alone() {
    LocalSet::new()
        .run_until(async {
            let surface = Rc::new(RecordingSurface::default());
            let notifications = Notifications::new(Rc::clone(&surface), Rc::new(TokioScheduler));

            let first = notifications.error("Prediction failed");
            sleep(Duration::from_secs(2)).await;
            let _second = notifications.info("Retrying");

            first.dismiss();
            {
                let visible = surface.visible.borrow();
                assert_eq!(visible.len(), 1);
                assert_eq!(visible[0].1.message, "Retrying");
                assert_eq!(visible[0].1.severity, Severity::Info);
            }

            sleep(Duration::from_secs(6)).await;
            assert!(surface.visible.borrow().is_empty());
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn alerts_close_after_delay_unless_cancelled() {
    LocalSet::new()
        .run_until(async {
            let page = Rc::new(AlertPage {
                open: RefCell::new(vec![1, 2, 3]),
            });

            let mut handles =
                schedule_alert_dismissal(Rc::clone(&page), &TokioScheduler, Duration::from_secs(5));
            assert_eq!(handles.len(), 3);

            // keep alert 2 open
            handles.remove(1).cancel();

            sleep(Duration::from_secs(6)).await;
            assert_eq!(*page.open.borrow(), vec![2]);
        })
        .await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn submit_button_resets_after_delay() {
    LocalSet::new()
        .run_until(async {
            let button = Rc::new(FakeButton {
                label: RefCell::new("Predict".to_string()),
                disabled: Cell::new(false),
            });

            let _reset = begin_submit(
                Rc::clone(&button),
                &TokioScheduler,
                Duration::from_secs(3),
                PENDING_LABEL,
            );
            assert!(button.disabled.get());
            assert_eq!(button.label(), PENDING_LABEL);

            sleep(Duration::from_millis(3_100)).await;
            assert!(!button.disabled.get());
            assert_eq!(button.label(), "Predict");
        })
        .await;
}
