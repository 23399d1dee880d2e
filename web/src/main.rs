mod browser;
mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info};
use wasm_bindgen::JsCast;

use crop_dashboard::export::to_csv;
use crop_dashboard::external::ApiClient;
use crop_dashboard::ui::{
    begin_submit, format_percentage, schedule_alert_dismissal, AutoRefresh, Notifications,
    RevealOptions,
};
use crop_dashboard::{
    rank_top, ChartStyle, CropCountMap, CropCountsSnapshot, DashboardConfig, DashboardRenderer,
    RankedEntry,
};

use browser::{
    BrowserDocument, BrowserDownloader, BrowserNotifications, BrowserScheduler, ButtonControl,
    ChartJsSurface,
};

const EXPORT_BUTTON_ID: &str = "exportHistoryButton";
const STATUS_ID: &str = "dashboardStatus";

/// Everything the page needs after it is mounted.
struct DashboardPage {
    config: DashboardConfig,
    document: BrowserDocument,
    charts: ChartJsSurface,
    downloader: BrowserDownloader,
    scheduler: Rc<BrowserScheduler>,
    notifications: Notifications<BrowserNotifications, BrowserScheduler>,
    api: ApiClient,
    refresh: RefCell<AutoRefresh>,
}

impl DashboardPage {
    fn new(document: BrowserDocument, config: DashboardConfig) -> Self {
        let scheduler = Rc::new(BrowserScheduler);
        let notifications = Notifications::with_lifetime(
            Rc::new(BrowserNotifications::new(&document)),
            Rc::clone(&scheduler),
            config.toast_lifetime(),
        );
        let api_base = config.resolve_api_base(document.origin().as_deref());
        info!(api_base = %api_base, "dashboard API base resolved");
        Self {
            charts: ChartJsSurface::new(&document),
            downloader: BrowserDownloader::new(&document),
            api: ApiClient::new(api_base),
            refresh: RefCell::new(AutoRefresh::new()),
            notifications,
            scheduler,
            document,
            config,
        }
    }

    fn render_charts(&self, counts: &CropCountMap) {
        let renderer = DashboardRenderer::new(
            &self.document,
            &self.charts,
            ChartStyle::from_config(&self.config),
        );
        let report = renderer.render(counts, &self.config.targets());
        debug!(?report, "dashboard charts rendered");
    }

    async fn export_history(self: Rc<Self>) {
        let button = self
            .document
            .inner()
            .get_element_by_id(EXPORT_BUTTON_ID)
            .and_then(|el| el.dyn_into::<web_sys::HtmlButtonElement>().ok());
        let _reset = button.map(|button| {
            begin_submit(
                Rc::new(ButtonControl(button)),
                self.scheduler.as_ref(),
                self.config.submit_reset_delay(),
                "Exporting...",
            )
        });

        self.document.show_loading(STATUS_ID);
        let fetched = self.api.fetch_history().await;
        self.document.clear(STATUS_ID);

        let history = match fetched {
            Ok(history) => history,
            Err(err) => {
                self.notifications.error(&format!("Could not load history: {err}"));
                return;
            }
        };

        match to_csv(&self.downloader, &history, &self.config.csv_filename) {
            Ok(()) => {
                self.notifications
                    .success(&format!("Exported {} predictions", history.len()));
            }
            Err(err) => {
                tracing::error!(error = %err, "CSV export failed");
                self.notifications.error("Export failed");
            }
        }
    }

    async fn reload(self: Rc<Self>) {
        match self.api.fetch_history().await {
            Ok(history) => self.render_charts(&CropCountMap::from_predictions(&history)),
            Err(err) => {
                self.notifications.warning(&format!("Refresh failed: {err}"));
            }
        }
    }

    /// Starts or stops auto refresh. Returns whether it is now running.
    fn toggle_refresh(self: &Rc<Self>) -> bool {
        let mut refresh = self.refresh.borrow_mut();
        if refresh.is_running() {
            refresh.stop();
            self.notifications.info("Auto refresh stopped");
            return false;
        }

        let page = Rc::clone(self);
        refresh.start(self.scheduler.as_ref(), self.config.refresh_period(), move || {
            spawn_local(Rc::clone(&page).reload());
        });
        self.notifications.info("Auto refresh started");
        true
    }
}

fn load_snapshot() -> CropCountsSnapshot {
    match toml::from_str(include_str!("crop_counts.toml")) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::error!(error = %err, "invalid crop counts");
            CropCountsSnapshot::default()
        }
    }
}

#[component]
fn App(page: Rc<DashboardPage>, snapshot: CropCountsSnapshot) -> impl IntoView {
    let page = StoredValue::new_local(page);
    let (refreshing, set_refreshing) = signal(false);

    let total = snapshot.total_predictions;
    let top_crops = rank_top(&snapshot.crop_counts, page.with_value(|p| p.config.top_crops));

    // Helper function to format ISO date to human readable
    let format_date = |iso_date: &str| -> String {
        if let Some(date_part) = iso_date.split('T').next() {
            if let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                return date.format("%b %d, %Y").to_string();
            }
        }
        iso_date.to_string()
    };
    let last_updated = format_date(&snapshot.last_updated);

    let (pie_id, bar_id) = page.with_value(|p| {
        (p.config.pie_canvas_id.clone(), p.config.bar_canvas_id.clone())
    });

    view! {
        <div class="container py-5">
            <header class="text-center mb-5">
                <h1 class="display-5 fw-bold text-success">"SmartCrop Dashboard"</h1>
                <p class="text-muted">
                    {total.to_string()} " predictions across "
                    {snapshot.crop_counts.len().to_string()} " crops"
                </p>
                <span class="small text-muted">"Updated " {last_updated}</span>
            </header>
            <div class="row g-4">
                <div class="col-md-6">
                    <div class="card p-4 shadow-sm">
                        <h2 class="h5 mb-3">"Crop distribution"</h2>
                        <canvas id=pie_id></canvas>
                    </div>
                </div>
                <div class="col-md-6">
                    <div class="card p-4 shadow-sm">
                        <h2 class="h5 mb-3">"Top crops"</h2>
                        <canvas id=bar_id></canvas>
                    </div>
                </div>
            </div>
            <div class="mt-4">
                <TopCropsRanking crops=top_crops total=total />
            </div>
            <div id=STATUS_ID class="mt-4"></div>
            <div class="d-flex gap-3 mt-4">
                <button
                    id=EXPORT_BUTTON_ID
                    type="button"
                    class="btn btn-success"
                    on:click=move |_| spawn_local(page.get_value().export_history())
                >
                    "Export history (CSV)"
                </button>
                <button
                    type="button"
                    class="btn btn-outline-secondary"
                    on:click=move |_| set_refreshing.set(page.with_value(|p| p.toggle_refresh()))
                >
                    {move || if refreshing.get() { "Stop auto refresh" } else { "Start auto refresh" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn TopCropsRanking(crops: Vec<RankedEntry>, total: u64) -> impl IntoView {
    if crops.is_empty() {
        return view! {
            <p class="text-muted">"No predictions yet. Make one to fill the dashboard."</p>
        }
        .into_any();
    }

    view! {
        <div class="card p-4 shadow-sm">
            <h2 class="h5 mb-3">"Ranking: most predicted crops"</h2>
            <ul class="list-unstyled mb-0">
                {crops.into_iter().enumerate().map(|(index, entry)| {
                    let share = if total == 0 {
                        String::new()
                    } else {
                        format_percentage(entry.count as f64 / total as f64, 1)
                    };
                    view! {
                        <li class="d-flex align-items-center py-2 border-bottom">
                            <span class="me-3 text-muted">{format!("#{}", index + 1)}</span>
                            <span class="crop-badge fw-medium">{entry.name}</span>
                            <span class="flex-grow-1"></span>
                            <span class="me-3">{entry.count.to_string()}</span>
                            <span class="text-muted small">{share}</span>
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
    .into_any()
}

fn main() {
    logging::init();

    let Some(document) = BrowserDocument::current() else {
        tracing::error!("SmartCrop dashboard needs a browser document");
        return;
    };

    let snapshot = load_snapshot();
    let page = Rc::new(DashboardPage::new(document, DashboardConfig::default()));

    let app_page = Rc::clone(&page);
    let app_snapshot = snapshot.clone();
    leptos::mount::mount_to_body(move || view! { <App page=app_page snapshot=app_snapshot /> });

    // Each step stands alone: a chart that cannot be drawn must not keep
    // alerts from closing.
    page.render_charts(&snapshot.crop_counts);
    page.document.enable_smooth_scrolling();
    page.document.reveal_on_scroll(&RevealOptions::default());
    let _alerts = schedule_alert_dismissal(
        Rc::new(page.document.clone()),
        page.scheduler.as_ref(),
        page.config.alert_dismiss_delay(),
    );
    debug!("all dashboard modules initialized");
}
