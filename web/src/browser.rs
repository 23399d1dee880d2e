//! `web_sys` implementations of the dashboard environment traits.

use std::cell::Cell;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, Element, Event, HtmlAnchorElement, HtmlButtonElement, HtmlCanvasElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Url,
};

use crop_dashboard::env::{
    Banner, BannerId, ChartSurface, DownloadError, Document, Downloader, NotificationSurface,
    Scheduler, SurfaceError, TimerHandle, MIN_INTERVAL,
};
use crop_dashboard::ui::{
    anchor_target, RevealOptions, SubmitControl, ANCHOR_SELECTOR, FADE_IN_CLASS, FADE_IN_SELECTOR,
    LOADING_MARKUP,
};
use crop_dashboard::ChartConfig;

#[wasm_bindgen]
extern "C" {
    /// The global `Chart` constructor from Chart.js.
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(static_method_of = Chart, js_name = getChart)]
    fn get_chart(key: &str) -> Option<Chart>;

    #[wasm_bindgen(method, setter = data)]
    fn set_data(this: &Chart, data: &JsValue);

    #[wasm_bindgen(method)]
    fn update(this: &Chart);

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Converts through JSON so maps become plain objects, as Chart.js expects.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, SurfaceError> {
    let json = serde_json::to_string(value).map_err(|err| SurfaceError::Encode(err.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|err| SurfaceError::Encode(js_error(&err)))
}

#[derive(Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }

    /// `scheme://host:port` of the page, used as the API base.
    pub fn origin(&self) -> Option<String> {
        self.document.location()?.origin().ok()
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Makes in-page links scroll smoothly to their target.
    pub fn enable_smooth_scrolling(&self) {
        for anchor in self.select_all(ANCHOR_SELECTOR) {
            let document = self.document.clone();
            let link = anchor.clone();
            let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(selector) = anchor_target(&href) else {
                    return;
                };
                if let Ok(Some(target)) = document.query_selector(selector) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            });
            if let Err(err) = anchor
                .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                warn!(error = %js_error(&err), "could not attach scroll handler");
            }
            // listeners live as long as the page
            on_click.forget();
        }
    }

    /// Adds the fade-in class to cards and badges once they scroll into view.
    pub fn reveal_on_scroll(&self, options: &RevealOptions) {
        let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1(FADE_IN_CLASS);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = match IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(error = %js_error(&err), "IntersectionObserver unavailable");
                return;
            }
        };
        on_intersect.forget();

        for element in self.select_all(FADE_IN_SELECTOR) {
            observer.observe(&element);
        }
    }

    /// Replaces the content of the element with this id by a spinner.
    pub fn show_loading(&self, element_id: &str) {
        if let Some(element) = self.document.get_element_by_id(element_id) {
            element.set_inner_html(LOADING_MARKUP);
        }
    }

    pub fn clear(&self, element_id: &str) {
        if let Some(element) = self.document.get_element_by_id(element_id) {
            element.set_inner_html("");
        }
    }
}

impl Document for BrowserDocument {
    type Alert = Element;

    fn contains(&self, element_id: &str) -> bool {
        self.document.get_element_by_id(element_id).is_some()
    }

    fn alerts(&self) -> Vec<Element> {
        self.select_all(".alert")
    }

    fn dismiss_alert(&self, alert: &Element) {
        let _ = alert.class_list().remove_1("show");
        alert.remove();
    }
}

pub struct BrowserScheduler;

impl BrowserScheduler {
    fn delay_ms(delay: Duration) -> i32 {
        delay.as_millis().min(i32::MAX as u128) as i32
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let Some(window) = web_sys::window() else {
            warn!("no window, timeout not scheduled");
            return TimerHandle::new(|| {});
        };

        let function: js_sys::Function = Closure::once_into_js(move || callback()).unchecked_into();
        match window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&function, Self::delay_ms(delay))
        {
            Ok(id) => TimerHandle::new(move || window.clear_timeout_with_handle(id)),
            Err(err) => {
                warn!(error = %js_error(&err), "setTimeout failed");
                TimerHandle::new(|| {})
            }
        }
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        let Some(window) = web_sys::window() else {
            warn!("no window, interval not scheduled");
            return TimerHandle::new(|| {});
        };

        let function: js_sys::Function = Closure::wrap(callback).into_js_value().unchecked_into();
        match window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                &function,
                Self::delay_ms(period.max(MIN_INTERVAL)),
            )
        {
            Ok(id) => TimerHandle::new(move || window.clear_interval_with_handle(id)),
            Err(err) => {
                warn!(error = %js_error(&err), "setInterval failed");
                TimerHandle::new(|| {})
            }
        }
    }
}

/// Chart.js bound to canvases by element id.
pub struct ChartJsSurface {
    document: web_sys::Document,
}

impl ChartJsSurface {
    pub fn new(document: &BrowserDocument) -> Self {
        Self {
            document: document.inner().clone(),
        }
    }
}

impl ChartSurface for ChartJsSurface {
    fn draw(&self, canvas_id: &str, config: &ChartConfig) -> Result<(), SurfaceError> {
        let not_a_canvas = || SurfaceError::NotACanvas(canvas_id.to_string());
        let canvas = self
            .document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(not_a_canvas)?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(not_a_canvas)?;
        let config = to_js(config)?;

        // Chart.js refuses a canvas that still has a chart attached
        if let Some(existing) = Chart::get_chart(canvas_id) {
            existing.destroy();
        }
        Chart::new(&context, &config).map_err(|err| SurfaceError::Library(js_error(&err)))?;
        Ok(())
    }

    fn update(&self, canvas_id: &str, config: &ChartConfig) -> Result<bool, SurfaceError> {
        let Some(chart) = Chart::get_chart(canvas_id) else {
            return Ok(false);
        };
        chart.set_data(&to_js(&config.data)?);
        chart.update();
        Ok(true)
    }
}

/// Downloads text through a temporary object URL and a hidden link.
pub struct BrowserDownloader {
    document: web_sys::Document,
}

impl BrowserDownloader {
    pub fn new(document: &BrowserDocument) -> Self {
        Self {
            document: document.inner().clone(),
        }
    }

    fn try_download(&self, filename: &str, mime_type: &str, contents: &str) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let link: HtmlAnchorElement = self.document.create_element("a")?.unchecked_into();
        link.set_attribute("hidden", "")?;
        link.set_href(&url);
        link.set_download(filename);

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&link)?;
        link.click();
        body.remove_child(&link)?;
        Url::revoke_object_url(&url)?;
        Ok(())
    }
}

impl Downloader for BrowserDownloader {
    fn download(&self, filename: &str, mime_type: &str, contents: &str) -> Result<(), DownloadError> {
        self.try_download(filename, mime_type, contents)
            .map_err(|err| DownloadError {
                filename: filename.to_string(),
                reason: js_error(&err),
            })
    }
}

/// Toast banners appended to the page body.
pub struct BrowserNotifications {
    document: web_sys::Document,
    next_id: Cell<u64>,
}

impl BrowserNotifications {
    pub fn new(document: &BrowserDocument) -> Self {
        Self {
            document: document.inner().clone(),
            next_id: Cell::new(0),
        }
    }

    fn element_id(id: BannerId) -> String {
        format!("smartcrop-toast-{}", id.0)
    }

    fn build(&self, banner: &Banner, id: BannerId) -> Result<Element, JsValue> {
        let alert = self.document.create_element("div")?;
        alert.set_id(&Self::element_id(id));
        alert.set_class_name(&banner.class_name());
        alert.set_attribute("role", "alert")?;
        alert.set_attribute("style", "z-index: 9999")?;

        let message = self.document.create_element("span")?;
        message.set_text_content(Some(&banner.message));
        alert.append_child(&message)?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        alert.append_child(&close)?;

        Ok(alert)
    }
}

impl NotificationSurface for BrowserNotifications {
    fn mount(&self, banner: &Banner) -> BannerId {
        let id = BannerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let mounted = self.build(banner, id).and_then(|alert| {
            let body = self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;
            body.append_child(&alert).map(|_| ())
        });
        if let Err(err) = mounted {
            warn!(error = %js_error(&err), "could not show notification");
        }
        id
    }

    fn remove(&self, id: BannerId) {
        if let Some(alert) = self.document.get_element_by_id(&Self::element_id(id)) {
            alert.remove();
        }
    }
}

/// A `<button>` driven through its inner HTML and `disabled` flag.
pub struct ButtonControl(pub HtmlButtonElement);

impl SubmitControl for ButtonControl {
    fn label(&self) -> String {
        self.0.inner_html()
    }

    /// A disabled button is pending, so it also gets a spinner.
    fn set_label(&self, label: &str) {
        if self.0.disabled() {
            self.0.set_inner_html(&format!(
                "<span class=\"spinner-border spinner-border-sm me-2\"></span>{}",
                label
            ));
        } else {
            self.0.set_inner_html(label);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.set_disabled(disabled);
    }
}
