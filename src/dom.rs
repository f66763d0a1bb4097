use crate::core::tracker::Span;
use crate::subscription::Listener;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = document.get_element_by_id(element_id)?;
    Some(Listener::new(el.as_ref(), "click", move |_: web::MouseEvent| handler()))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (px(w.inner_width()), px(w.inner_height()))
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn document_height(document: &web::Document) -> f32 {
    document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0)
}

/// Element span in document coordinates. `key` is an element id, or
/// `footer` for the page footer element.
pub fn element_span(document: &web::Document, key: &str) -> Option<Span> {
    let el = document
        .get_element_by_id(key)
        .or_else(|| document.query_selector(key).ok().flatten())?;
    let rect = el.get_bounding_client_rect();
    Some(Span::new(rect.top() as f32 + scroll_y(), rect.height() as f32))
}

pub fn scroll_to_anchor(document: &web::Document, id: &str) {
    match document.get_element_by_id(id) {
        Some(el) => {
            let opts = web::ScrollIntoViewOptions::new();
            opts.set_behavior(web::ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }
        None => log::warn!("[dom] no anchor #{}", id),
    }
}

pub fn open_url(url: &str) {
    if let Some(w) = web::window() {
        if let Err(e) = w.open_with_url_and_target(url, "_blank") {
            log::warn!("[dom] failed to open {}: {:?}", url, e);
        }
    }
}

/// Value of a query-string parameter of the current page.
pub fn query_param(key: &str) -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    web::UrlSearchParams::new_with_str(&search).ok()?.get(key)
}

pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// True when keyboard input is headed for a text field.
pub fn is_text_entry(target: Option<web::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}
