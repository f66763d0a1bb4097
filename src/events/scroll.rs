use super::PageWiring;
use crate::core::dock::dock_visible;
use crate::dom;
use crate::reveal;
use crate::subscription::Listener;
use web_sys as web;

/// Re-resolve section anchors against the current layout.
pub fn refresh_layout(w: &PageWiring) {
    let (_, vh) = dom::viewport_size();
    let doc = &w.document;
    w.tracker
        .borrow_mut()
        .refresh(vh, |id| dom::element_span(doc, id));
}

/// Feed the current scroll position to the tracker and the scroll-driven
/// page effects.
pub fn handle_scroll(w: &PageWiring) {
    let y = dom::scroll_y();
    let (_, vh) = dom::viewport_size();
    let target = &w.target;
    w.tracker.borrow_mut().update(y, |pose| {
        log::info!("[scroll] section -> {}", pose.section.unwrap_or("default"));
        *target.borrow_mut() = pose.clone();
    });

    let doc_h = dom::document_height(&w.document);
    {
        let mut dock = w.dock.borrow_mut();
        let margin = dock.config().hide_margin;
        dock.set_visible(dock_visible(y, vh, doc_h, margin));
    }
    reveal::apply_reveals(&w.document, vh);
    reveal::apply_hero_parallax(&w.document, y);
}

pub fn wire_scroll(w: &PageWiring) -> Vec<Listener> {
    let mut listeners = Vec::new();

    let ws = w.clone();
    listeners.extend(Listener::on_window("scroll", move |_: web::Event| {
        handle_scroll(&ws);
    }));

    // Layout-changing events move every trigger window
    for event in ["resize", "load"] {
        let wr = w.clone();
        listeners.extend(Listener::on_window(event, move |_: web::Event| {
            refresh_layout(&wr);
            wr.dock.borrow_mut().measure();
            handle_scroll(&wr);
        }));
    }
    listeners
}
