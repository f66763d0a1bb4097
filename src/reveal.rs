use crate::constants::{HERO_CONTENT_ID, HERO_ID, REVEALED_CLASS, REVEAL_SELECTOR};
use crate::core::reveal::{hero_parallax, should_reveal};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mark `.reveal` elements that have scrolled into view. Each element
/// reveals once; the selector skips ones already marked.
pub fn apply_reveals(document: &web::Document, viewport_height: f32) {
    let Ok(nodes) = document.query_selector_all(REVEAL_SELECTOR) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        if should_reveal(rect.top() as f32, rect.height() as f32, viewport_height) {
            _ = el.class_list().add_1(REVEALED_CLASS);
        }
    }
}

/// Drift and fade the hero content as it scrolls away.
pub fn apply_hero_parallax(document: &web::Document, scroll_y: f32) {
    let (Some(hero), Some(content)) = (
        dom::html_element(document, HERO_ID),
        dom::html_element(document, HERO_CONTENT_ID),
    ) else {
        return;
    };
    let height = hero.offset_height() as f32;
    if height <= 0.0 {
        return;
    }
    let p = hero_parallax((scroll_y - hero.offset_top() as f32) / height);
    let style = content.style();
    _ = style.set_property("transform", &format!("translateY({:.2}%)", p.translate_pct));
    _ = style.set_property("opacity", &format!("{:.3}", p.opacity));
}
