use crate::constants::{CONTACT_CLOSE_ID, CONTACT_MODAL_ID, HIDDEN_CLASS};
use crate::dom;
use crate::subscription::Listener;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTACT_MODAL_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        _ = el.set_attribute("aria-hidden", "false");
        // Move focus into the form so keyboard users land in it
        if let Ok(Some(first)) = el.query_selector("input, textarea") {
            if let Ok(first) = first.dyn_into::<web::HtmlElement>() {
                _ = first.focus();
            }
        }
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTACT_MODAL_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("aria-hidden", "true");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(CONTACT_MODAL_ID)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Close button and backdrop clicks hide the modal.
pub fn wire_contact_modal(document: &web::Document) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let doc = document.clone();
    listeners.extend(dom::add_click_listener(document, CONTACT_CLOSE_ID, move || {
        hide(&doc)
    }));
    if let Some(modal) = document.get_element_by_id(CONTACT_MODAL_ID) {
        let doc = document.clone();
        let modal_target: web::EventTarget = modal.clone().into();
        listeners.push(Listener::new(modal.as_ref(), "click", move |ev: web::MouseEvent| {
            // Only clicks on the backdrop itself, not inside the dialog
            if ev.target().as_ref() == Some(&modal_target) {
                hide(&doc);
            }
        }));
    }
    listeners
}
