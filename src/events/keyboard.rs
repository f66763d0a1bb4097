use super::PageWiring;
use crate::core::keys::{command_for_key, KeyCommand};
use crate::dom;
use crate::overlay;
use crate::subscription::Listener;
use web_sys as web;

pub fn handle_key(w: &PageWiring, ev: &web::KeyboardEvent) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || ev.repeat() {
        return;
    }
    let key = ev.key();
    let Some(cmd) = command_for_key(&key) else {
        return;
    };
    match cmd {
        // Escape still closes the modal from inside its form fields
        KeyCommand::CloseContact => {
            if !overlay::is_hidden(&w.document) {
                overlay::hide(&w.document);
                ev.prevent_default();
            }
        }
        _ if dom::is_text_entry(ev.target()) => {}
        KeyCommand::CycleMascot => w.cycle_mascot(),
        KeyCommand::JumpTo(id) => {
            dom::scroll_to_anchor(&w.document, id);
            ev.prevent_default();
        }
    }
}

pub fn wire_keyboard(w: &PageWiring) -> Vec<Listener> {
    let wk = w.clone();
    Listener::on_window("keydown", move |ev: web::KeyboardEvent| handle_key(&wk, &ev))
        .into_iter()
        .collect()
}
