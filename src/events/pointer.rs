use super::PageWiring;
use crate::core::pointer::PointerState;
use crate::dom;
use crate::subscription::Listener;
use web_sys as web;

pub fn wire_pointer(w: &PageWiring) -> Vec<Listener> {
    let pointer = w.pointer.clone();
    let on_move = Listener::on_window("pointermove", move |ev: web::PointerEvent| {
        let (vw, vh) = dom::viewport_size();
        pointer.set(PointerState::from_client(
            ev.client_x() as f32,
            ev.client_y() as f32,
            vw,
            vh,
        ));
    });
    on_move.into_iter().collect()
}
