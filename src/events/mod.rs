use crate::core::mascot::MascotKind;
use crate::core::pointer::PointerState;
use crate::core::pose::Pose;
use crate::core::tracker::SectionTracker;
use crate::dock::DockView;
use crate::subscription::Listener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

pub mod keyboard;
pub mod pointer;
pub mod scroll;

/// State shared between event handlers and the frame loop. Handlers write,
/// the frame reads once per tick.
#[derive(Clone)]
pub struct PageWiring {
    pub document: web::Document,
    pub tracker: Rc<RefCell<SectionTracker>>,
    pub target: Rc<RefCell<Pose>>,
    pub pointer: Rc<Cell<PointerState>>,
    /// Variant the page asked for; the frame swaps rigs when it differs.
    pub mascot: Rc<Cell<MascotKind>>,
    pub dock: Rc<RefCell<DockView>>,
}

impl PageWiring {
    pub fn cycle_mascot(&self) {
        let next = self.mascot.get().next();
        log::info!("[mascot] switching to {}", next);
        self.mascot.set(next);
    }
}

pub fn wire_page_handlers(w: &PageWiring) -> Vec<Listener> {
    let mut listeners = scroll::wire_scroll(w);
    listeners.extend(pointer::wire_pointer(w));
    listeners.extend(keyboard::wire_keyboard(w));
    listeners
}
