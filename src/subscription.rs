use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that stays registered for as long as this value lives.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Register `handler` for `event` on `target`. Events that are not of
    /// type `E` are ignored.
    pub fn new<E, F>(target: &web::EventTarget, event: &'static str, mut handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("[listener] failed to add '{}': {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    pub fn on_window<E, F>(event: &'static str, handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let window = web::window()?;
        Some(Self::new(window.as_ref(), event, handler))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop; dropping it cancels the pending frame.
pub struct AnimationLoop {
    pending: Rc<Cell<Option<i32>>>,
    slot: FrameSlot,
}

impl AnimationLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Self {
        let pending = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let pending_tick = pending.clone();
        let slot_tick = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            tick();
            pending_tick.set(request_frame(&slot_tick));
        }) as Box<dyn FnMut()>));

        pending.set(request_frame(&slot));
        Self { pending, slot }
    }
}

fn request_frame(slot: &FrameSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = slot.borrow();
    let callback = slot.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure -> slot reference cycle
        self.slot.borrow_mut().take();
    }
}

/// Everything registered for the lifetime of the page view.
#[derive(Default)]
pub struct PageSession {
    listeners: Vec<Listener>,
    frame_loop: Option<AnimationLoop>,
}

impl PageSession {
    pub fn hold_all(&mut self, listeners: impl IntoIterator<Item = Listener>) {
        self.listeners.extend(listeners);
    }

    pub fn set_loop(&mut self, frame_loop: AnimationLoop) {
        self.frame_loop = Some(frame_loop);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        // Stop the frame loop before its inputs go away
        self.frame_loop.take();
        log::info!("[session] released {} listeners", self.listeners.len());
        self.listeners.clear();
    }
}
