#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::dock::{DockAction, DockConfig, DockItem};
use crate::core::mascot::MascotKind;
use crate::core::pointer::PointerState;
use crate::core::pose::Pose;
use crate::core::tracker::SectionTracker;
use crate::subscription::{Listener, PageSession};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod core;
mod dock;
mod dom;
mod events;
mod frame;
mod overlay;
mod reveal;
mod render;
mod subscription;

static STARTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SESSION: RefCell<Option<PageSession>> = const { RefCell::new(None) };
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<Listener> {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    Listener::on_window("resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas_resize);
    })
}

/// Dock entries supplied by the page; the dock only renders and dispatches them.
fn dock_items(kind: MascotKind) -> Vec<DockItem> {
    vec![
        DockItem::new("⌂", "Home", DockAction::ScrollTo("hero")),
        DockItem::new("☺", "About", DockAction::ScrollTo("about")),
        DockItem::new("✦", "Skills", DockAction::ScrollTo("skills")),
        DockItem::new("▣", "Projects", DockAction::ScrollTo("projects")),
        DockItem::new("✎", "Publications", DockAction::ScrollTo("publications")),
        DockItem::new("⌥", "GitHub", DockAction::OpenUrl(GITHUB_URL)),
        DockItem::new("in", "LinkedIn", DockAction::OpenUrl(LINKEDIN_URL)),
        DockItem::new("✉", "Contact", DockAction::OpenContact),
        DockItem::new("⟳", kind.switch_label(), DockAction::ToggleMascot),
    ]
}

fn initial_mascot() -> MascotKind {
    match dom::query_param(MASCOT_QUERY_KEY).map(|s| s.parse::<MascotKind>()) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            log::warn!("{}; using {}", e, MascotKind::default());
            MascotKind::default()
        }
        None => MascotKind::default(),
    }
}

/// Drop every listener and the frame loop when the page goes away.
fn wire_teardown() {
    let closure = Closure::wrap(Box::new(move |_: web::Event| {
        if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
            drop(session);
            STARTED.store(false, Ordering::SeqCst);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    // Lives for the whole document; it is what releases everything else
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    wire_teardown();
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut session = PageSession::default();
    session.hold_all(wire_canvas_resize(&canvas));

    let kind = initial_mascot();
    log::info!("[mascot] initial variant {}", kind);
    let dock = dock::DockView::build(&document, &dock_items(kind), DockConfig::default())?;

    let wiring = events::PageWiring {
        document: document.clone(),
        tracker: Rc::new(RefCell::new(SectionTracker::new())),
        target: Rc::new(RefCell::new(Pose::fallback())),
        pointer: Rc::new(Cell::new(PointerState::neutral())),
        mascot: Rc::new(Cell::new(kind)),
        dock: Rc::new(RefCell::new(dock)),
    };

    let wa = wiring.clone();
    let on_action: Rc<dyn Fn(DockAction)> = Rc::new(move |action| match action {
        DockAction::ScrollTo(id) => dom::scroll_to_anchor(&wa.document, id),
        DockAction::OpenUrl(url) => dom::open_url(url),
        DockAction::OpenContact => overlay::toggle(&wa.document),
        DockAction::ToggleMascot => wa.cycle_mascot(),
    });
    session.hold_all(dock::wire_dock(&wiring.dock, on_action));
    session.hold_all(overlay::wire_contact_modal(&document));
    session.hold_all(events::wire_page_handlers(&wiring));

    // First pass fires the enter for whichever section is on screen at load
    events::scroll::refresh_layout(&wiring);
    events::scroll::handle_scroll(&wiring);

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable; page runs without the mascot");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(wiring, canvas, gpu)));
    session.set_loop(frame::start_loop(frame_ctx));

    log::info!("[session] holding {} listeners", session.listener_count());
    SESSION.with(|s| *s.borrow_mut() = Some(session));
    Ok(())
}
