use crate::camera::Camera;
use crate::constants::{ARRIVAL_DISTANCE, MAX_FRAME_DT_SEC};
use crate::core::interp::{MorphTracker, PoseInterpolator};
use crate::core::mascot::{make_mascot, DrawList, FrameInput, Mascot};
use crate::core::theme::ThemeBlender;
use crate::dom;
use crate::events::PageWiring;
use crate::render;
use crate::subscription::AnimationLoop;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct FrameContext<'a> {
    pub wiring: PageWiring,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub camera: Camera,

    pub interp: PoseInterpolator,
    pub theme: ThemeBlender,
    pub morph: MorphTracker,
    pub mascot: Box<dyn Mascot>,
    pub draw: DrawList,
    arrived: bool,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(wiring: PageWiring, canvas: web::HtmlCanvasElement, gpu: Option<render::GpuState<'a>>) -> Self {
        let target = wiring.target.borrow().clone();
        let mascot = make_mascot(wiring.mascot.get());
        Self {
            theme: ThemeBlender::new(target.section),
            interp: PoseInterpolator::new(&target),
            wiring,
            canvas,
            gpu,
            camera: Camera::default(),
            morph: MorphTracker::default(),
            mascot,
            draw: DrawList::default(),
            arrived: false,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        // Scroll handlers have already run for this frame; read the target once
        let target = self.wiring.target.borrow().clone();
        let pointer = self.wiring.pointer.get();

        let requested = self.wiring.mascot.get();
        if requested != self.mascot.kind() {
            self.mascot = make_mascot(requested);
            self.wiring.dock.borrow().set_toggle_label(requested);
        }

        self.interp.step(&target, &pointer);
        let arrived = self.interp.distance_to(&target) < ARRIVAL_DISTANCE;
        if arrived && !self.arrived {
            log::debug!("[mascot] settled at {:?}", target.section);
        }
        self.arrived = arrived;
        let theme = self.theme.step(target.section);
        self.mascot.update(&pointer, theme);

        let (_, vh) = dom::viewport_size();
        let morph = self.morph.step(dom::scroll_y(), vh);

        self.draw.clear();
        let input = FrameInput {
            pose: self.interp.rendered(),
            pointer: &pointer,
            theme,
            osc: self.interp.oscillation(),
            morph,
        };
        self.mascot.draw(&input, &mut self.draw);
        let glow = theme.glow_intensity;

        self.wiring.dock.borrow_mut().apply(dt_sec);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(dt_sec, &self.camera, &self.draw, glow) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> AnimationLoop {
    AnimationLoop::start(move || frame_ctx.borrow_mut().frame())
}
