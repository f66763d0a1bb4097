use std::f32::consts::PI;

/// Mass-spring-damper parameters for size transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 0.05,
            stiffness: 400.0,
            damping: 25.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockConfig {
    /// Item edge length at rest (CSS px).
    pub base_size: f32,
    /// Item edge length directly under the pointer.
    pub magnification: f32,
    /// Pointer distance beyond which items stay at `base_size`.
    pub distance: f32,
    pub panel_height: f32,
    pub dock_height: f32,
    /// Hide the dock when the viewport bottom is this close to the page end.
    pub hide_margin: f32,
    pub spring: SpringConfig,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            base_size: 50.0,
            magnification: 70.0,
            distance: 200.0,
            panel_height: 68.0,
            dock_height: 256.0,
            hide_margin: 100.0,
            spring: SpringConfig::default(),
        }
    }
}

impl DockConfig {
    /// Outer height while hovered, leaving room for labels above the icons.
    pub fn max_height(&self) -> f32 {
        self.dock_height
            .max(self.magnification + self.magnification / 2.0 + 4.0)
    }
}

/// Bell-shaped size falloff: `magnification` at distance 0, easing down to
/// `base_size` at `distance` and beyond. Non-finite distances (the "no
/// pointer" sentinel) map to `base_size`.
pub fn magnified_size(distance: f32, cfg: &DockConfig) -> f32 {
    let d = distance.abs();
    if !(d < cfg.distance) {
        return cfg.base_size;
    }
    let bell = 0.5 * (1.0 + (PI * d / cfg.distance).cos());
    cfg.base_size + (cfg.magnification - cfg.base_size) * bell
}

const SPRING_SUBSTEP_SEC: f32 = 0.001;
const SPRING_MAX_DT_SEC: f32 = 1.0 / 20.0;

/// Damped spring integrated in fixed 1 ms substeps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
}

impl Spring {
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    pub fn step(&mut self, target: f32, dt_sec: f32, cfg: &SpringConfig) -> f32 {
        if !target.is_finite() {
            return self.value;
        }
        let mut remaining = dt_sec.clamp(0.0, SPRING_MAX_DT_SEC);
        let inv_mass = 1.0 / cfg.mass.max(1e-4);
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP_SEC);
            let force = -cfg.stiffness * (self.value - target) - cfg.damping * self.velocity;
            self.velocity += force * inv_mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        self.value
    }
}

/// What a dock item does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockAction {
    /// Smooth-scroll to a section anchor id.
    ScrollTo(&'static str),
    /// Open an external link in a new tab.
    OpenUrl(&'static str),
    OpenContact,
    ToggleMascot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DockItem {
    /// Inline SVG markup or a glyph.
    pub icon: &'static str,
    pub label: String,
    pub action: DockAction,
}

impl DockItem {
    pub fn new(icon: &'static str, label: impl Into<String>, action: DockAction) -> Self {
        Self {
            icon,
            label: label.into(),
            action,
        }
    }
}

/// Hover and size state of the dock. Pointer and anchors share one
/// horizontal frame (client coordinates on the web).
#[derive(Clone, Debug)]
pub struct DockState {
    cfg: DockConfig,
    pointer_x: f32,
    anchors: Vec<f32>,
    sizes: Vec<Spring>,
    height: Spring,
}

impl DockState {
    pub fn new(cfg: DockConfig, item_count: usize) -> Self {
        Self {
            cfg,
            pointer_x: f32::INFINITY,
            anchors: vec![f32::NAN; item_count],
            sizes: vec![Spring::new(cfg.base_size); item_count],
            height: Spring::new(cfg.panel_height),
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.cfg
    }

    /// Left edge of each item's box. Extra entries are ignored.
    pub fn set_anchors(&mut self, lefts: impl IntoIterator<Item = f32>) {
        for (slot, left) in self.anchors.iter_mut().zip(lefts) {
            *slot = left;
        }
    }

    pub fn set_pointer(&mut self, page_x: f32) {
        self.pointer_x = page_x;
    }

    pub fn clear_pointer(&mut self) {
        self.pointer_x = f32::INFINITY;
    }

    pub fn is_hovered(&self) -> bool {
        self.pointer_x.is_finite()
    }

    /// Signed distance from the pointer to the center of item `i`.
    pub fn distance(&self, i: usize) -> f32 {
        match self.anchors.get(i) {
            Some(left) => self.pointer_x - left - self.cfg.base_size / 2.0,
            None => f32::INFINITY,
        }
    }

    pub fn target_size(&self, i: usize) -> f32 {
        magnified_size(self.distance(i), &self.cfg)
    }

    pub fn step(&mut self, dt_sec: f32) {
        for i in 0..self.sizes.len() {
            let target = self.target_size(i);
            self.sizes[i].step(target, dt_sec, &self.cfg.spring);
        }
        let height_target = if self.is_hovered() {
            self.cfg.max_height()
        } else {
            self.cfg.panel_height
        };
        self.height.step(height_target, dt_sec, &self.cfg.spring);
    }

    pub fn sizes(&self) -> impl Iterator<Item = f32> + '_ {
        self.sizes.iter().map(|s| s.value)
    }

    pub fn height(&self) -> f32 {
        self.height.value
    }
}

/// The dock stays visible until the viewport bottom comes within
/// `margin` of the document end.
pub fn dock_visible(scroll_y: f32, viewport_height: f32, document_height: f32, margin: f32) -> bool {
    scroll_y + viewport_height < document_height - margin
}
