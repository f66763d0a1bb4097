use super::constants::*;
use super::pointer::PointerState;
use super::pose::Pose;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Move `current` a fraction `k` of the remaining way toward `target`.
#[inline]
pub fn blend(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Phase accumulators for the decorative motion layered over the pose.
/// Advanced by a fixed increment per frame, independent of the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct Oscillation {
    pub float_phase: f32,
    pub breathe_phase: f32,
    pub glow_phase: f32,
}

impl Oscillation {
    pub fn advance(&mut self) {
        self.float_phase += FLOAT_PHASE_STEP;
        self.breathe_phase += BREATHE_PHASE_STEP;
        self.glow_phase += GLOW_PHASE_STEP;
    }

    #[inline]
    pub fn float_offset(&self) -> f32 {
        self.float_phase.sin() * FLOAT_AMPLITUDE
    }

    #[inline]
    pub fn tilt(&self) -> Vec3 {
        Vec3::new(
            (self.float_phase * TILT_X_RATE).cos() * TILT_X_AMPLITUDE,
            0.0,
            (self.float_phase * TILT_Z_RATE).sin() * TILT_Z_AMPLITUDE,
        )
    }

    #[inline]
    pub fn breathe(&self) -> f32 {
        1.0 + self.breathe_phase.sin() * BREATHE_AMPLITUDE
    }

    /// Oscillates in [-1, 1].
    #[inline]
    pub fn glow_pulse(&self) -> f32 {
        self.glow_phase.sin()
    }
}

/// Transform handed to the renderer for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl RenderedPose {
    pub fn model_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.position)
    }
}

/// Per-frame animation state of the mascot. Written once per frame by
/// [`PoseInterpolator::step`]; the renderer reads [`PoseInterpolator::rendered`].
#[derive(Clone, Debug)]
pub struct PoseInterpolator {
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    pointer_yaw: f32,
    osc: Oscillation,
}

impl PoseInterpolator {
    pub fn new(initial: &Pose) -> Self {
        Self {
            position: initial.position,
            rotation: initial.rotation,
            scale: initial.scale,
            pointer_yaw: 0.0,
            osc: Oscillation::default(),
        }
    }

    pub fn step(&mut self, target: &Pose, pointer: &PointerState) {
        self.osc.advance();
        self.position = self.position.lerp(target.position, K_POSITION);
        self.rotation = self.rotation.lerp(target.rotation, K_ROTATION);
        self.scale = blend(self.scale, target.scale, K_SCALE);
        self.pointer_yaw = blend(self.pointer_yaw, pointer.xy().y * POINTER_YAW_GAIN, K_ROTATION);
    }

    /// Converging base values, without the oscillation layer.
    pub fn base(&self) -> RenderedPose {
        RenderedPose {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Base values with float, tilt, pointer yaw and breathing applied.
    pub fn rendered(&self) -> RenderedPose {
        let mut rotation = self.rotation + self.osc.tilt();
        rotation.y += self.pointer_yaw;
        RenderedPose {
            position: self.position + Vec3::Y * self.osc.float_offset(),
            rotation,
            scale: self.scale * self.osc.breathe(),
        }
    }

    /// Combined distance of the base values from `target`.
    pub fn distance_to(&self, target: &Pose) -> f32 {
        self.position.distance(target.position)
            + self.rotation.distance(target.rotation)
            + (self.scale - target.scale).abs()
    }

    pub fn oscillation(&self) -> &Oscillation {
        &self.osc
    }
}

/// Target morph factor for a scroll position: 0 at the top of the page,
/// 1 once the page has scrolled `MORPH_SCROLL_FRACTION` of a viewport.
pub fn morph_target(scroll_y: f32, viewport_height: f32) -> f32 {
    let span = viewport_height * MORPH_SCROLL_FRACTION;
    if !scroll_y.is_finite() || scroll_y <= 0.0 {
        return 0.0;
    }
    if !(span > 0.0) {
        return 1.0;
    }
    (scroll_y / span).clamp(0.0, 1.0)
}

/// Smoothed morph factor driven by absolute scroll distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct MorphTracker {
    factor: f32,
}

impl MorphTracker {
    pub fn step(&mut self, scroll_y: f32, viewport_height: f32) -> f32 {
        self.factor = blend(self.factor, morph_target(scroll_y, viewport_height), K_MORPH);
        self.factor
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}
