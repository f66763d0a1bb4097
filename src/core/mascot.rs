use super::constants::*;
use super::interp::{blend, Oscillation, RenderedPose};
use super::pointer::PointerState;
use super::theme::{Rgb, Theme};
use glam::{Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

/// Meshes the renderer keeps resident. All but `Body` are unit-sized and
/// shaped by the part transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshId {
    /// The morphing blob/squared body.
    Body,
    Sphere,
    Cuboid,
    Cylinder,
    Smile,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Vec3,
    pub opacity: f32,
    /// Skip lighting and emit `emissive` only.
    pub unlit: bool,
}

impl Material {
    pub const fn solid(metalness: f32, roughness: f32) -> Self {
        Self {
            metalness,
            roughness,
            emissive: Vec3::ZERO,
            opacity: 1.0,
            unlit: false,
        }
    }

    pub fn unlit(color: Vec3, opacity: f32) -> Self {
        Self {
            metalness: 0.0,
            roughness: 1.0,
            emissive: color,
            opacity,
            unlit: true,
        }
    }

    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }
}

/// One mesh instance in world space.
#[derive(Clone, Copy, Debug)]
pub struct Part {
    pub mesh: MeshId,
    pub model: Mat4,
    pub color: Vec3,
    pub material: Material,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Zero means no distance falloff cut-off.
    pub range: f32,
}

/// Everything the renderer needs for one frame of a mascot.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub parts: SmallVec<[Part; 64]>,
    pub lights: SmallVec<[PointLight; 8]>,
    /// Morph factor for the `Body` mesh, when a rig uses it.
    pub morph: Option<f32>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.parts.clear();
        self.lights.clear();
        self.morph = None;
    }

    fn push(&mut self, mesh: MeshId, model: Mat4, color: Vec3, material: Material) {
        self.parts.push(Part {
            mesh,
            model,
            color,
            material,
        });
    }

    fn light(&mut self, group: &Mat4, local: Vec3, color: Rgb, intensity: f32, range: f32) {
        self.lights.push(PointLight {
            position: group.transform_point3(local),
            color: color.0,
            intensity,
            range,
        });
    }
}

/// Inputs shared by every rig for one frame.
pub struct FrameInput<'a> {
    pub pose: RenderedPose,
    pub pointer: &'a PointerState,
    pub theme: &'a Theme,
    pub osc: &'a Oscillation,
    pub morph: f32,
}

/// A drawable mascot variant.
pub trait Mascot {
    fn kind(&self) -> MascotKind;
    /// Advance secondary animation (eyes, rotors, gimbal). Once per frame.
    fn update(&mut self, pointer: &PointerState, theme: &Theme);
    /// Emit parts and lights for the current state.
    fn draw(&self, frame: &FrameInput<'_>, out: &mut DrawList);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MascotKind {
    #[default]
    Blob,
    Drone,
    Robot,
}

impl MascotKind {
    pub const ALL: [MascotKind; 3] = [MascotKind::Blob, MascotKind::Drone, MascotKind::Robot];

    pub fn next(self) -> Self {
        match self {
            MascotKind::Blob => MascotKind::Drone,
            MascotKind::Drone => MascotKind::Robot,
            MascotKind::Robot => MascotKind::Blob,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MascotKind::Blob => "Blob",
            MascotKind::Drone => "Drone",
            MascotKind::Robot => "Robot",
        }
    }

    /// Label for the control that switches away from this variant.
    pub fn switch_label(self) -> String {
        format!("Switch to {}", self.next().name())
    }
}

impl fmt::Display for MascotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMascot(pub String);

impl fmt::Display for UnknownMascot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mascot variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownMascot {}

impl FromStr for MascotKind {
    type Err = UnknownMascot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MascotKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMascot(s.to_string()))
    }
}

pub fn make_mascot(kind: MascotKind) -> Box<dyn Mascot> {
    match kind {
        MascotKind::Blob => Box::new(BlobRig::default()),
        MascotKind::Drone => Box::new(DroneRig::default()),
        MascotKind::Robot => Box::new(RobotRig::default()),
    }
}

/// Pupil offset that follows the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct EyeTracker {
    offset: Vec2,
}

impl EyeTracker {
    pub fn step(&mut self, pointer: &PointerState) -> Vec2 {
        let target = pointer.look_offset(PUPIL_LOOK_GAIN, PUPIL_MAX_OFFSET);
        self.offset = self.offset.lerp(target, K_PUPIL);
        self.offset
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

// Linear RGB
const EYE_WHITE: Vec3 = Vec3::ONE;
const PUPIL: Vec3 = Vec3::new(0.010, 0.010, 0.027);
const SMILE: Vec3 = Vec3::new(1.0, 0.147, 0.338);
const STEEL: Vec3 = Vec3::new(0.571, 0.604, 0.693);

#[inline]
fn trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Eye white, pupil and glint for an eye centered at `center` in `space`.
fn push_eye(
    out: &mut DrawList,
    space: &Mat4,
    center: Vec3,
    radius: f32,
    look: Vec2,
    glow: Rgb,
) {
    out.push(
        MeshId::Sphere,
        *space * trs(center, Quat::IDENTITY, Vec3::splat(radius)),
        EYE_WHITE,
        Material::solid(0.2, 0.3),
    );
    let pupil = center + Vec3::new(look.x, look.y, 0.0) * (radius / 0.2) + Vec3::Z * radius * 0.75;
    out.push(
        MeshId::Sphere,
        *space * trs(pupil, Quat::IDENTITY, Vec3::splat(radius * 0.5)),
        PUPIL,
        Material::solid(0.8, 0.2).with_emissive(glow.0 * 0.2),
    );
    let glint = center + Vec3::new(0.25, 0.4, 0.9) * radius;
    out.push(
        MeshId::Sphere,
        *space * trs(glint, Quat::IDENTITY, Vec3::splat(radius * 0.2)),
        EYE_WHITE,
        Material::unlit(EYE_WHITE, 1.0),
    );
}

/// Organic blob whose body morphs with scroll distance.
#[derive(Clone, Debug, Default)]
pub struct BlobRig {
    eyes: EyeTracker,
    body_yaw: f32,
}

impl Mascot for BlobRig {
    fn kind(&self) -> MascotKind {
        MascotKind::Blob
    }

    fn update(&mut self, pointer: &PointerState, theme: &Theme) {
        self.eyes.step(pointer);
        self.body_yaw += theme.spin;
    }

    fn draw(&self, frame: &FrameInput<'_>, out: &mut DrawList) {
        let group = frame.pose.model_matrix();
        let theme = frame.theme;
        out.morph = Some(frame.morph);

        out.push(
            MeshId::Body,
            group * Mat4::from_rotation_y(self.body_yaw),
            theme.main.0,
            Material::solid(theme.metalness, theme.roughness),
        );
        out.push(
            MeshId::Sphere,
            group * Mat4::from_scale(Vec3::splat(0.6)),
            theme.accent.0,
            Material::unlit(theme.accent.0, theme.inner_opacity),
        );

        let look = self.eyes.offset();
        for x in [-0.3, 0.3] {
            push_eye(out, &group, Vec3::new(x, 0.3, 0.9), 0.2, look, theme.glow);
        }
        out.push(
            MeshId::Smile,
            group * trs(Vec3::new(0.0, -0.1, 1.15), Quat::from_rotation_x(PI), Vec3::ONE),
            SMILE,
            Material::solid(0.3, 0.4).with_emissive(SMILE * 0.1),
        );

        let pulse = frame.osc.glow_pulse() * GLOW_PULSE_AMPLITUDE;
        out.light(&group, Vec3::ZERO, theme.glow, theme.glow_intensity + pulse, 5.0);
        out.light(&group, Vec3::new(2.0, 2.0, 2.0), theme.accent, 2.0, 0.0);
        out.light(&group, Vec3::new(-2.0, -1.0, -1.0), theme.main, 1.5, 0.0);
        out.light(&group, Vec3::new(0.0, 0.0, -2.0), theme.glow, 2.0, 0.0);
        out.light(&group, Vec3::new(0.0, 3.0, 0.0), theme.glow, 1.0, 8.0);
    }
}

const ROTOR_MOUNTS: [Vec3; 4] = [
    Vec3::new(0.8, 0.0, 0.8),
    Vec3::new(-0.8, 0.0, 0.8),
    Vec3::new(-0.8, 0.0, -0.8),
    Vec3::new(0.8, 0.0, -0.8),
];

/// Quad-rotor drone with a pointer-tracking camera gimbal.
#[derive(Clone, Debug, Default)]
pub struct DroneRig {
    eyes: EyeTracker,
    rotor_phase: f32,
    /// (yaw, pitch) of the gimbal.
    gimbal: Vec2,
}

impl DroneRig {
    pub fn gimbal(&self) -> Vec2 {
        self.gimbal
    }
}

impl Mascot for DroneRig {
    fn kind(&self) -> MascotKind {
        MascotKind::Drone
    }

    fn update(&mut self, pointer: &PointerState, _theme: &Theme) {
        self.eyes.step(pointer);
        self.rotor_phase = (self.rotor_phase + ROTOR_SPIN_PER_FRAME) % (2.0 * PI);
        let p = pointer.xy();
        let target = Vec2::new(p.x * 0.6, -p.y * 0.4);
        self.gimbal = self.gimbal.lerp(target, K_GIMBAL);
    }

    fn draw(&self, frame: &FrameInput<'_>, out: &mut DrawList) {
        let group = frame.pose.model_matrix();
        let theme = frame.theme;
        let shell = Material::solid(theme.metalness, theme.roughness);

        out.push(
            MeshId::Cuboid,
            group * Mat4::from_scale(Vec3::new(1.0, 0.3, 1.0)),
            theme.main.0,
            shell,
        );
        out.push(
            MeshId::Sphere,
            group * trs(Vec3::new(0.0, 0.18, 0.0), Quat::IDENTITY, Vec3::new(0.45, 0.22, 0.45)),
            theme.accent.0,
            Material::solid(0.3, 0.1),
        );

        for (i, mount) in ROTOR_MOUNTS.iter().enumerate() {
            let yaw = -(mount.z.atan2(mount.x));
            let arm_rot = Quat::from_rotation_y(yaw) * Quat::from_rotation_z(FRAC_PI_2);
            out.push(
                MeshId::Cylinder,
                group * trs(*mount * 0.55, arm_rot, Vec3::new(0.05, 0.75, 0.05)),
                STEEL,
                Material::solid(0.9, 0.3),
            );
            out.push(
                MeshId::Cylinder,
                group * trs(*mount + Vec3::Y * 0.08, Quat::IDENTITY, Vec3::new(0.09, 0.14, 0.09)),
                theme.main.0,
                shell,
            );
            // Neighbouring rotors counter-rotate
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            let blade = Quat::from_rotation_y(self.rotor_phase * dir + i as f32 * FRAC_PI_4);
            out.push(
                MeshId::Cuboid,
                group * trs(*mount + Vec3::Y * 0.17, blade, Vec3::new(0.75, 0.015, 0.07)),
                STEEL,
                Material::solid(0.5, 0.4),
            );
        }

        let gimbal_rot = Quat::from_rotation_y(self.gimbal.x) * Quat::from_rotation_x(self.gimbal.y);
        let gimbal_at = Vec3::new(0.0, -0.25, 0.3);
        out.push(
            MeshId::Sphere,
            group * trs(gimbal_at, gimbal_rot, Vec3::splat(0.16)),
            STEEL,
            Material::solid(0.7, 0.3),
        );
        let lens_offset = gimbal_rot * Vec3::new(0.0, 0.0, 0.14);
        out.push(
            MeshId::Cylinder,
            group
                * trs(
                    gimbal_at + lens_offset,
                    gimbal_rot * Quat::from_rotation_x(FRAC_PI_2),
                    Vec3::new(0.07, 0.06, 0.07),
                ),
            PUPIL,
            Material::solid(0.8, 0.1).with_emissive(theme.glow.0 * 0.6),
        );

        let look = self.eyes.offset() * 0.45;
        for x in [-0.22, 0.22] {
            push_eye(out, &group, Vec3::new(x, 0.02, 0.5), 0.09, look, theme.glow);
        }

        let pulse = frame.osc.glow_pulse() * GLOW_PULSE_AMPLITUDE;
        out.light(&group, Vec3::new(0.0, -0.3, 0.0), theme.glow, theme.glow_intensity + pulse, 5.0);
        out.light(&group, Vec3::new(2.0, 2.0, 2.0), theme.accent, 2.0, 0.0);
        out.light(&group, Vec3::new(-2.0, -1.0, -1.0), theme.main, 1.5, 0.0);
        out.light(&group, Vec3::new(0.0, 0.0, -2.0), theme.glow, 2.0, 0.0);
    }
}

/// Small humanoid robot whose head turns toward the pointer.
#[derive(Clone, Debug, Default)]
pub struct RobotRig {
    eyes: EyeTracker,
    /// (yaw, pitch) of the head.
    head: Vec2,
}

impl RobotRig {
    pub fn head(&self) -> Vec2 {
        self.head
    }
}

impl Mascot for RobotRig {
    fn kind(&self) -> MascotKind {
        MascotKind::Robot
    }

    fn update(&mut self, pointer: &PointerState, _theme: &Theme) {
        self.eyes.step(pointer);
        let p = pointer.xy();
        self.head.x = blend(self.head.x, p.x * 0.35, K_GIMBAL);
        self.head.y = blend(self.head.y, -p.y * 0.25, K_GIMBAL);
    }

    fn draw(&self, frame: &FrameInput<'_>, out: &mut DrawList) {
        let group = frame.pose.model_matrix();
        let theme = frame.theme;
        let shell = Material::solid(theme.metalness, theme.roughness);
        let joint = Material::solid(0.9, 0.3);

        out.push(
            MeshId::Cuboid,
            group * trs(Vec3::new(0.0, -0.1, 0.0), Quat::IDENTITY, Vec3::new(1.0, 0.9, 0.6)),
            theme.main.0,
            shell,
        );
        out.push(
            MeshId::Cuboid,
            group * trs(Vec3::new(0.0, -0.05, 0.31), Quat::IDENTITY, Vec3::new(0.5, 0.35, 0.02)),
            theme.accent.0,
            Material::solid(0.2, 0.2).with_emissive(theme.accent.0 * 0.3),
        );
        out.push(
            MeshId::Cylinder,
            group * trs(Vec3::new(0.0, 0.42, 0.0), Quat::IDENTITY, Vec3::new(0.12, 0.15, 0.12)),
            STEEL,
            joint,
        );

        let head_rot = Quat::from_rotation_y(self.head.x) * Quat::from_rotation_x(self.head.y);
        let head = group * Mat4::from_rotation_translation(head_rot, Vec3::new(0.0, 0.8, 0.0));
        out.push(
            MeshId::Cuboid,
            head * Mat4::from_scale(Vec3::new(0.9, 0.7, 0.8)),
            theme.main.0,
            shell,
        );
        out.push(
            MeshId::Cylinder,
            head * trs(Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY, Vec3::new(0.03, 0.3, 0.03)),
            STEEL,
            joint,
        );
        let pulse = frame.osc.glow_pulse() * GLOW_PULSE_AMPLITUDE;
        out.push(
            MeshId::Sphere,
            head * trs(Vec3::new(0.0, 0.68, 0.0), Quat::IDENTITY, Vec3::splat(0.07)),
            theme.glow.0,
            Material::unlit(theme.glow.0 * (1.0 + pulse), 1.0),
        );
        let look = self.eyes.offset() * 0.6;
        for x in [-0.2, 0.2] {
            push_eye(out, &head, Vec3::new(x, 0.05, 0.38), 0.12, look, theme.glow);
        }

        let swing = (frame.osc.float_phase * 4.0).sin() * 0.3;
        for (side, sign) in [(-1.0f32, 1.0f32), (1.0, -1.0)] {
            let shoulder = Vec3::new(side * 0.62, 0.2, 0.0);
            let arm = group
                * Mat4::from_rotation_translation(Quat::from_rotation_x(swing * sign), shoulder)
                * trs(Vec3::new(0.0, -0.4, 0.0), Quat::IDENTITY, Vec3::new(0.1, 0.8, 0.1));
            out.push(MeshId::Cylinder, arm, STEEL, joint);
            out.push(
                MeshId::Cylinder,
                group * trs(Vec3::new(side * 0.25, -0.85, 0.0), Quat::IDENTITY, Vec3::new(0.12, 0.6, 0.12)),
                STEEL,
                joint,
            );
        }

        out.light(&group, Vec3::new(0.0, 0.8, 0.6), theme.glow, theme.glow_intensity + pulse, 5.0);
        out.light(&group, Vec3::new(2.0, 2.0, 2.0), theme.accent, 2.0, 0.0);
        out.light(&group, Vec3::new(-2.0, -1.0, -1.0), theme.main, 1.5, 0.0);
        out.light(&group, Vec3::new(0.0, 0.0, -2.0), theme.glow, 2.0, 0.0);
    }
}
