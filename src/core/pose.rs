use glam::Vec3;

/// Where and how the mascot is drawn, optionally tagged with the section
/// that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Euler angles (radians), applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
    pub section: Option<&'static str>,
}

impl Pose {
    pub const fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
            section: None,
        }
    }

    pub const fn tagged(self, section: &'static str) -> Self {
        Self {
            section: Some(section),
            ..self
        }
    }

    /// Centered pose used while the footer is on screen.
    pub const fn neutral() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, 1.0).tagged(FOOTER_ID)
    }

    /// Pose used before any section has been entered, and when section
    /// anchors cannot be resolved.
    pub const fn fallback() -> Self {
        Self::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 1.2)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::fallback()
    }
}

/// A named content section and the pose the mascot adopts inside it.
#[derive(Clone, Copy, Debug)]
pub struct SectionDescriptor {
    /// DOM anchor id (without `#`).
    pub id: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl SectionDescriptor {
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation, self.scale).tagged(self.id)
    }
}

pub const FOOTER_ID: &str = "footer";

pub const SECTIONS: [SectionDescriptor; 6] = [
    SectionDescriptor {
        id: "hero",
        position: Vec3::new(2.0, 0.0, 0.0),
        rotation: Vec3::new(0.0, -0.3, 0.0),
        scale: 0.8,
    },
    SectionDescriptor {
        id: "about",
        position: Vec3::new(-2.0, -0.5, 1.0),
        rotation: Vec3::new(0.1, 0.3, 0.0),
        scale: 0.7,
    },
    SectionDescriptor {
        id: "skills",
        position: Vec3::new(1.5, 0.0, 0.0),
        rotation: Vec3::new(0.0, -0.3, 0.1),
        scale: 0.7,
    },
    SectionDescriptor {
        id: "highlights",
        position: Vec3::new(-1.5, 0.0, 0.0),
        rotation: Vec3::new(0.0, 0.3, -0.1),
        scale: 0.7,
    },
    SectionDescriptor {
        id: "projects",
        position: Vec3::new(1.5, 0.5, 1.0),
        rotation: Vec3::new(-0.1, -0.4, 0.0),
        scale: 0.75,
    },
    SectionDescriptor {
        id: "publications",
        position: Vec3::new(0.0, -0.2, 2.0),
        rotation: Vec3::ZERO,
        scale: 0.8,
    },
];

/// Look up a section's pose by anchor id.
pub fn section_pose(id: &str) -> Option<Pose> {
    SECTIONS.iter().find(|s| s.id == id).map(SectionDescriptor::pose)
}
