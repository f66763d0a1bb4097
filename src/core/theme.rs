use super::constants::K_COLOR;
use super::interp::blend;
use fnv::FnvHashMap;
use glam::Vec3;
use std::sync::OnceLock;

/// sRGB transfer function inverse, for one channel in [0, 1].
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGB in [0, 1]. The shaders light in linear space and the
/// swapchain encodes back to sRGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub Vec3);

impl Rgb {
    /// Parse an sRGB `#rrggbb` string into linear RGB. Returns `None` for
    /// anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(digits.get(i..i + 2)?, 16)
                .ok()
                .map(|v| srgb_to_linear(v as f32 / 255.0))
        };
        Some(Self(Vec3::new(channel(0)?, channel(2)?, channel(4)?)))
    }

    pub fn lerp(self, target: Self, k: f32) -> Self {
        Self(self.0.lerp(target.0, k))
    }
}

/// Colors and material tuning for one section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub main: Rgb,
    pub accent: Rgb,
    pub glow: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    pub inner_opacity: f32,
    pub glow_intensity: f32,
    /// Body yaw added per frame.
    pub spin: f32,
}

struct ThemeRow {
    id: &'static str,
    main: &'static str,
    accent: &'static str,
    glow: &'static str,
}

const THEME_ROWS: [ThemeRow; 6] = [
    ThemeRow { id: "hero", main: "#a855f7", accent: "#ec4899", glow: "#a855f7" },
    ThemeRow { id: "about", main: "#3b82f6", accent: "#60a5fa", glow: "#3b82f6" },
    ThemeRow { id: "skills", main: "#10b981", accent: "#34d399", glow: "#10b981" },
    ThemeRow { id: "highlights", main: "#f59e0b", accent: "#fbbf24", glow: "#f59e0b" },
    ThemeRow { id: "projects", main: "#ef4444", accent: "#f87171", glow: "#ef4444" },
    ThemeRow { id: "publications", main: "#8b5cf6", accent: "#a78bfa", glow: "#8b5cf6" },
];

const DEFAULT_THEME_ID: &str = "hero";

fn build_theme(row: &ThemeRow) -> Option<Theme> {
    Some(Theme {
        main: Rgb::from_hex(row.main)?,
        accent: Rgb::from_hex(row.accent)?,
        glow: Rgb::from_hex(row.glow)?,
        metalness: if row.id == "projects" { 0.8 } else { 0.6 },
        roughness: if row.id == "highlights" { 0.1 } else { 0.2 },
        inner_opacity: if row.id == "highlights" { 0.15 } else { 0.1 },
        glow_intensity: match row.id {
            "projects" => 4.0,
            "highlights" => 3.5,
            _ => 3.0,
        },
        spin: match row.id {
            "skills" => 0.004,
            "projects" => 0.001,
            _ => 0.002,
        },
    })
}

fn theme_table() -> &'static FnvHashMap<&'static str, Theme> {
    static TABLE: OnceLock<FnvHashMap<&'static str, Theme>> = OnceLock::new();
    TABLE.get_or_init(|| {
        THEME_ROWS
            .iter()
            .filter_map(|row| build_theme(row).map(|t| (row.id, t)))
            .collect()
    })
}

impl Theme {
    /// Palette for a section id; unknown ids (and the footer) use the hero
    /// palette.
    pub fn for_section(id: Option<&str>) -> Theme {
        let table = theme_table();
        id.and_then(|id| table.get(id))
            .or_else(|| table.get(DEFAULT_THEME_ID))
            .copied()
            .unwrap_or(Theme::FALLBACK)
    }

    const FALLBACK: Theme = Theme {
        main: Rgb(Vec3::new(0.393, 0.090, 0.930)),
        accent: Rgb(Vec3::new(0.838, 0.063, 0.319)),
        glow: Rgb(Vec3::new(0.393, 0.090, 0.930)),
        metalness: 0.6,
        roughness: 0.2,
        inner_opacity: 0.1,
        glow_intensity: 3.0,
        spin: 0.002,
    };

    /// Move every field a fraction `k` toward `target`.
    pub fn blend_toward(&self, target: &Theme, k: f32) -> Theme {
        Theme {
            main: self.main.lerp(target.main, k),
            accent: self.accent.lerp(target.accent, k),
            glow: self.glow.lerp(target.glow, k),
            metalness: blend(self.metalness, target.metalness, k),
            roughness: blend(self.roughness, target.roughness, k),
            inner_opacity: blend(self.inner_opacity, target.inner_opacity, k),
            glow_intensity: blend(self.glow_intensity, target.glow_intensity, k),
            // Spin speed switches immediately; it only changes a rate.
            spin: target.spin,
        }
    }
}

/// Smoothly follows the palette of the current section.
#[derive(Clone, Debug)]
pub struct ThemeBlender {
    current: Theme,
}

impl ThemeBlender {
    pub fn new(section: Option<&str>) -> Self {
        Self {
            current: Theme::for_section(section),
        }
    }

    pub fn step(&mut self, section: Option<&str>) -> &Theme {
        let target = Theme::for_section(section);
        self.current = self.current.blend_toward(&target, K_COLOR);
        &self.current
    }

    pub fn current(&self) -> &Theme {
        &self.current
    }
}
