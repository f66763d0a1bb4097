/// Fraction of an element's height inside the viewport, in [0, 1].
/// `top` is relative to the viewport top (as from `getBoundingClientRect`).
pub fn visible_fraction(top: f32, height: f32, viewport_height: f32) -> f32 {
    if !(height > 0.0) || !(viewport_height > 0.0) {
        return 0.0;
    }
    let bottom = top + height;
    let overlap = bottom.min(viewport_height) - top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// Elements reveal once this much of them is on screen.
pub const REVEAL_THRESHOLD: f32 = 0.2;

pub fn should_reveal(top: f32, height: f32, viewport_height: f32) -> bool {
    visible_fraction(top, height, viewport_height) >= REVEAL_THRESHOLD
}

/// Hero content offset and opacity for a scroll progress through the hero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    /// Downward translation, percent of the content height.
    pub translate_pct: f32,
    pub opacity: f32,
}

/// `progress` is 0 with the hero top at the viewport top and 1 once the
/// hero has scrolled fully out.
pub fn hero_parallax(progress: f32) -> Parallax {
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let opacity = if p <= 0.5 {
        1.0 - 0.2 * (p / 0.5)
    } else {
        0.8 * (1.0 - (p - 0.5) / 0.5)
    };
    Parallax {
        translate_pct: 30.0 * p,
        opacity,
    }
}
