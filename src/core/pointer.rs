use glam::Vec2;

/// Pointer position normalized to [-1, 1] on both axes, +y up.
///
/// `None` until the first pointer event arrives; consumers treat that as
/// the centered, neutral pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub normalized: Option<Vec2>,
}

impl PointerState {
    pub const fn neutral() -> Self {
        Self { normalized: None }
    }

    /// Normalize client coordinates against the viewport size.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::neutral();
        }
        let x = (client_x / width) * 2.0 - 1.0;
        let y = -(client_y / height) * 2.0 + 1.0;
        let v = Vec2::new(x, y);
        if !v.is_finite() {
            return Self::neutral();
        }
        Self {
            normalized: Some(v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))),
        }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.normalized.unwrap_or(Vec2::ZERO)
    }

    /// Offset toward the pointer scaled by `gain` and clamped to a disc of
    /// radius `max_len`.
    pub fn look_offset(&self, gain: f32, max_len: f32) -> Vec2 {
        (self.xy() * gain).clamp_length_max(max_len)
    }
}
