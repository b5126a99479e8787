/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::from_premul(0.0, 1.0, 0.0, 1.0);

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_bytes_are_premultiplied() {
        let c = Color::from_srgb_u8(255, 0, 255, 51);
        assert!((c.a - 0.2).abs() < 1e-6);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn constants_are_opaque() {
        assert!(Color::BLACK.is_opaque());
        assert!(Color::GREEN.is_opaque());
        assert_eq!(Color::GREEN.to_array(), [0.0, 1.0, 0.0, 1.0]);
    }
}
