/// Straight RGB color with components in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// `#00008B`, normalized.
    pub const DARK_BLUE: Self = Self::new(0.0, 0.0, 139.0 / 255.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

/// Color assigner giving every vertex the same color.
pub fn constant(color: Rgb) -> impl Fn(usize) -> Rgb {
    move |_| color
}

/// Color assigner blending linearly from `from` (index 0) to `to` (index `n - 1`).
///
/// Indices past `n - 1` stay at `to`.
pub fn gradient(from: Rgb, to: Rgb, n: usize) -> impl Fn(usize) -> Rgb {
    let last = n.saturating_sub(1);
    move |i| {
        if last == 0 {
            return from;
        }
        let t = i.min(last) as f32 / last as f32;
        from.lerp(to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_blue_is_normalized() {
        assert_eq!(Rgb::DARK_BLUE, Rgb::from_rgb8(0, 0, 139));
        assert!(Rgb::DARK_BLUE.b <= 1.0);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#ffff00"), Some(Rgb::YELLOW));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::GREEN));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("zz0000"), None);
    }

    #[test]
    fn gradient_hits_both_ends() {
        let g = gradient(Rgb::BLACK, Rgb::new(1.0, 0.5, 0.0), 5);
        assert_eq!(g(0), Rgb::BLACK);
        assert_eq!(g(4), Rgb::new(1.0, 0.5, 0.0));
        assert_eq!(g(2), Rgb::new(0.5, 0.25, 0.0));
        assert_eq!(g(99), g(4));
    }

    #[test]
    fn single_vertex_gradient_is_start_color() {
        let g = gradient(Rgb::RED, Rgb::BLUE, 1);
        assert_eq!(g(0), Rgb::RED);
        let g = gradient(Rgb::RED, Rgb::BLUE, 0);
        assert_eq!(g(3), Rgb::RED);
    }
}
