// Simple color struct, created from an unsigned 32 representing RRGGBBAA

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    // Rose pink at 70% opacity, the default particle hue
    pub const ROSE_PINK: Color = Color {
        r: 255,
        g: 79,
        b: 145,
        a: 179,
    };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    // Same hue with the alpha channel replaced, used for faded links
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            round_alpha(alpha.max(0.0).min(1.0))
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::ROSE_PINK
    }
}

// Formats as a CSS color string usable for fillStyle/strokeStyle
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_with_alpha(self.alpha()))
    }
}

fn round_alpha(alpha: f64) -> f64 {
    (alpha * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0xff4f91b3);
        assert_eq!(c, Color::ROSE_PINK);
        assert_eq!(c.to_u32(), 0xff4f91b3);
    }

    #[test]
    fn formats_css_rgba() {
        assert_eq!(Color::ROSE_PINK.to_string(), "rgba(255, 79, 145, 0.702)");
        assert_eq!(
            Color::ROSE_PINK.css_with_alpha(0.5),
            "rgba(255, 79, 145, 0.5)"
        );
        assert_eq!(Color::ROSE_PINK.css_with_alpha(1.7), "rgba(255, 79, 145, 1)");
    }
}
