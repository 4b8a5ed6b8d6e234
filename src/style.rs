//! Colors, strokes and marker symbols used by scene primitives.

use std::fmt;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component; 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Create a new color with explicit RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Whether the color is fully transparent.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
}

/// Formats as `#rrggbb`, ignoring alpha.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named colors of the diagram.
pub mod palette {
    use super::Color;

    /// Unanalysed member.
    pub const DRAFT: Color = Color::hex(0x3b82f6);
    /// Member with safety factor below 1.
    pub const UNSAFE: Color = Color::hex(0xef4444);
    /// Member with safety factor in `[1, 2)`.
    pub const CAUTION: Color = Color::hex(0xf59e0b);
    /// Member with safety factor of at least 2.
    pub const SAFE: Color = Color::hex(0x10b981);

    /// Tension arrows.
    pub const TENSION: Color = Color::hex(0x22d3ee);
    /// Compression arrows.
    pub const COMPRESSION: Color = Color::hex(0xfb923c);
    /// Applied load arrows.
    pub const LOAD: Color = Color::hex(0xf43f5e);
    /// Support reaction arrows.
    pub const REACTION: Color = Color::hex(0x8b5cf6);

    /// High-contrast outline behind arrows; visible on light backgrounds.
    pub const OUTLINE: Color = Color::hex(0x0f172a);
    /// Glow between outline and arrow color; visible on dark backgrounds.
    pub const GLOW: Color = Color::WHITE;

    /// Joint markers and joint badges.
    pub const JOINT: Color = Color::hex(0x1e3d59);
    /// Support glyphs.
    pub const SUPPORT: Color = Color::BLACK;

    /// Axis ticks and titles; readable on light and dark hosts.
    pub const AXIS: Color = Color::hex(0x64748b);
    /// Grid and zero lines.
    pub const GRID: Color = Color::hex(0xcbd5e1);
}

/// Outline or line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Width in pixels.
    pub width: f64,
}

impl Stroke {
    /// Create a stroke.
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Shape of a point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSymbol {
    /// Filled circle.
    Circle,
    /// Upward triangle with a centre dot.
    TriangleUpDot,
    /// Square with a centre dot.
    SquareDot,
}
