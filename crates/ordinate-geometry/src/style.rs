//! Colors, paints and strokes applied to chart shapes.

use crate::chart::PointState;

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from `0xRRGGBB`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    /// Move each channel towards black by `amount` (0..1).
    pub fn darken(self, amount: f32) -> Self {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self::rgba(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Move each channel towards white by `amount` (0..1).
    pub fn lighten(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (1.0 - self.r) * t,
            self.g + (1.0 - self.g) * t,
            self.b + (1.0 - self.b) * t,
            self.a,
        )
    }

    /// Format as `#rrggbb`.
    pub fn to_hex_string(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Hatch patterns for pattern fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatchPattern {
    BackwardDiagonal,
    ForwardDiagonal,
    Horizontal,
    Vertical,
    Cross,
}

/// How a shape interior is painted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Paint {
    /// Nothing is painted.
    #[default]
    None,
    /// Solid color.
    Solid(Color),
    /// Hatch pattern drawn in a color.
    Hatch { pattern: HatchPattern, color: Color },
}

impl Paint {
    /// Check if this paint is visible.
    pub fn is_visible(&self) -> bool {
        match self {
            Paint::None => false,
            Paint::Solid(color) | Paint::Hatch { color, .. } => color.a > 0.0,
        }
    }

    /// Get the color of the paint, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::None => None,
            Paint::Solid(color) | Paint::Hatch { color, .. } => Some(*color),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

/// Outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Check if this stroke draws anything.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.a > 0.0
    }
}

/// One value per point state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateStyle<T> {
    pub normal: T,
    pub hover: T,
    pub select: T,
}

impl<T: Copy> StateStyle<T> {
    /// The same value in every state.
    pub fn uniform(value: T) -> Self {
        Self {
            normal: value,
            hover: value,
            select: value,
        }
    }

    pub fn for_state(&self, state: PointState) -> T {
        match state {
            PointState::Normal => self.normal,
            PointState::Hover => self.hover,
            PointState::Select => self.select,
        }
    }
}

impl StateStyle<Paint> {
    /// Fill derived from a base color: lighter on hover, darker on select.
    pub fn fill_from(color: Color) -> Self {
        Self {
            normal: Paint::Solid(color),
            hover: Paint::Solid(color.lighten(0.3)),
            select: Paint::Solid(color.darken(0.2)),
        }
    }
}

impl StateStyle<Option<Stroke>> {
    /// Stroke derived from a base color.
    pub fn stroke_from(color: Color, width: f32) -> Self {
        Self {
            normal: Some(Stroke::new(color.darken(0.3), width)),
            hover: Some(Stroke::new(color.darken(0.3), width + 1.0)),
            select: Some(Stroke::new(color.darken(0.5), width + 1.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Color::from_hex(0x64b5f6);
        assert_eq!(color.to_hex_string(), "#64b5f6");
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_darken_lighten() {
        assert_eq!(Color::WHITE.darken(1.0), Color::BLACK);
        assert_eq!(Color::BLACK.lighten(1.0), Color::WHITE);
        assert_eq!(Color::RED.darken(0.0), Color::RED);
    }

    #[test]
    fn test_paint_visibility() {
        assert!(!Paint::None.is_visible());
        assert!(Paint::Solid(Color::RED).is_visible());
        assert!(!Paint::Solid(Color::TRANSPARENT).is_visible());
    }

    #[test]
    fn test_state_style() {
        let fill = StateStyle::fill_from(Color::BLUE);
        assert_eq!(fill.for_state(PointState::Normal), Paint::Solid(Color::BLUE));
        assert_ne!(fill.for_state(PointState::Hover), fill.for_state(PointState::Normal));
        let uniform = StateStyle::uniform(3);
        assert_eq!(uniform.for_state(PointState::Select), 3);
    }
}
