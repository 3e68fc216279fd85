//! Series settings.
//!
//! Every setter reports the consistency bits the change invalidates, empty
//! when the value did not change. The owning series forwards those bits to
//! its tracker.

use ordinate_core::consistency::ConsistencyState;
use ordinate_core::{ConfigError, ConfigResult, ValidationPolicy};

use super::animation::EasingFunction;
use crate::style::{Color, HatchPattern};

/// Width of width-based points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointWidth {
    /// Fraction of the category band.
    Ratio(f32),
    /// Fixed width in pixels.
    Pixels(f32),
}

impl Default for PointWidth {
    fn default() -> Self {
        PointWidth::Ratio(0.8)
    }
}

impl PointWidth {
    /// Width in pixels for a category band of `band` pixels.
    pub fn resolve(self, band: f32) -> f32 {
        match self {
            PointWidth::Ratio(ratio) => ratio * band,
            PointWidth::Pixels(pixels) => pixels,
        }
    }

    fn validate(self) -> ConfigResult<Self> {
        let raw = match self {
            PointWidth::Ratio(v) | PointWidth::Pixels(v) => v,
        };
        if raw.is_finite() && raw >= 0.0 {
            Ok(self)
        } else {
            Err(ConfigError::InvalidPointWidth(raw))
        }
    }
}

/// Where a step changes level between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepDirection {
    /// Halfway between the points.
    #[default]
    Center,
    /// At the next point.
    Forward,
    /// At the previous point.
    Backward,
}

impl StepDirection {
    /// X where the level changes between `prev_x` and `x`.
    pub fn cross_x(self, prev_x: f32, x: f32) -> f32 {
        match self {
            StepDirection::Center => (prev_x + x) / 2.0,
            StepDirection::Forward => x,
            StepDirection::Backward => prev_x,
        }
    }
}

/// Appearance animation of width-based series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub enabled: bool,
    /// Seconds.
    pub duration: f32,
    pub easing: EasingFunction,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: 1.0,
            easing: EasingFunction::EaseInOut,
        }
    }
}

impl AnimationSettings {
    pub fn enabled(duration: f32) -> Self {
        Self {
            enabled: true,
            duration,
            ..Self::default()
        }
    }

    fn validate(self) -> ConfigResult<Self> {
        if self.duration.is_finite() && self.duration >= 0.0 {
            Ok(self)
        } else {
            Err(ConfigError::InvalidDuration(self.duration))
        }
    }
}

/// Bubble radius range in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleSizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for BubbleSizeRange {
    fn default() -> Self {
        Self { min: 5.0, max: 20.0 }
    }
}

impl BubbleSizeRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Radius for a size whose magnitude is `ratio` of the largest size.
    pub fn radius(&self, ratio: f32) -> f32 {
        self.min + ratio.clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn validate(self) -> ConfigResult<Self> {
        let valid = self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max;
        if valid {
            Ok(self)
        } else {
            Err(ConfigError::InvalidSizeRange {
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Settings of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSettings {
    validation: ValidationPolicy,
    connect_missing: bool,
    point_width: PointWidth,
    step_direction: StepDirection,
    stacked: bool,
    animation: AnimationSettings,
    bubble_size: BubbleSizeRange,
    marker_size: f32,
    closed: bool,
    z_index: f32,
    enabled: bool,
    color: Color,
    stroke_width: f32,
    hatch: Option<HatchPattern>,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            connect_missing: false,
            point_width: PointWidth::default(),
            step_direction: StepDirection::default(),
            stacked: false,
            animation: AnimationSettings::default(),
            bubble_size: BubbleSizeRange::default(),
            marker_size: 4.0,
            closed: false,
            z_index: 30.0,
            enabled: true,
            color: Color::from_hex(0x64b5f6),
            stroke_width: 1.5,
            hatch: None,
        }
    }
}

fn changed<T: PartialEq>(slot: &mut T, value: T, state: ConsistencyState) -> ConsistencyState {
    if *slot == value {
        ConsistencyState::empty()
    } else {
        *slot = value;
        state
    }
}

impl SeriesSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Changes only how later values are validated.
    pub fn set_validation(&mut self, validation: ValidationPolicy) -> ConsistencyState {
        self.validation = validation;
        ConsistencyState::empty()
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    pub fn connect_missing(&self) -> bool {
        self.connect_missing
    }

    pub fn set_connect_missing(&mut self, value: bool) -> ConsistencyState {
        changed(&mut self.connect_missing, value, ConsistencyState::SERIES_POINTS)
    }

    pub fn point_width(&self) -> PointWidth {
        self.point_width
    }

    pub fn set_point_width(&mut self, value: PointWidth) -> ConfigResult<ConsistencyState> {
        let value = self.validation.resolve(value.validate(), PointWidth::default())?;
        Ok(changed(&mut self.point_width, value, ConsistencyState::SERIES_POINTS))
    }

    pub fn step_direction(&self) -> StepDirection {
        self.step_direction
    }

    pub fn set_step_direction(&mut self, value: StepDirection) -> ConsistencyState {
        changed(&mut self.step_direction, value, ConsistencyState::SERIES_POINTS)
    }

    pub fn stacked(&self) -> bool {
        self.stacked
    }

    pub fn set_stacked(&mut self, value: bool) -> ConsistencyState {
        changed(
            &mut self.stacked,
            value,
            ConsistencyState::SERIES_STACK | ConsistencyState::SERIES_POINTS,
        )
    }

    pub fn animation(&self) -> AnimationSettings {
        self.animation
    }

    /// Takes effect on the next full draw; nothing is invalidated.
    pub fn set_animation(&mut self, value: AnimationSettings) -> ConfigResult<ConsistencyState> {
        self.animation = self.validation.resolve(value.validate(), AnimationSettings::default())?;
        Ok(ConsistencyState::empty())
    }

    pub fn bubble_size(&self) -> BubbleSizeRange {
        self.bubble_size
    }

    pub fn set_bubble_size(&mut self, value: BubbleSizeRange) -> ConfigResult<ConsistencyState> {
        let value = self.validation.resolve(value.validate(), BubbleSizeRange::default())?;
        Ok(changed(&mut self.bubble_size, value, ConsistencyState::SERIES_POINTS))
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn set_marker_size(&mut self, value: f32) -> ConsistencyState {
        changed(&mut self.marker_size, value.max(0.0), ConsistencyState::SERIES_POINTS)
    }

    /// Whether line-based drawers join the last point back to the first.
    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, value: bool) -> ConsistencyState {
        changed(&mut self.closed, value, ConsistencyState::SERIES_POINTS)
    }

    pub fn z_index(&self) -> f32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, value: f32) -> ConsistencyState {
        changed(&mut self.z_index, value, ConsistencyState::Z_INDEX)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, value: bool) -> ConsistencyState {
        changed(&mut self.enabled, value, ConsistencyState::ENABLED)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, value: Color) -> ConsistencyState {
        changed(&mut self.color, value, ConsistencyState::SERIES_COLOR)
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, value: f32) -> ConsistencyState {
        changed(&mut self.stroke_width, value.max(0.0), ConsistencyState::SERIES_COLOR)
    }

    pub fn hatch(&self) -> Option<HatchPattern> {
        self.hatch
    }

    pub fn set_hatch(&mut self, value: Option<HatchPattern>) -> ConsistencyState {
        changed(&mut self.hatch, value, ConsistencyState::HATCH_FILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_report_states() {
        let mut settings = SeriesSettings::new();
        assert_eq!(settings.set_connect_missing(true), ConsistencyState::SERIES_POINTS);
        assert!(settings.set_connect_missing(true).is_empty());
        assert!(settings.set_stacked(true).contains(ConsistencyState::SERIES_STACK));
        assert_eq!(settings.set_z_index(5.0), ConsistencyState::Z_INDEX);
        assert_eq!(settings.set_color(Color::RED), ConsistencyState::SERIES_COLOR);
        assert_eq!(settings.set_hatch(Some(HatchPattern::Cross)), ConsistencyState::HATCH_FILL);
        assert_eq!(settings.set_enabled(false), ConsistencyState::ENABLED);
        assert!(settings.set_animation(AnimationSettings::enabled(0.5)).unwrap().is_empty());
    }

    #[test]
    fn test_lenient_point_width_falls_back() {
        let mut settings = SeriesSettings::new();
        settings.set_point_width(PointWidth::Pixels(12.0)).unwrap();
        settings.set_point_width(PointWidth::Pixels(f32::NAN)).unwrap();
        assert_eq!(settings.point_width(), PointWidth::default());
    }

    #[test]
    fn test_strict_rejects() {
        let mut settings = SeriesSettings::new().with_validation(ValidationPolicy::Strict);
        assert_eq!(
            settings.set_point_width(PointWidth::Ratio(-1.0)),
            Err(ConfigError::InvalidPointWidth(-1.0))
        );
        assert!(settings.set_bubble_size(BubbleSizeRange::new(10.0, 2.0)).is_err());
        let mut animation = AnimationSettings::enabled(1.0);
        animation.duration = f32::INFINITY;
        assert!(settings.set_animation(animation).is_err());
        assert_eq!(settings.animation(), AnimationSettings::default());
    }

    #[test]
    fn test_cross_x() {
        assert_eq!(StepDirection::Center.cross_x(0.0, 4.0), 2.0);
        assert_eq!(StepDirection::Forward.cross_x(0.0, 4.0), 4.0);
        assert_eq!(StepDirection::Backward.cross_x(0.0, 4.0), 0.0);
    }

    #[test]
    fn test_bubble_radius() {
        let range = BubbleSizeRange::new(2.0, 10.0);
        assert_eq!(range.radius(0.0), 2.0);
        assert_eq!(range.radius(0.5), 6.0);
        assert_eq!(range.radius(3.0), 10.0);
    }
}
