//! Appearance animation of width-based series.
//!
//! A [`ColumnAnimation`] grows every drawn column from its baseline to its
//! value. It is driven by an external clock through [`ColumnAnimation::cycle`]
//! and writes geometry straight into the series' shapes.

use ordinate_core::math::{is_resolved, lerp};

use super::data::{PointMeta, PositionProvider};
use super::drawers::column::column_rect;
use super::settings::AnimationSettings;
use super::shapes::ShapesManager;

/// Easing curves for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    #[default]
    EaseInOut,
    /// Quadratic ease in
    QuadIn,
    /// Quadratic ease out
    QuadOut,
    /// Quadratic ease in-out
    QuadInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in-out
    CubicInOut,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn | EasingFunction::QuadIn => t * t,
            EasingFunction::EaseOut | EasingFunction::QuadOut => t * (2.0 - t),
            EasingFunction::EaseInOut | EasingFunction::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
        }
    }
}

/// Lifecycle of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// What an animation frame writes into.
#[derive(Debug)]
pub struct AnimationTarget<'a> {
    pub shapes: &'a mut ShapesManager,
    pub meta: &'a mut [PointMeta],
    pub point_width: f32,
    pub vertical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnFrame {
    x: f32,
    base: f32,
    top: f32,
}

/// Grows columns from their baseline to their final value.
#[derive(Debug, Clone)]
pub struct ColumnAnimation {
    phase: AnimationPhase,
    duration: f32,
    easing: EasingFunction,
    range: bool,
    started_at: Option<f64>,
    progress: f32,
    frames: Vec<Option<ColumnFrame>>,
}

impl ColumnAnimation {
    /// `range` animates from `low` to `high` instead of from `zero` to
    /// `value`.
    pub fn new(settings: AnimationSettings, range: bool) -> Self {
        Self {
            phase: AnimationPhase::Idle,
            duration: settings.duration,
            easing: settings.easing,
            range,
            started_at: None,
            progress: 0.0,
            frames: Vec::new(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == AnimationPhase::Running
    }

    /// Eased progress of the last frame.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Capture the final geometry of every drawn point, rewind the shapes
    /// to their baseline and start. Returns false if there was nothing to
    /// animate.
    pub fn begin(&mut self, target: &mut AnimationTarget<'_>) -> bool {
        self.frames = target
            .meta
            .iter()
            .map(|m| {
                let (base, top) = if self.range { (m.low, m.high) } else { (m.zero, m.value) };
                let drawn = !m.missing && m.shapes.is_some();
                (drawn && is_resolved(m.x) && is_resolved(base) && is_resolved(top))
                    .then_some(ColumnFrame { x: m.x, base, top })
            })
            .collect();
        self.started_at = None;
        if self.frames.iter().any(Option::is_some) {
            self.phase = AnimationPhase::Running;
            self.on_animate(0.0, target);
            tracing::debug!(duration = self.duration, points = self.frames.len(), "column animation started");
            true
        } else {
            self.phase = AnimationPhase::Finished;
            false
        }
    }

    /// Advance to `now` seconds. Returns true while the animation runs.
    pub fn cycle(&mut self, now: f64, target: &mut AnimationTarget<'_>) -> bool {
        if self.phase != AnimationPhase::Running {
            return false;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let t = if self.duration > 0.0 {
            ((now - started_at) / f64::from(self.duration)) as f32
        } else {
            1.0
        };
        if t >= 1.0 {
            self.on_end(target);
            return false;
        }
        self.on_animate(self.easing.apply(t), target);
        true
    }

    /// Jump to the final frame.
    pub fn stop(&mut self, target: &mut AnimationTarget<'_>) {
        if self.phase == AnimationPhase::Running {
            self.on_end(target);
        }
    }

    fn on_animate(&mut self, progress: f32, target: &mut AnimationTarget<'_>) {
        self.progress = progress;
        for (frame, meta) in self.frames.iter().zip(target.meta.iter_mut()) {
            let (Some(frame), Some(group)) = (frame, meta.shapes.as_ref()) else {
                continue;
            };
            let current = lerp(frame.base, frame.top, progress);
            for id in group.ids() {
                if let Some(shape) = target.shapes.shape_mut(id) {
                    shape.path.clear();
                    column_rect(&mut shape.path, frame.x, frame.base, current, target.point_width, target.vertical);
                }
            }
            meta.position = Some(if target.vertical {
                PositionProvider { x: current, y: frame.x }
            } else {
                PositionProvider { x: frame.x, y: current }
            });
        }
    }

    fn on_end(&mut self, target: &mut AnimationTarget<'_>) {
        self.on_animate(1.0, target);
        self.phase = AnimationPhase::Finished;
        tracing::debug!("column animation finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::shapes::{ShapeConfig, ShapeType};
    use crate::chart::state::PointState;
    use crate::style::Color;

    fn setup() -> (ShapesManager, Vec<PointMeta>) {
        let mut shapes = ShapesManager::new(vec![ShapeConfig::fill("fill", ShapeType::Path, Color::RED)]);
        let mut meta = PointMeta::new(0);
        meta.x = 5.0;
        meta.zero = 100.0;
        meta.value = 40.0;
        meta.shapes = Some(shapes.add_shapes_group(PointState::Normal, None));
        (shapes, vec![meta])
    }

    fn top(shapes: &ShapesManager, meta: &[PointMeta]) -> f32 {
        let group = meta[0].shapes.as_ref().unwrap();
        let (min, _) = shapes.path(group, "fill").unwrap().bounds().unwrap();
        min.y
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
            EasingFunction::QuadIn,
            EasingFunction::QuadOut,
            EasingFunction::QuadInOut,
            EasingFunction::CubicIn,
            EasingFunction::CubicOut,
            EasingFunction::CubicInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert_eq!(EasingFunction::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_column_grows_from_baseline() {
        let (mut shapes, mut meta) = setup();
        let settings = AnimationSettings {
            enabled: true,
            duration: 1.0,
            easing: EasingFunction::Linear,
        };
        let mut animation = ColumnAnimation::new(settings, false);
        let mut target = AnimationTarget {
            shapes: &mut shapes,
            meta: &mut meta,
            point_width: 10.0,
            vertical: false,
        };
        assert!(animation.begin(&mut target));
        assert_eq!(target.meta[0].position, Some(PositionProvider { x: 5.0, y: 100.0 }));
        assert!(animation.cycle(10.0, &mut target));
        assert!(animation.cycle(10.5, &mut target));
        assert_eq!(animation.progress(), 0.5);
        assert!(!animation.cycle(11.0, &mut target));
        assert_eq!(animation.phase(), AnimationPhase::Finished);

        assert_eq!(top(&shapes, &meta), 40.0);
        assert_eq!(meta[0].position, Some(PositionProvider { x: 5.0, y: 40.0 }));
    }

    #[test]
    fn test_stop_snaps_to_end() {
        let (mut shapes, mut meta) = setup();
        let mut animation = ColumnAnimation::new(AnimationSettings::enabled(10.0), false);
        let mut target = AnimationTarget {
            shapes: &mut shapes,
            meta: &mut meta,
            point_width: 10.0,
            vertical: false,
        };
        assert!(animation.begin(&mut target));
        animation.cycle(0.0, &mut target);
        animation.stop(&mut target);
        assert!(!animation.is_running());
        assert_eq!(top(&shapes, &meta), 40.0);
    }

    #[test]
    fn test_nothing_to_animate() {
        let mut shapes = ShapesManager::new(Vec::new());
        let mut meta = vec![PointMeta::new(0)];
        let mut target = AnimationTarget {
            shapes: &mut shapes,
            meta: &mut meta,
            point_width: 10.0,
            vertical: false,
        };
        let mut animation = ColumnAnimation::new(AnimationSettings::enabled(1.0), false);
        assert!(!animation.begin(&mut target));
        assert_eq!(animation.phase(), AnimationPhase::Finished);
    }
}
