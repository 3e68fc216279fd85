//! Smooth curves through the values.
//!
//! [`SplineQueue`] keeps a sliding window of the last three points and turns
//! it into cubic Bezier segments with Catmull-Rom tangents. Control points
//! never overshoot their segment along the category axis, so the curve stays
//! a function of x.

use glam::Vec2;
use ordinate_core::math::is_resolved;
use ordinate_core::queue::CycledQueue;

use super::{DrawContext, Drawer, STROKE};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

/// A cubic segment ending at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSegment {
    pub control1: Vec2,
    pub control2: Vec2,
    pub to: Vec2,
}

/// Incremental spline builder.
#[derive(Debug, Clone)]
pub struct SplineQueue {
    points: CycledQueue<Vec2>,
    tangent: Option<Vec2>,
    rtl: bool,
}

impl Default for SplineQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SplineQueue {
    pub fn new() -> Self {
        Self {
            points: CycledQueue::with_limit(3),
            tangent: None,
            rtl: false,
        }
    }

    /// Start a new curve. `rtl` is set when x decreases along the series.
    pub fn reset_drawer(&mut self, rtl: bool) {
        self.points.clear(None);
        self.tangent = None;
        self.rtl = rtl;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point. Returns the segment ending at the previous point once
    /// its outgoing tangent is known.
    pub fn process_point(&mut self, point: Vec2) -> Option<SplineSegment> {
        self.points.enqueue(point);
        let (Some(a), Some(b), Some(c)) = (self.points.get(-3), self.points.get(-2), self.points.get(-1)) else {
            return None;
        };
        let (a, b, c) = (*a, *b, *c);
        let start_tangent = self.tangent.unwrap_or(b - a);
        let end_tangent = (c - a) * 0.5;
        self.tangent = Some(end_tangent);
        Some(self.segment(a, b, start_tangent, end_tangent))
    }

    /// Emit the last pending segment and reset.
    pub fn finalize_processing(&mut self) -> Option<SplineSegment> {
        let segment = match (self.points.get(-2), self.points.get(-1)) {
            (Some(a), Some(b)) => {
                let (a, b) = (*a, *b);
                let start_tangent = self.tangent.unwrap_or(b - a);
                Some(self.segment(a, b, start_tangent, b - a))
            }
            _ => None,
        };
        self.points.clear(None);
        self.tangent = None;
        segment
    }

    fn segment(&self, a: Vec2, b: Vec2, start_tangent: Vec2, end_tangent: Vec2) -> SplineSegment {
        let mut control1 = a + start_tangent / 3.0;
        let mut control2 = b - end_tangent / 3.0;
        let forward = if self.rtl { b.x <= a.x } else { a.x <= b.x };
        if forward {
            let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
            control1.x = control1.x.clamp(lo, hi);
            control2.x = control2.x.clamp(lo, hi);
        }
        SplineSegment {
            control1,
            control2,
            to: b,
        }
    }
}

/// Catmull-Rom spline through the values.
#[derive(Debug, Clone, Default)]
pub struct SplineDrawer {
    group: Option<ShapesGroup>,
    queue: SplineQueue,
}

impl SplineDrawer {
    fn emit(&self, ctx: &mut DrawContext<'_>, segment: SplineSegment) {
        let Some(group) = &self.group else {
            return;
        };
        let control1 = ctx.point(segment.control1.x, segment.control1.y);
        let control2 = ctx.point(segment.control2.x, segment.control2.y);
        let to = ctx.point(segment.to.x, segment.to.y);
        ctx.shapes.for_each_path(group, &[STROKE], |path| {
            path.curve_to(control1, control2, to);
        });
    }
}

impl Drawer for SplineDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::SUPPORTS_CONNECTING_MISSING
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::IS_LINE_BASED);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        vec![ShapeConfig::stroke(
            STROKE,
            ShapeType::Path,
            settings.color(),
            settings.stroke_width(),
        )]
    }

    fn start_drawing(&mut self, _ctx: &mut DrawContext<'_>) {
        self.group = None;
    }

    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value)) {
            return false;
        }
        let group = ctx.series_group();
        ctx.move_to(&group, &[STROKE], point.x, point.value);
        self.group = Some(group);
        self.queue.reset_drawer(ctx.settings.rtl);
        self.queue.process_point(Vec2::new(point.x, point.value));
        true
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if self.group.is_none() || !(is_resolved(point.x) && is_resolved(point.value)) {
            return false;
        }
        if let Some(segment) = self.queue.process_point(Vec2::new(point.x, point.value)) {
            self.emit(ctx, segment);
        }
        true
    }

    fn finalize_segment(&mut self, ctx: &mut DrawContext<'_>) {
        if let Some(segment) = self.queue.finalize_processing() {
            self.emit(ctx, segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::DrawSettings;
    use super::*;
    use crate::path::PathCommand;

    #[test]
    fn test_segments_are_emitted_one_point_late() {
        let mut queue = SplineQueue::new();
        queue.reset_drawer(false);
        assert_eq!(queue.process_point(Vec2::new(0.0, 0.0)), None);
        assert_eq!(queue.process_point(Vec2::new(10.0, 10.0)), None);
        let first = queue.process_point(Vec2::new(20.0, 0.0)).unwrap();
        assert_eq!(first.to, Vec2::new(10.0, 10.0));
        // The tangent at the middle point is horizontal.
        assert_eq!(first.control2.y, 10.0);

        let last = queue.finalize_processing().unwrap();
        assert_eq!(last.to, Vec2::new(20.0, 0.0));
        assert_eq!(last.control1.y, 10.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_controls_clamped_to_segment() {
        let mut queue = SplineQueue::new();
        queue.reset_drawer(false);
        queue.process_point(Vec2::new(0.0, 0.0));
        queue.process_point(Vec2::new(1.0, 10.0));
        let segment = queue.process_point(Vec2::new(20.0, 0.0)).unwrap();
        assert_eq!(segment.control2.x, 0.0);
        assert!(segment.control1.x >= 0.0 && segment.control1.x <= 1.0);
    }

    #[test]
    fn test_two_points_make_one_segment() {
        let mut queue = SplineQueue::new();
        queue.reset_drawer(true);
        queue.process_point(Vec2::new(10.0, 0.0));
        queue.process_point(Vec2::new(0.0, 0.0));
        let segment = queue.finalize_processing().unwrap();
        assert_eq!(segment.to, Vec2::new(0.0, 0.0));
        assert_eq!(queue.finalize_processing(), None);
    }

    #[test]
    fn test_spline_drawer_emits_curves() {
        let mut points = vec![
            point(0, 0.0, 0.0, 0.0),
            point(1, 10.0, 10.0, 0.0),
            point(2, 20.0, 0.0, 0.0),
        ];
        let (shapes, _) = run(&mut SplineDrawer::default(), DrawSettings::default(), &mut points);
        let commands = series_commands(&shapes, STROKE);
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], PathCommand::MoveTo(Vec2::ZERO));
        assert!(matches!(commands[2], PathCommand::CurveTo { to, .. } if to == Vec2::new(20.0, 0.0)));
    }
}
