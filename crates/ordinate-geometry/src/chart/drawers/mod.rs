//! Series drawers.
//!
//! A drawer turns resolved [`PointMeta`] into path commands, one point at a
//! time. The series drives it through [`draw_point`] and [`finish`], which
//! own the bookkeeping shared by every drawer: skipping missing points,
//! breaking continuous segments and counting what was drawn.
//!
//! Drawers work in category/value coordinates. [`DrawContext::point`] maps
//! them to screen coordinates, swapping axes for vertical series.

pub mod area;
pub mod bubble;
pub mod column;
pub mod line;
pub mod marker;
pub mod range_area;
pub mod range_column;
pub mod spline;
pub mod step_area;
pub mod step_line;

use glam::Vec2;

use super::capabilities::{DrawerCapabilities, DrawerType};
use super::data::PointMeta;
use super::settings::{SeriesSettings, StepDirection};
use super::shapes::{ShapeConfig, ShapeType, ShapesGroup, ShapesManager};
use super::state::PointState;

pub use area::AreaDrawer;
pub use bubble::BubbleDrawer;
pub use column::ColumnDrawer;
pub use line::LineDrawer;
pub use marker::MarkerDrawer;
pub use range_area::RangeAreaDrawer;
pub use range_column::RangeColumnDrawer;
pub use spline::{SplineDrawer, SplineQueue};
pub use step_area::StepAreaDrawer;
pub use step_line::StepLineDrawer;

pub const FILL: &str = "fill";
pub const HATCH_FILL: &str = "hatchFill";
pub const STROKE: &str = "stroke";

/// Fill, hatch and stroke names of filled drawers.
pub const FILLED_SHAPES: [&str; 3] = [FILL, HATCH_FILL, STROKE];
/// Fill and hatch names of filled drawers.
pub const AREA_SHAPES: [&str; 2] = [FILL, HATCH_FILL];

/// Per-pass values drawers read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSettings {
    pub vertical: bool,
    pub connect_missing: bool,
    pub stacked: bool,
    pub step_direction: StepDirection,
    /// Resolved point width in pixels.
    pub point_width: f32,
    pub marker_size: f32,
    pub closed: bool,
    /// The category scale runs right to left.
    pub rtl: bool,
    pub row_count: usize,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            vertical: false,
            connect_missing: false,
            stacked: false,
            step_direction: StepDirection::Center,
            point_width: 0.0,
            marker_size: 4.0,
            closed: false,
            rtl: false,
            row_count: 0,
        }
    }
}

/// Everything a drawer may touch during a pass.
#[derive(Debug)]
pub struct DrawContext<'a> {
    pub shapes: &'a mut ShapesManager,
    pub settings: DrawSettings,
    /// State continuous drawers draw the whole series in.
    pub series_state: PointState,
}

impl<'a> DrawContext<'a> {
    pub fn new(shapes: &'a mut ShapesManager, settings: DrawSettings, series_state: PointState) -> Self {
        Self {
            shapes,
            settings,
            series_state,
        }
    }

    /// Screen position of a category/value pair.
    #[inline]
    pub fn point(&self, x: f32, y: f32) -> Vec2 {
        if self.settings.vertical {
            Vec2::new(y, x)
        } else {
            Vec2::new(x, y)
        }
    }

    /// The shared group of a continuous series.
    pub fn series_group(&mut self) -> ShapesGroup {
        self.shapes.get_shapes_group(self.series_state, None)
    }

    pub fn move_to(&mut self, group: &ShapesGroup, names: &[&str], x: f32, y: f32) {
        let to = self.point(x, y);
        self.shapes.for_each_path(group, names, |path| {
            path.move_to(to);
        });
    }

    pub fn line_to(&mut self, group: &ShapesGroup, names: &[&str], x: f32, y: f32) {
        let to = self.point(x, y);
        self.shapes.for_each_path(group, names, |path| {
            path.line_to(to);
        });
    }

    pub fn close(&mut self, group: &ShapesGroup, names: &[&str]) {
        self.shapes.for_each_path(group, names, |path| {
            path.close();
        });
    }
}

/// Per-type drawing strategy.
pub trait Drawer {
    /// Behaviours of this drawer type.
    const CAPABILITIES: DrawerCapabilities;

    /// Shapes this drawer allocates, styled from the series settings.
    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig>;

    /// Reset per-pass state.
    fn start_drawing(&mut self, _ctx: &mut DrawContext<'_>) {}

    /// First point of a segment. Returns true if something was drawn.
    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool {
        self.draw_subsequent_point(ctx, point, state)
    }

    /// Any later point of a segment. Returns true if something was drawn.
    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool;

    /// Close the open segment.
    fn finalize_segment(&mut self, _ctx: &mut DrawContext<'_>) {}

    /// End of the pass, after the last segment was finalized.
    fn finalize_drawing(&mut self, _ctx: &mut DrawContext<'_>) {}
}

/// Segment state threaded through a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentTracker {
    prev_point_drawn: bool,
    segments: usize,
    drawn: usize,
}

impl SegmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prev_point_drawn(&self) -> bool {
        self.prev_point_drawn
    }

    /// Continuous segments started this pass.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Points a drawer reported as drawn.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

/// Feed one point to `drawer`.
pub fn draw_point<D: Drawer>(
    drawer: &mut D,
    ctx: &mut DrawContext<'_>,
    point: &mut PointMeta,
    state: PointState,
    tracker: &mut SegmentTracker,
) {
    if D::CAPABILITIES.is_discrete() {
        if !point.missing && drawer.draw_subsequent_point(ctx, point, state) {
            tracker.drawn += 1;
        }
        return;
    }

    if point.missing {
        let bridge = ctx.settings.connect_missing && D::CAPABILITIES.can_connect_missing();
        if tracker.prev_point_drawn && !bridge {
            drawer.finalize_segment(ctx);
            tracker.prev_point_drawn = false;
        }
        return;
    }

    let drawn = if tracker.prev_point_drawn {
        let drawn = drawer.draw_subsequent_point(ctx, point, state);
        if !drawn {
            drawer.finalize_segment(ctx);
        }
        drawn
    } else {
        let drawn = drawer.draw_first_point(ctx, point, state);
        if drawn {
            tracker.segments += 1;
        }
        drawn
    };
    tracker.prev_point_drawn = drawn;
    if drawn {
        tracker.drawn += 1;
    } else {
        tracing::trace!(index = point.index, "point not drawn");
    }
}

/// Close the open segment, if any, and end the pass.
pub fn finish<D: Drawer>(drawer: &mut D, ctx: &mut DrawContext<'_>, tracker: &mut SegmentTracker) {
    if tracker.prev_point_drawn {
        drawer.finalize_segment(ctx);
        tracker.prev_point_drawn = false;
    }
    drawer.finalize_drawing(ctx);
}

/// Fill, hatch and stroke configs shared by filled drawers.
pub(crate) fn filled_configs(settings: &SeriesSettings, shape_type: ShapeType, fill_alpha: f32) -> Vec<ShapeConfig> {
    let color = settings.color();
    vec![
        ShapeConfig::fill(FILL, shape_type, color.with_alpha(fill_alpha)),
        ShapeConfig::hatch(HATCH_FILL, shape_type, settings.hatch()),
        ShapeConfig::stroke(STROKE, shape_type, color.darken(0.2), settings.stroke_width()),
    ]
}

/// A drawer for any [`DrawerType`].
#[derive(Debug, Clone)]
pub enum AnyDrawer {
    Column(ColumnDrawer),
    RangeColumn(RangeColumnDrawer),
    Line(LineDrawer),
    StepLine(StepLineDrawer),
    Spline(SplineDrawer),
    Area(AreaDrawer),
    StepArea(StepAreaDrawer),
    RangeArea(RangeAreaDrawer),
    Bubble(BubbleDrawer),
    Marker(MarkerDrawer),
}

macro_rules! dispatch {
    ($self:expr, $drawer:ident => $body:expr) => {
        match $self {
            AnyDrawer::Column($drawer) => $body,
            AnyDrawer::RangeColumn($drawer) => $body,
            AnyDrawer::Line($drawer) => $body,
            AnyDrawer::StepLine($drawer) => $body,
            AnyDrawer::Spline($drawer) => $body,
            AnyDrawer::Area($drawer) => $body,
            AnyDrawer::StepArea($drawer) => $body,
            AnyDrawer::RangeArea($drawer) => $body,
            AnyDrawer::Bubble($drawer) => $body,
            AnyDrawer::Marker($drawer) => $body,
        }
    };
}

fn capabilities_of<D: Drawer>(_: &D) -> DrawerCapabilities {
    D::CAPABILITIES
}

impl AnyDrawer {
    pub fn new(kind: DrawerType) -> Self {
        match kind {
            DrawerType::Column | DrawerType::Bar => AnyDrawer::Column(ColumnDrawer),
            DrawerType::RangeColumn => AnyDrawer::RangeColumn(RangeColumnDrawer),
            DrawerType::Line => AnyDrawer::Line(LineDrawer::default()),
            DrawerType::StepLine => AnyDrawer::StepLine(StepLineDrawer::default()),
            DrawerType::Spline => AnyDrawer::Spline(SplineDrawer::default()),
            DrawerType::Area => AnyDrawer::Area(AreaDrawer::default()),
            DrawerType::StepArea => AnyDrawer::StepArea(StepAreaDrawer::default()),
            DrawerType::RangeArea => AnyDrawer::RangeArea(RangeAreaDrawer::default()),
            DrawerType::Bubble => AnyDrawer::Bubble(BubbleDrawer),
            DrawerType::Marker => AnyDrawer::Marker(MarkerDrawer),
        }
    }

    pub fn capabilities(&self) -> DrawerCapabilities {
        dispatch!(self, d => capabilities_of(d))
    }

    pub fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        dispatch!(self, d => d.shape_configs(settings))
    }

    pub fn start_drawing(&mut self, ctx: &mut DrawContext<'_>) {
        dispatch!(self, d => d.start_drawing(ctx))
    }

    pub fn draw_point(
        &mut self,
        ctx: &mut DrawContext<'_>,
        point: &mut PointMeta,
        state: PointState,
        tracker: &mut SegmentTracker,
    ) {
        dispatch!(self, d => draw_point(d, ctx, point, state, tracker))
    }

    pub fn finish(&mut self, ctx: &mut DrawContext<'_>, tracker: &mut SegmentTracker) {
        dispatch!(self, d => finish(d, ctx, tracker))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::chart::data::StackEdge;

    /// A resolved point.
    pub fn point(index: usize, x: f32, value: f32, zero: f32) -> PointMeta {
        let mut meta = PointMeta::new(index);
        meta.x = x;
        meta.value = value;
        meta.zero = zero;
        meta
    }

    pub fn range(index: usize, x: f32, high: f32, low: f32) -> PointMeta {
        let mut meta = PointMeta::new(index);
        meta.x = x;
        meta.high = high;
        meta.low = low;
        meta
    }

    pub fn missing(index: usize) -> PointMeta {
        let mut meta = PointMeta::new(index);
        meta.missing = true;
        meta
    }

    pub fn edge(zero: f32, value: f32) -> Option<StackEdge> {
        Some(StackEdge { zero, value })
    }

    /// Run a full pass and return the shapes with the segment tracker.
    pub fn run<D: Drawer>(
        drawer: &mut D,
        settings: DrawSettings,
        points: &mut [PointMeta],
    ) -> (ShapesManager, SegmentTracker) {
        let mut shapes = ShapesManager::new(drawer.shape_configs(&SeriesSettings::default()));
        let mut tracker = SegmentTracker::new();
        {
            let settings = DrawSettings {
                row_count: points.len(),
                ..settings
            };
            let mut ctx = DrawContext::new(&mut shapes, settings, PointState::Normal);
            drawer.start_drawing(&mut ctx);
            for point in points.iter_mut() {
                draw_point(drawer, &mut ctx, point, PointState::Normal, &mut tracker);
            }
            finish(drawer, &mut ctx, &mut tracker);
        }
        (shapes, tracker)
    }

    /// Commands of the shape `name` in the series group.
    pub fn series_commands(shapes: &ShapesManager, name: &str) -> Vec<crate::path::PathCommand> {
        let group = &shapes.groups()[0];
        shapes.path(group, name).map(|p| p.commands().to_vec()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_missing_point_breaks_segment() {
        let mut drawer = LineDrawer::default();
        let mut points = vec![
            point(0, 0.0, 10.0, 100.0),
            point(1, 10.0, 20.0, 100.0),
            missing(2),
            point(3, 30.0, 30.0, 100.0),
        ];
        let (shapes, tracker) = run(&mut drawer, DrawSettings::default(), &mut points);
        assert_eq!(tracker.segments(), 2);
        assert_eq!(tracker.drawn(), 3);
        let group = &shapes.groups()[0];
        assert_eq!(shapes.path(group, STROKE).unwrap().subpath_count(), 2);
    }

    #[test]
    fn test_connect_missing_bridges_gap() {
        let mut drawer = LineDrawer::default();
        let mut points = vec![point(0, 0.0, 10.0, 100.0), missing(1), point(2, 20.0, 30.0, 100.0)];
        let settings = DrawSettings {
            connect_missing: true,
            ..DrawSettings::default()
        };
        let (shapes, tracker) = run(&mut drawer, settings, &mut points);
        assert_eq!(tracker.segments(), 1);
        let group = &shapes.groups()[0];
        assert_eq!(shapes.path(group, STROKE).unwrap().subpath_count(), 1);
    }

    #[test]
    fn test_discrete_skips_missing() {
        let mut drawer = ColumnDrawer;
        let mut points = vec![point(0, 5.0, 40.0, 100.0), missing(1), point(2, 25.0, 60.0, 100.0)];
        let settings = DrawSettings {
            point_width: 10.0,
            ..DrawSettings::default()
        };
        let (shapes, tracker) = run(&mut drawer, settings, &mut points);
        assert_eq!(tracker.drawn(), 2);
        assert_eq!(tracker.segments(), 0);
        assert_eq!(shapes.groups().len(), 2);
        assert!(points[1].shapes.is_none());
    }

    #[test]
    fn test_capabilities_per_type() {
        for kind in DrawerType::ALL {
            let caps = AnyDrawer::new(kind).capabilities();
            let discrete = matches!(
                kind,
                DrawerType::Column | DrawerType::Bar | DrawerType::RangeColumn | DrawerType::Bubble | DrawerType::Marker
            );
            assert_eq!(caps.is_discrete(), discrete, "{kind:?}");
        }
        assert!(AnyDrawer::new(DrawerType::Bar).capabilities().is_width_based());
    }

    #[test]
    fn test_vertical_point_swaps_axes() {
        let mut shapes = ShapesManager::new(Vec::new());
        let settings = DrawSettings {
            vertical: true,
            ..DrawSettings::default()
        };
        let ctx = DrawContext::new(&mut shapes, settings, PointState::Normal);
        assert_eq!(ctx.point(1.0, 2.0), Vec2::new(2.0, 1.0));
    }
}
