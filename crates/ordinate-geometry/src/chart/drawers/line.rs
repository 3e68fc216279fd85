use ordinate_core::math::is_resolved;

use super::{DrawContext, Drawer, STROKE};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

/// Polyline through the values. With `closed` set the last point joins the
/// first, as radar lines do.
#[derive(Debug, Clone, Default)]
pub struct LineDrawer {
    group: Option<ShapesGroup>,
    first: Option<(usize, f32, f32)>,
    last_index: Option<usize>,
}

impl Drawer for LineDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::SUPPORTS_CONNECTING_MISSING
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::SUPPORTS_ERROR)
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
        *self = Self::default();
    }

    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value)) {
            return false;
        }
        let group = ctx.series_group();
        ctx.move_to(&group, &[STROKE], point.x, point.value);
        self.first.get_or_insert((point.index, point.x, point.value));
        self.last_index = Some(point.index);
        self.group = Some(group);
        true
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        let Some(group) = &self.group else {
            return false;
        };
        if !(is_resolved(point.x) && is_resolved(point.value)) {
            return false;
        }
        ctx.line_to(group, &[STROKE], point.x, point.value);
        self.last_index = Some(point.index);
        true
    }

    fn finalize_drawing(&mut self, ctx: &mut DrawContext<'_>) {
        if !ctx.settings.closed {
            return;
        }
        let (Some(group), Some((0, x, y)), Some(last)) = (&self.group, self.first, self.last_index) else {
            return;
        };
        let ends_on_last_row = last + 1 == ctx.settings.row_count;
        if last > 0 && (ctx.settings.connect_missing || ends_on_last_row) {
            ctx.line_to(group, &[STROKE], x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::DrawSettings;
    use super::*;
    use crate::path::PathCommand;
    use glam::Vec2;

    #[test]
    fn test_polyline() {
        let mut points = vec![point(0, 0.0, 10.0, 0.0), point(1, 10.0, 20.0, 0.0)];
        let (shapes, _) = run(&mut LineDrawer::default(), DrawSettings::default(), &mut points);
        assert_eq!(
            series_commands(&shapes, STROKE),
            vec![
                PathCommand::MoveTo(Vec2::new(0.0, 10.0)),
                PathCommand::LineTo(Vec2::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_closed_line_returns_to_first_point() {
        let mut points = vec![
            point(0, 0.0, 10.0, 0.0),
            point(1, 10.0, 20.0, 0.0),
            point(2, 20.0, 5.0, 0.0),
        ];
        let settings = DrawSettings {
            closed: true,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut LineDrawer::default(), settings, &mut points);
        let commands = series_commands(&shapes, STROKE);
        assert_eq!(commands.last(), Some(&PathCommand::LineTo(Vec2::new(0.0, 10.0))));
    }

    #[test]
    fn test_closed_line_stays_open_after_missing_first() {
        let mut points = vec![missing(0), point(1, 10.0, 20.0, 0.0), point(2, 20.0, 5.0, 0.0)];
        let settings = DrawSettings {
            closed: true,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut LineDrawer::default(), settings, &mut points);
        assert_eq!(series_commands(&shapes, STROKE).len(), 2);
    }
}
