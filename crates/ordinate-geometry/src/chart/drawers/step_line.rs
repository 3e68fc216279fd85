use ordinate_core::math::is_resolved;

use super::{DrawContext, Drawer, STROKE};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

/// Run level from `from` to `cross_x`, change level there, then continue
/// to `to`. Every corner is emitted, including zero-length ones.
pub(crate) fn step_to(
    ctx: &mut DrawContext<'_>,
    group: &ShapesGroup,
    names: &[&str],
    from: (f32, f32),
    cross_x: f32,
    to: (f32, f32),
) {
    ctx.line_to(group, names, cross_x, from.1);
    ctx.line_to(group, names, cross_x, to.1);
    ctx.line_to(group, names, to.0, to.1);
}

/// Horizontal runs joined by vertical steps.
#[derive(Debug, Clone, Default)]
pub struct StepLineDrawer {
    group: Option<ShapesGroup>,
    prev: (f32, f32),
}

impl Drawer for StepLineDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::SUPPORTS_CONNECTING_MISSING
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::IS_LINE_BASED)
        .union(DrawerCapabilities::SUPPORTS_STEP_DIRECTION);

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
        self.prev = (point.x, point.value);
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
        let cross_x = ctx.settings.step_direction.cross_x(self.prev.0, point.x);
        step_to(ctx, group, &[STROKE], self.prev, cross_x, (point.x, point.value));
        self.prev = (point.x, point.value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::DrawSettings;
    use super::*;
    use crate::chart::settings::StepDirection;
    use crate::path::PathCommand;
    use glam::Vec2;

    fn draw(direction: StepDirection) -> Vec<PathCommand> {
        let mut points = vec![point(0, 0.0, 10.0, 0.0), point(1, 4.0, 30.0, 0.0)];
        let settings = DrawSettings {
            step_direction: direction,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut StepLineDrawer::default(), settings, &mut points);
        series_commands(&shapes, STROKE)
    }

    #[test]
    fn test_center_step_crosses_at_midpoint() {
        assert_eq!(
            draw(StepDirection::Center),
            vec![
                PathCommand::MoveTo(Vec2::new(0.0, 10.0)),
                PathCommand::LineTo(Vec2::new(2.0, 10.0)),
                PathCommand::LineTo(Vec2::new(2.0, 30.0)),
                PathCommand::LineTo(Vec2::new(4.0, 30.0)),
            ]
        );
    }

    #[test]
    fn test_forward_and_backward_steps() {
        assert_eq!(
            draw(StepDirection::Forward)[1..],
            [
                PathCommand::LineTo(Vec2::new(4.0, 10.0)),
                PathCommand::LineTo(Vec2::new(4.0, 30.0)),
                PathCommand::LineTo(Vec2::new(4.0, 30.0)),
            ]
        );
        assert_eq!(
            draw(StepDirection::Backward)[1..],
            [
                PathCommand::LineTo(Vec2::new(0.0, 10.0)),
                PathCommand::LineTo(Vec2::new(0.0, 30.0)),
                PathCommand::LineTo(Vec2::new(4.0, 30.0)),
            ]
        );
    }
}
