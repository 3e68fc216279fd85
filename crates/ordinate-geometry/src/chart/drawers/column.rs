use glam::Vec2;
use ordinate_core::math::is_resolved;

use super::{DrawContext, Drawer, filled_configs};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType};
use crate::chart::state::PointState;
use crate::path::Path;

/// Append the rectangle of a column centred on `x`, spanning `base` to `top`
/// on the value axis.
pub fn column_rect(path: &mut Path, x: f32, base: f32, top: f32, width: f32, vertical: bool) {
    let left = x - width / 2.0;
    let start = base.min(top);
    let length = (base - top).abs();
    if vertical {
        path.rect(Vec2::new(start, left), Vec2::new(length, width));
    } else {
        path.rect(Vec2::new(left, start), Vec2::new(width, length));
    }
}

/// Rectangles from the zero baseline to the value. Also draws bars, with
/// the axes swapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnDrawer;

impl Drawer for ColumnDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::NEEDS_ZERO
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::SUPPORTS_ERROR)
        .union(DrawerCapabilities::IS_DISCRETE_BASED)
        .union(DrawerCapabilities::IS_WIDTH_BASED);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        filled_configs(settings, ShapeType::Rect, 1.0)
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.zero)) {
            return false;
        }
        let group = ctx.shapes.add_shapes_group(state, None);
        let (width, vertical) = (ctx.settings.point_width, ctx.settings.vertical);
        for id in group.ids() {
            if let Some(shape) = ctx.shapes.shape_mut(id) {
                column_rect(&mut shape.path, point.x, point.zero, point.value, width, vertical);
            }
        }
        point.shapes = Some(group);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{DrawSettings, FILL, STROKE};
    use super::*;
    use crate::path::PathCommand;

    #[test]
    fn test_column_geometry() {
        let mut points = vec![point(0, 5.0, 40.0, 100.0)];
        let settings = DrawSettings {
            point_width: 10.0,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut ColumnDrawer, settings, &mut points);
        let group = points[0].shapes.as_ref().unwrap();
        let commands = shapes.path(group, FILL).unwrap().commands();
        assert_eq!(
            commands,
            &[
                PathCommand::MoveTo(Vec2::new(0.0, 40.0)),
                PathCommand::LineTo(Vec2::new(10.0, 40.0)),
                PathCommand::LineTo(Vec2::new(10.0, 100.0)),
                PathCommand::LineTo(Vec2::new(0.0, 100.0)),
                PathCommand::Close,
            ]
        );
        assert_eq!(shapes.path(group, STROKE).unwrap().commands(), commands);
    }

    #[test]
    fn test_negative_column_hangs_from_zero() {
        let mut points = vec![point(0, 5.0, 130.0, 100.0)];
        let settings = DrawSettings {
            point_width: 10.0,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut ColumnDrawer, settings, &mut points);
        let group = points[0].shapes.as_ref().unwrap();
        let (min, max) = shapes.path(group, FILL).unwrap().bounds().unwrap();
        assert_eq!(min, Vec2::new(0.0, 100.0));
        assert_eq!(max, Vec2::new(10.0, 130.0));
    }

    #[test]
    fn test_bar_swaps_axes() {
        let mut points = vec![point(0, 5.0, 40.0, 0.0)];
        let settings = DrawSettings {
            point_width: 10.0,
            vertical: true,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut ColumnDrawer, settings, &mut points);
        let group = points[0].shapes.as_ref().unwrap();
        let (min, max) = shapes.path(group, FILL).unwrap().bounds().unwrap();
        assert_eq!(min, Vec2::new(0.0, 0.0));
        assert_eq!(max, Vec2::new(40.0, 10.0));
    }

    #[test]
    fn test_unresolved_point_is_not_drawn() {
        let mut points = vec![point(0, 5.0, f32::NAN, 100.0)];
        let (shapes, tracker) = run(&mut ColumnDrawer, DrawSettings::default(), &mut points);
        assert_eq!(tracker.drawn(), 0);
        assert_eq!(shapes.used_count(), 0);
    }
}
