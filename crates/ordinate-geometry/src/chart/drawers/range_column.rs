use ordinate_core::math::is_resolved;

use super::column::column_rect;
use super::{DrawContext, Drawer, filled_configs};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType};
use crate::chart::state::PointState;

/// Rectangles from `low` to `high`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeColumnDrawer;

impl Drawer for RangeColumnDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::IS_DISCRETE_BASED
        .union(DrawerCapabilities::IS_WIDTH_BASED)
        .union(DrawerCapabilities::IS_RANGE_BASED)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        filled_configs(settings, ShapeType::Rect, 1.0)
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.high) && is_resolved(point.low)) {
            return false;
        }
        let group = ctx.shapes.add_shapes_group(state, None);
        let (width, vertical) = (ctx.settings.point_width, ctx.settings.vertical);
        for id in group.ids() {
            if let Some(shape) = ctx.shapes.shape_mut(id) {
                column_rect(&mut shape.path, point.x, point.low, point.high, width, vertical);
            }
        }
        point.shapes = Some(group);
        true
    }
}
