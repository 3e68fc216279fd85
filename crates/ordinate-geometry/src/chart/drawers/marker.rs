use ordinate_core::math::is_resolved;

use super::{DrawContext, Drawer};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType};
use crate::chart::state::PointState;

pub const MARKER: &str = "marker";

/// Fixed-size circle at every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerDrawer;

impl Drawer for MarkerDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::IS_DISCRETE_BASED
        .union(DrawerCapabilities::IS_MARKER_BASED)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        vec![ShapeConfig::filled_outline(
            MARKER,
            ShapeType::Circle,
            settings.color(),
            settings.stroke_width(),
        )]
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value)) {
            return false;
        }
        let group = ctx.shapes.add_shapes_group(state, None);
        let center = ctx.point(point.x, point.value);
        let radius = ctx.settings.marker_size;
        if let Some(path) = ctx.shapes.path_mut(&group, MARKER) {
            path.circle(center, radius);
        }
        point.shapes = Some(group);
        true
    }
}
