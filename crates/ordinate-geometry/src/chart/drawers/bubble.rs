use ordinate_core::math::is_resolved;

use super::{DrawContext, Drawer, FILL, HATCH_FILL, STROKE};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType};
use crate::chart::state::PointState;
use crate::style::Color;

pub const NEGATIVE_FILL: &str = "negativeFill";
pub const NEGATIVE_HATCH_FILL: &str = "negativeHatchFill";
pub const NEGATIVE_STROKE: &str = "negativeStroke";

/// Circles sized by the `size` field. Negative sizes draw with the
/// negative shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleDrawer;

impl Drawer for BubbleDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::NEEDS_SIZE_SCALE
        .union(DrawerCapabilities::IS_DISCRETE_BASED)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        let color = settings.color();
        let width = settings.stroke_width();
        let negative = Color::from_hex(0x9e9e9e);
        vec![
            ShapeConfig::fill(FILL, ShapeType::Circle, color.with_alpha(0.7)),
            ShapeConfig::hatch(HATCH_FILL, ShapeType::Circle, settings.hatch()),
            ShapeConfig::stroke(STROKE, ShapeType::Circle, color.darken(0.2), width),
            ShapeConfig::fill(NEGATIVE_FILL, ShapeType::Circle, negative.with_alpha(0.7)).optional(),
            ShapeConfig::hatch(NEGATIVE_HATCH_FILL, ShapeType::Circle, settings.hatch()).optional(),
            ShapeConfig::stroke(NEGATIVE_STROKE, ShapeType::Circle, negative.darken(0.2), width).optional(),
        ]
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.size)) {
            return false;
        }
        let names = if point.size < 0.0 {
            ctx.shapes.names(&[NEGATIVE_FILL, NEGATIVE_HATCH_FILL, NEGATIVE_STROKE])
        } else {
            ctx.shapes.names(&[FILL, HATCH_FILL, STROKE])
        };
        let group = ctx.shapes.add_shapes_group(state, Some(names));
        let center = ctx.point(point.x, point.value);
        let radius = point.size.abs();
        for id in group.ids() {
            if let Some(shape) = ctx.shapes.shape_mut(id) {
                shape.path.circle(center, radius);
            }
        }
        point.shapes = Some(group);
        true
    }
}
