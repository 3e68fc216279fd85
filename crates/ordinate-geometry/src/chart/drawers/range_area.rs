use ordinate_core::math::is_resolved;

use super::{AREA_SHAPES, DrawContext, Drawer, FILL, HATCH_FILL};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

pub const HIGH_STROKE: &str = "highStroke";
pub const LOW_STROKE: &str = "lowStroke";

/// Filled band between `high` and `low`. The high edge is drawn forwards as
/// points arrive; the low edge is buffered and replayed backwards when the
/// segment closes.
#[derive(Debug, Clone, Default)]
pub struct RangeAreaDrawer {
    group: Option<ShapesGroup>,
    lows: Vec<(f32, f32)>,
}

impl Drawer for RangeAreaDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::SUPPORTS_CONNECTING_MISSING
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::IS_RANGE_BASED);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        let color = settings.color();
        let stroke = color.darken(0.2);
        vec![
            ShapeConfig::fill(FILL, ShapeType::Path, color.with_alpha(0.65)),
            ShapeConfig::hatch(HATCH_FILL, ShapeType::Path, settings.hatch()),
            ShapeConfig::stroke(HIGH_STROKE, ShapeType::Path, stroke, settings.stroke_width()),
            ShapeConfig::stroke(LOW_STROKE, ShapeType::Path, stroke, settings.stroke_width()),
        ]
    }

    fn start_drawing(&mut self, _ctx: &mut DrawContext<'_>) {
        *self = Self::default();
    }

    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.high) && is_resolved(point.low)) {
            return false;
        }
        let group = ctx.series_group();
        ctx.move_to(&group, &[FILL, HATCH_FILL, HIGH_STROKE], point.x, point.high);
        self.lows.clear();
        self.lows.push((point.x, point.low));
        self.group = Some(group);
        true
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        let Some(group) = &self.group else {
            return false;
        };
        if !(is_resolved(point.x) && is_resolved(point.high) && is_resolved(point.low)) {
            return false;
        }
        ctx.line_to(group, &[FILL, HATCH_FILL, HIGH_STROKE], point.x, point.high);
        self.lows.push((point.x, point.low));
        true
    }

    fn finalize_segment(&mut self, ctx: &mut DrawContext<'_>) {
        let Some(group) = &self.group else {
            return;
        };
        if let Some(&(x, y)) = self.lows.first() {
            ctx.move_to(group, &[LOW_STROKE], x, y);
        }
        for &(x, y) in self.lows.iter().skip(1) {
            ctx.line_to(group, &[LOW_STROKE], x, y);
        }
        for &(x, y) in self.lows.iter().rev() {
            ctx.line_to(group, &AREA_SHAPES, x, y);
        }
        ctx.close(group, &AREA_SHAPES);
        self.lows.clear();
    }
}
