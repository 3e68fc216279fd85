use ordinate_core::math::is_resolved;

use super::step_line::step_to;
use super::{AREA_SHAPES, DrawContext, Drawer, FILLED_SHAPES, STROKE, filled_configs};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::{SeriesSettings, StepDirection};
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

/// Stepped filled region.
///
/// When stacked, a point next to a row where some series below is missing
/// carries `prev_stack`/`next_stack`; the area is closed there and restarted
/// so it follows what remains of the stack.
#[derive(Debug, Clone, Default)]
pub struct StepAreaDrawer {
    group: Option<ShapesGroup>,
    direction: StepDirection,
    prev_x: f32,
    prev_y: f32,
    last_drawn_x: Option<f32>,
    zero_y: f32,
    zeroes: Vec<(f32, f32)>,
}

impl StepAreaDrawer {
    fn start_segment(&mut self, ctx: &mut DrawContext<'_>, group: &ShapesGroup, x: f32, y: f32, zero: f32) {
        ctx.move_to(group, &AREA_SHAPES, x, zero);
        ctx.line_to(group, &AREA_SHAPES, x, y);
        ctx.move_to(group, &[STROKE], x, y);
        if ctx.settings.stacked {
            self.zeroes.clear();
            self.zeroes.push((x, zero));
        }
    }

    fn continue_segment(&mut self, ctx: &mut DrawContext<'_>, group: &ShapesGroup, x: f32, y: f32) {
        let cross_x = self.direction.cross_x(self.prev_x, x);
        step_to(ctx, group, &FILLED_SHAPES, (self.prev_x, self.prev_y), cross_x, (x, y));
    }

    fn close_stacked(&mut self, ctx: &mut DrawContext<'_>, group: &ShapesGroup) {
        let mut prev: Option<(f32, f32)> = None;
        for &(x, y) in self.zeroes.iter().rev() {
            if let Some((prev_x, prev_y)) = prev {
                match self.direction {
                    StepDirection::Forward => ctx.line_to(group, &AREA_SHAPES, prev_x, y),
                    StepDirection::Backward => ctx.line_to(group, &AREA_SHAPES, x, prev_y),
                    StepDirection::Center => {
                        let mid_x = (x + prev_x) / 2.0;
                        ctx.line_to(group, &AREA_SHAPES, mid_x, prev_y);
                        ctx.line_to(group, &AREA_SHAPES, mid_x, y);
                    }
                }
            }
            ctx.line_to(group, &AREA_SHAPES, x, y);
            prev = Some((x, y));
        }
        ctx.close(group, &AREA_SHAPES);
        self.zeroes.clear();
    }

    fn close(&mut self, ctx: &mut DrawContext<'_>, group: &ShapesGroup) {
        match self.last_drawn_x {
            Some(x) if !ctx.settings.stacked => {
                ctx.line_to(group, &AREA_SHAPES, x, self.zero_y);
                ctx.close(group, &AREA_SHAPES);
            }
            _ if !self.zeroes.is_empty() => self.close_stacked(ctx, group),
            _ => {}
        }
    }
}

impl Drawer for StepAreaDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::NEEDS_ZERO
        .union(DrawerCapabilities::SUPPORTS_CONNECTING_MISSING)
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::SUPPORTS_ERROR)
        .union(DrawerCapabilities::SUPPORTS_STEP_DIRECTION);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        filled_configs(settings, ShapeType::Path, 0.65)
    }

    fn start_drawing(&mut self, ctx: &mut DrawContext<'_>) {
        *self = Self {
            direction: ctx.settings.step_direction,
            ..Self::default()
        };
    }

    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.zero)) {
            return false;
        }
        let group = ctx.series_group();
        let (x, y) = (point.x, point.value);
        match point.next_stack.filter(|_| ctx.settings.stacked) {
            Some(next) => {
                ctx.move_to(&group, &[STROKE], x, y);
                ctx.line_to(&group, &[STROKE], x, y);
                self.start_segment(ctx, &group, x, next.value, next.zero);
                self.prev_y = next.value;
            }
            None => {
                self.start_segment(ctx, &group, x, y, point.zero);
                self.prev_y = y;
            }
        }
        if !ctx.settings.stacked {
            self.last_drawn_x = Some(x);
            self.zero_y = point.zero;
        }
        self.prev_x = x;
        self.group = Some(group);
        true
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        let Some(group) = self.group.clone() else {
            return false;
        };
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.zero)) {
            return false;
        }
        let (x, y, zero) = (point.x, point.value, point.zero);

        if !ctx.settings.stacked {
            self.continue_segment(ctx, &group, x, y);
            self.last_drawn_x = Some(x);
            self.prev_y = y;
            self.prev_x = x;
            return true;
        }

        match point.prev_stack {
            Some(prev) => {
                self.continue_segment(ctx, &group, x, prev.value);
                self.zeroes.push((x, prev.zero));
                self.prev_x = x;
                self.prev_y = prev.value;
                self.close(ctx, &group);
                self.start_segment(ctx, &group, x, y, zero);
            }
            None => {
                self.continue_segment(ctx, &group, x, y);
                self.zeroes.push((x, zero));
            }
        }
        match point.next_stack {
            Some(next) => {
                ctx.line_to(&group, &[STROKE], x, y);
                self.close(ctx, &group);
                self.start_segment(ctx, &group, x, next.value, next.zero);
                self.prev_y = next.value;
            }
            None => self.prev_y = y,
        }
        self.prev_x = x;
        true
    }

    fn finalize_segment(&mut self, ctx: &mut DrawContext<'_>) {
        if let Some(group) = self.group.clone() {
            self.close(ctx, &group);
        }
    }
}
