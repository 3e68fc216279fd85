use ordinate_core::math::is_resolved;

use super::{AREA_SHAPES, DrawContext, Drawer, FILLED_SHAPES, STROKE, filled_configs};
use crate::chart::capabilities::DrawerCapabilities;
use crate::chart::data::PointMeta;
use crate::chart::settings::SeriesSettings;
use crate::chart::shapes::{ShapeConfig, ShapeType, ShapesGroup};
use crate::chart::state::PointState;

/// Baseline sample of a stacked area, walked backwards on close-out.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZeroSample {
    x: f32,
    zero: f32,
    missing: bool,
}

/// Filled region between the values and the zero line, or the series below
/// when stacked.
#[derive(Debug, Clone, Default)]
pub struct AreaDrawer {
    group: Option<ShapesGroup>,
    last_drawn_x: f32,
    zero_y: f32,
    zeroes: Vec<ZeroSample>,
}

impl Drawer for AreaDrawer {
    const CAPABILITIES: DrawerCapabilities = DrawerCapabilities::NEEDS_ZERO
        .union(DrawerCapabilities::SUPPORTS_CONNECTING_MISSING)
        .union(DrawerCapabilities::SUPPORTS_STACK)
        .union(DrawerCapabilities::SUPPORTS_COMPARISON)
        .union(DrawerCapabilities::SUPPORTS_ERROR);

    fn shape_configs(&self, settings: &SeriesSettings) -> Vec<ShapeConfig> {
        filled_configs(settings, ShapeType::Path, 0.65)
    }

    fn start_drawing(&mut self, _ctx: &mut DrawContext<'_>) {
        *self = Self::default();
    }

    fn draw_first_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.zero)) {
            return false;
        }
        let group = ctx.series_group();
        ctx.move_to(&group, &AREA_SHAPES, point.x, point.zero);
        ctx.line_to(&group, &AREA_SHAPES, point.x, point.value);
        ctx.move_to(&group, &[STROKE], point.x, point.value);
        self.zeroes.clear();
        if ctx.settings.stacked {
            self.zeroes.push(ZeroSample {
                x: point.x,
                zero: point.zero,
                missing: point.zero_missing,
            });
        } else {
            self.last_drawn_x = point.x;
            self.zero_y = point.zero;
        }
        self.group = Some(group);
        true
    }

    fn draw_subsequent_point(&mut self, ctx: &mut DrawContext<'_>, point: &mut PointMeta, _state: PointState) -> bool {
        let Some(group) = &self.group else {
            return false;
        };
        if !(is_resolved(point.x) && is_resolved(point.value) && is_resolved(point.zero)) {
            return false;
        }
        ctx.line_to(group, &FILLED_SHAPES, point.x, point.value);
        if ctx.settings.stacked {
            self.zeroes.push(ZeroSample {
                x: point.x,
                zero: point.zero,
                missing: point.zero_missing,
            });
        } else {
            self.last_drawn_x = point.x;
        }
        true
    }

    fn finalize_segment(&mut self, ctx: &mut DrawContext<'_>) {
        let Some(group) = &self.group else {
            return;
        };
        if !ctx.settings.stacked {
            ctx.line_to(group, &AREA_SHAPES, self.last_drawn_x, self.zero_y);
            ctx.close(group, &AREA_SHAPES);
            return;
        }
        // Walk the baseline back. Around a baseline from a missing row the
        // edge steps at the midpoint instead of cutting diagonally.
        let mut prev: Option<ZeroSample> = None;
        for sample in self.zeroes.iter().rev() {
            if let Some(prev) = prev {
                if sample.missing || prev.missing {
                    let mid_x = (prev.x + sample.x) / 2.0;
                    ctx.line_to(group, &AREA_SHAPES, mid_x, prev.zero);
                    ctx.line_to(group, &AREA_SHAPES, mid_x, sample.zero);
                }
            }
            ctx.line_to(group, &AREA_SHAPES, sample.x, sample.zero);
            prev = Some(*sample);
        }
        ctx.close(group, &AREA_SHAPES);
        self.zeroes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{DrawSettings, FILL};
    use super::*;
    use crate::path::PathCommand;
    use glam::Vec2;

    fn line(x: f32, y: f32) -> PathCommand {
        PathCommand::LineTo(Vec2::new(x, y))
    }

    #[test]
    fn test_area_closes_to_zero_line() {
        let mut points = vec![point(0, 0.0, 50.0, 100.0), point(1, 10.0, 40.0, 100.0)];
        let (shapes, _) = run(&mut AreaDrawer::default(), DrawSettings::default(), &mut points);
        assert_eq!(
            series_commands(&shapes, FILL),
            vec![
                PathCommand::MoveTo(Vec2::new(0.0, 100.0)),
                line(0.0, 50.0),
                line(10.0, 40.0),
                line(10.0, 100.0),
                PathCommand::Close,
            ]
        );
        assert_eq!(
            series_commands(&shapes, STROKE),
            vec![PathCommand::MoveTo(Vec2::new(0.0, 50.0)), line(10.0, 40.0)]
        );
    }

    #[test]
    fn test_stacked_close_out_steps_around_missing_baseline() {
        let mut middle = point(1, 10.0, 40.0, 90.0);
        middle.zero_missing = true;
        let mut points = vec![point(0, 0.0, 50.0, 100.0), middle, point(2, 20.0, 30.0, 80.0)];
        let settings = DrawSettings {
            stacked: true,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut AreaDrawer::default(), settings, &mut points);
        let commands = series_commands(&shapes, FILL);
        assert_eq!(
            commands[4..],
            [
                line(20.0, 80.0),
                line(15.0, 80.0),
                line(15.0, 90.0),
                line(10.0, 90.0),
                line(5.0, 90.0),
                line(5.0, 100.0),
                line(0.0, 100.0),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_stacked_close_out_follows_present_baseline() {
        let mut points = vec![point(0, 0.0, 50.0, 100.0), point(1, 10.0, 40.0, 90.0)];
        let settings = DrawSettings {
            stacked: true,
            ..DrawSettings::default()
        };
        let (shapes, _) = run(&mut AreaDrawer::default(), settings, &mut points);
        let commands = series_commands(&shapes, FILL);
        assert_eq!(commands[3..], [line(10.0, 90.0), line(0.0, 100.0), PathCommand::Close]);
    }

    #[test]
    fn test_missing_point_splits_area() {
        let mut points = vec![
            point(0, 0.0, 50.0, 100.0),
            point(1, 10.0, 40.0, 100.0),
            missing(2),
            point(3, 30.0, 60.0, 100.0),
        ];
        let (shapes, tracker) = run(&mut AreaDrawer::default(), DrawSettings::default(), &mut points);
        assert_eq!(tracker.segments(), 2);
        let closes = series_commands(&shapes, FILL)
            .iter()
            .filter(|c| matches!(c, PathCommand::Close))
            .count();
        assert_eq!(closes, 2);
    }
}
