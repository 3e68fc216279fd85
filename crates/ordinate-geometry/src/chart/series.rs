//! Series orchestration.
//!
//! A [`Series`] owns exactly one drawer and one [`ShapesManager`], binds to
//! an x and a y scale and runs the draw pass: iterate the rows, resolve every
//! row to pixel coordinates in its [`PointMeta`], feed the drawer and record
//! where labels and markers should go. What the pass does is keyed on the
//! series' consistency bits; a consistent series is not touched at all.

use std::rc::Rc;

use ordinate_core::ConfigResult;
use ordinate_core::consistency::{ConsistencyState, ConsistencyTracker, Invalidatable, Signal};
use ordinate_core::math::is_resolved;
use ordinate_core::profiling::{profile_function, profile_scope};

use super::animation::{AnimationTarget, ColumnAnimation};
use super::capabilities::{DrawerCapabilities, DrawerType};
use super::data::{DataIterator, DataSet, PointMeta, PositionProvider, RowIterator, StackEdge, Value, fields};
use super::drawers::{AnyDrawer, DrawContext, DrawSettings, SegmentTracker};
use super::rect::Rect;
use super::scale::Scale;
use super::settings::{AnimationSettings, PointWidth, SeriesSettings};
use super::shapes::{LayerId, ShapesManager, VectorSurface};
use super::state::{InteractivityState, PointState};
use crate::style::Color;

/// A unique identifier for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(u64);

impl SeriesId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Stacked baseline and top of one row, in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackEntry {
    pub zero: f64,
    pub value: f64,
    /// The series directly below is missing this row.
    pub zero_missing: bool,
    /// `(zero, value)` of this row stacked only on the series below that are
    /// present at the previous row. Set when one of them is missing there.
    pub prev: Option<(f64, f64)>,
    /// Same as `prev`, for the next row.
    pub next: Option<(f64, f64)>,
}

/// Counters of the last rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub segments: usize,
    pub missing: usize,
}

/// What a call to [`Series::draw`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Nothing was invalid.
    Skipped,
    /// The series is disabled; its shapes were released.
    Disabled,
    /// Shapes were rebuilt from the data.
    Rebuilt,
    /// Existing shapes were repainted or reordered in place.
    Updated,
}

/// One plotted series.
#[derive(Debug)]
pub struct Series {
    tracker: ConsistencyTracker,
    name: String,
    kind: DrawerType,
    drawer: AnyDrawer,
    shapes: ShapesManager,
    settings: SeriesSettings,
    data: DataSet,
    meta: Vec<PointMeta>,
    x_scale: Rc<dyn Scale>,
    y_scale: Rc<dyn Scale>,
    bounds: Rect,
    point_width: f32,
    container: Option<LayerId>,
    stack: Vec<StackEntry>,
    animation: Option<ColumnAnimation>,
    animation_played: bool,
    stats: DrawStats,
}

impl Series {
    /// Create a series drawn by `kind`. Everything is invalid until the first
    /// draw.
    pub fn new(kind: DrawerType, data: DataSet, x_scale: Rc<dyn Scale>, y_scale: Rc<dyn Scale>) -> Self {
        let drawer = AnyDrawer::new(kind);
        let settings = SeriesSettings::default();
        let shapes = ShapesManager::new(drawer.shape_configs(&settings));
        let mut series = Self {
            tracker: ConsistencyTracker::new(),
            name: String::new(),
            kind,
            drawer,
            shapes,
            settings,
            data,
            meta: Vec::new(),
            x_scale,
            y_scale,
            bounds: Rect::default(),
            point_width: 0.0,
            container: None,
            stack: Vec::new(),
            animation: None,
            animation_played: false,
            stats: DrawStats::default(),
        };
        series.invalidate(ConsistencyState::SERIES_GROUP, Signal::empty());
        series
    }

    pub fn with_settings(mut self, settings: SeriesSettings) -> Self {
        self.settings = settings;
        self.invalidate(ConsistencyState::SERIES_SHAPE_MANAGER, Signal::empty());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> SeriesId {
        SeriesId(self.tracker.source().as_raw())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DrawerType {
        self.kind
    }

    pub fn capabilities(&self) -> DrawerCapabilities {
        self.drawer.capabilities()
    }

    pub fn settings(&self) -> &SeriesSettings {
        &self.settings
    }

    pub fn shapes(&self) -> &ShapesManager {
        &self.shapes
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resolved point width in pixels.
    pub fn point_width(&self) -> f32 {
        self.point_width
    }

    pub fn y_scale(&self) -> &Rc<dyn Scale> {
        &self.y_scale
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Apply a settings change and invalidate what it reports.
    pub fn update_settings(&mut self, f: impl FnOnce(&mut SeriesSettings) -> ConsistencyState) -> ConsistencyState {
        let state = f(&mut self.settings);
        self.apply_settings_change(state)
    }

    /// Like [`update_settings`](Self::update_settings) for validated setters.
    pub fn try_update_settings(
        &mut self,
        f: impl FnOnce(&mut SeriesSettings) -> ConfigResult<ConsistencyState>,
    ) -> ConfigResult<ConsistencyState> {
        let state = f(&mut self.settings)?;
        Ok(self.apply_settings_change(state))
    }

    fn apply_settings_change(&mut self, state: ConsistencyState) -> ConsistencyState {
        if state.is_empty() {
            return state;
        }
        self.invalidate(state, signal_for(state))
    }

    pub fn set_color(&mut self, color: Color) -> ConsistencyState {
        self.update_settings(|s| s.set_color(color))
    }

    pub fn set_stacked(&mut self, stacked: bool) -> ConsistencyState {
        self.update_settings(|s| s.set_stacked(stacked))
    }

    pub fn set_connect_missing(&mut self, connect: bool) -> ConsistencyState {
        self.update_settings(|s| s.set_connect_missing(connect))
    }

    pub fn set_z_index(&mut self, z_index: f32) -> ConsistencyState {
        self.update_settings(|s| s.set_z_index(z_index))
    }

    pub fn set_enabled(&mut self, enabled: bool) -> ConsistencyState {
        self.update_settings(|s| s.set_enabled(enabled))
    }

    pub fn set_point_width(&mut self, width: PointWidth) -> ConfigResult<ConsistencyState> {
        self.try_update_settings(|s| s.set_point_width(width))
    }

    /// Replace the animation settings. The appearance animation plays again
    /// on the next rebuild.
    pub fn set_animation(&mut self, animation: AnimationSettings) -> ConfigResult<ConsistencyState> {
        let state = self.try_update_settings(|s| s.set_animation(animation))?;
        self.animation_played = false;
        Ok(state)
    }

    // =========================================================================
    // Data
    // =========================================================================

    fn invalidate_data(&mut self) {
        self.invalidate(
            ConsistencyState::DATA | ConsistencyState::SERIES_DATA | ConsistencyState::SERIES_POINTS,
            Signal::DATA_CHANGED | Signal::NEEDS_REDRAW,
        );
    }

    /// Write a field. Returns false if the row does not exist.
    pub fn set_value(&mut self, row: usize, field: &str, value: impl Into<Value>) -> bool {
        let written = self.data.set(row, field, value.into());
        if written {
            self.invalidate_data();
        }
        written
    }

    pub fn push_row(&mut self, values: impl IntoIterator<Item = Value>) -> usize {
        let row = self.data.push_row(values);
        self.invalidate_data();
        row
    }

    /// Remove a row. Returns false if it does not exist.
    pub fn remove_row(&mut self, row: usize) -> bool {
        let removed = self.data.remove_row(row);
        if removed {
            self.invalidate_data();
        }
        removed
    }

    pub fn set_data(&mut self, data: DataSet) {
        self.data = data;
        self.invalidate_data();
    }

    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }

    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        self.data.get(row, field)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Set the pixel rectangle the series is drawn into.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.invalidate(ConsistencyState::BOUNDS, Signal::NEEDS_REDRAW);
        }
    }

    pub fn set_scales(&mut self, x_scale: Rc<dyn Scale>, y_scale: Rc<dyn Scale>) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self.invalidate(
            ConsistencyState::SERIES_POINTS | ConsistencyState::SERIES_STACK,
            Signal::NEEDS_REDRAW | Signal::NEEDS_RECALCULATION,
        );
    }

    /// Attach the series' shapes to a parent layer.
    pub fn set_container(&mut self, layer: LayerId) {
        if self.container != Some(layer) {
            self.container = Some(layer);
            self.invalidate(ConsistencyState::CONTAINER, Signal::NEEDS_REDRAW);
        }
    }

    pub fn container(&self) -> Option<LayerId> {
        self.container
    }

    /// Returns true if the series takes part in stacking.
    pub fn is_stacked(&self) -> bool {
        self.settings.stacked() && self.capabilities().supports_stack()
    }

    /// Raw values the chart stacks, one per row.
    pub fn stack_values(&self) -> Vec<Option<f64>> {
        (0..self.data.row_count())
            .map(|row| self.data.get(row, fields::VALUE).and_then(|v| self.y_scale.value_of(v)))
            .collect()
    }

    /// Install stacked baselines computed by the chart.
    pub(crate) fn set_stack(&mut self, stack: Vec<StackEntry>) {
        if self.stack != stack {
            self.stack = stack;
            self.invalidate(ConsistencyState::SERIES_POINTS, Signal::empty());
        }
    }

    pub fn stack(&self) -> &[StackEntry] {
        &self.stack
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn draw_settings(&self, caps: DrawerCapabilities) -> DrawSettings {
        DrawSettings {
            vertical: self.kind.is_vertical(),
            connect_missing: self.settings.connect_missing() && caps.can_connect_missing(),
            stacked: self.is_stacked(),
            step_direction: self.settings.step_direction(),
            point_width: self.point_width,
            marker_size: self.settings.marker_size(),
            closed: self.settings.closed(),
            rtl: self.x_scale.is_inverted(),
            row_count: self.data.row_count(),
        }
    }

    fn resolve_point_width(&mut self) {
        let vertical = self.kind.is_vertical();
        let extent = if vertical { self.bounds.height } else { self.bounds.width };
        let band_ratio = self.x_scale.category_width_ratio() as f32;
        let band = if band_ratio > 0.0 {
            band_ratio * extent
        } else {
            extent / self.data.row_count().max(1) as f32
        };
        self.point_width = self.settings.point_width().resolve(band);
    }

    /// Run the draw pass for whatever is invalid.
    ///
    /// `states` holds the point states the chart tracks for this series.
    pub fn draw(&mut self, states: Option<&InteractivityState>) -> DrawOutcome {
        profile_function!();
        let consistency = self.tracker.consistency();
        if consistency.is_empty() {
            return DrawOutcome::Skipped;
        }

        if consistency.contains(ConsistencyState::SERIES_SHAPE_MANAGER) {
            self.shapes = ShapesManager::new(self.drawer.shape_configs(&self.settings));
            self.animation = None;
        } else if consistency.intersects(
            ConsistencyState::SERIES_COLOR | ConsistencyState::APPEARANCE | ConsistencyState::HATCH_FILL,
        ) {
            self.shapes.replace_configs(self.drawer.shape_configs(&self.settings));
        }

        if !self.settings.enabled() {
            self.shapes.clear_shapes();
            self.animation = None;
            self.meta.clear();
            self.stats = DrawStats::default();
            self.mark_consistent(ConsistencyState::SERIES_GROUP);
            tracing::debug!(series = %self.name, "series disabled");
            return DrawOutcome::Disabled;
        }

        if let Some(layer) = self.container {
            self.shapes.set_container(layer);
        }
        if consistency.contains(ConsistencyState::SERIES_DATA) {
            self.meta.clear();
        }

        let outcome = if consistency.needs_rebuild() {
            self.resolve_point_width();
            self.rebuild(states);
            self.start_animation();
            DrawOutcome::Rebuilt
        } else {
            if consistency.is_paint_only() {
                self.repaint(states);
            }
            DrawOutcome::Updated
        };

        self.shapes.update_z_index(self.settings.z_index());
        self.mark_consistent(ConsistencyState::SERIES_GROUP);
        outcome
    }

    fn rebuild(&mut self, states: Option<&InteractivityState>) {
        let caps = self.drawer.capabilities();
        let draw_settings = self.draw_settings(caps);
        let series_state = states.map_or(PointState::Normal, InteractivityState::series_state);
        self.animation = None;
        self.shapes.clear_shapes();

        let Self {
            drawer,
            shapes,
            settings,
            data,
            meta,
            x_scale,
            y_scale,
            bounds,
            stack,
            stats,
            ..
        } = self;

        let resolver = Resolver {
            x_scale: &**x_scale,
            y_scale: &**y_scale,
            bounds: *bounds,
            vertical: draw_settings.vertical,
            range: caps.is_range_based(),
            sized: caps.contains(DrawerCapabilities::NEEDS_SIZE_SCALE),
            stack: if draw_settings.stacked { stack.as_slice() } else { &[] },
            settings,
            max_size: max_abs_size(data),
        };

        let mut tracker = SegmentTracker::new();
        let mut missing = 0;
        {
            profile_scope!("draw_points");
            let mut iterator = RowIterator::new(data, meta);
            let mut ctx = DrawContext::new(shapes, draw_settings, series_state);
            drawer.start_drawing(&mut ctx);
            while iterator.advance() {
                let index = iterator.index();
                resolver.resolve(&mut iterator);
                let state = states.map_or(PointState::Normal, |s| s.point_state(index));
                let Some(point) = iterator.meta_mut() else {
                    continue;
                };
                drawer.draw_point(&mut ctx, point, state, &mut tracker);
                if point.missing {
                    missing += 1;
                }
                point.position = resolver.position(point);
            }
            drawer.finish(&mut ctx, &mut tracker);
        }

        *stats = DrawStats {
            drawn: tracker.drawn(),
            segments: tracker.segments(),
            missing,
        };
        tracing::debug!(
            series = %self.name,
            kind = ?self.kind,
            drawn = stats.drawn,
            segments = stats.segments,
            missing = stats.missing,
            "series rebuilt"
        );
    }

    fn repaint(&mut self, states: Option<&InteractivityState>) {
        if self.capabilities().is_discrete() {
            for point in &self.meta {
                if let Some(group) = &point.shapes {
                    let state = states.map_or(PointState::Normal, |s| s.point_state(point.index));
                    self.shapes.update_colors(state, group);
                }
            }
        } else {
            let state = states.map_or(PointState::Normal, InteractivityState::series_state);
            self.shapes.update_all_colors(state);
        }
        tracing::debug!(series = %self.name, "series repainted");
    }

    /// Repaint after the chart changed the state of one point.
    pub fn refresh_point_state(&mut self, index: usize, states: &InteractivityState) {
        if self.capabilities().is_discrete() {
            if let Some(group) = self.meta.get(index).and_then(|m| m.shapes.as_ref()) {
                self.shapes.update_colors(states.point_state(index), group);
            }
        } else {
            self.shapes.update_all_colors(states.series_state());
        }
    }

    fn start_animation(&mut self) {
        let caps = self.capabilities();
        let settings = self.settings.animation();
        if !settings.enabled || self.animation_played || !caps.is_width_based() {
            return;
        }
        self.animation_played = true;
        let mut animation = ColumnAnimation::new(settings, caps.is_range_based());
        let mut target = AnimationTarget {
            shapes: &mut self.shapes,
            meta: &mut self.meta,
            point_width: self.point_width,
            vertical: self.kind.is_vertical(),
        };
        if animation.begin(&mut target) {
            self.animation = Some(animation);
        }
    }

    /// Advance the appearance animation to `now` seconds. Returns true while
    /// it runs.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let mut target = AnimationTarget {
            shapes: &mut self.shapes,
            meta: &mut self.meta,
            point_width: self.point_width,
            vertical: self.kind.is_vertical(),
        };
        let running = animation.cycle(now, &mut target);
        if !running {
            self.animation = None;
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(ColumnAnimation::is_running)
    }

    /// Jump the appearance animation to its final frame.
    pub fn stop_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            let mut target = AnimationTarget {
                shapes: &mut self.shapes,
                meta: &mut self.meta,
                point_width: self.point_width,
                vertical: self.kind.is_vertical(),
            };
            animation.stop(&mut target);
        }
    }

    /// Emit the series' shapes.
    pub fn render(&self, surface: &mut dyn VectorSurface) {
        self.shapes.render(surface);
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Points the drawer drew in the last rebuild.
    pub fn drawn_points(&self) -> usize {
        self.stats.drawn
    }

    /// Continuous segments started in the last rebuild.
    pub fn segments(&self) -> usize {
        self.stats.segments
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    pub fn meta(&self) -> &[PointMeta] {
        &self.meta
    }

    /// Where labels and markers of a point should go.
    pub fn position(&self, index: usize) -> Option<PositionProvider> {
        self.meta.get(index).and_then(|m| m.position)
    }
}

impl Invalidatable for Series {
    const SUPPORTED_CONSISTENCY_STATES: ConsistencyState = ConsistencyState::SERIES_GROUP;
    const SUPPORTED_SIGNALS: Signal = Signal::all();

    fn tracker(&self) -> &ConsistencyTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ConsistencyTracker {
        &mut self.tracker
    }
}

/// Signals a series sends its parent for a set of invalidated bits.
fn signal_for(state: ConsistencyState) -> Signal {
    let mut signal = Signal::empty();
    if state.needs_rebuild() || state.intersects(ConsistencyState::Z_INDEX) {
        signal |= Signal::NEEDS_REDRAW;
    }
    if state.is_paint_only() {
        signal |= Signal::NEEDS_REDRAW_APPEARANCE;
    }
    if state.contains(ConsistencyState::SERIES_STACK) {
        signal |= Signal::NEEDS_RECALCULATION;
    }
    if state.contains(ConsistencyState::DATA) {
        signal |= Signal::DATA_CHANGED;
    }
    signal
}

fn max_abs_size(data: &DataSet) -> f64 {
    (0..data.row_count())
        .filter_map(|row| data.get(row, fields::SIZE).and_then(Value::as_f64))
        .fold(0.0, |max, size| max.max(size.abs()))
}

/// Maps one row to pixel coordinates.
struct Resolver<'a> {
    x_scale: &'a dyn Scale,
    y_scale: &'a dyn Scale,
    bounds: Rect,
    vertical: bool,
    range: bool,
    sized: bool,
    stack: &'a [StackEntry],
    settings: &'a SeriesSettings,
    max_size: f64,
}

impl Resolver<'_> {
    fn category_px(&self, ratio: f64) -> f32 {
        if self.vertical {
            self.bounds.y + ratio as f32 * self.bounds.height
        } else {
            self.bounds.x_at(ratio)
        }
    }

    fn value_px(&self, ratio: f64) -> f32 {
        if self.vertical {
            self.bounds.x_at(ratio)
        } else {
            self.bounds.y_at(ratio)
        }
    }

    fn y_px(&self, value: f64) -> f32 {
        self.value_px(self.y_scale.transform(value, 0.0))
    }

    fn zero_px(&self, value: f64) -> f32 {
        self.value_px(self.y_scale.transform(value, 0.0).clamp(0.0, 1.0))
    }

    fn field(&self, iterator: &RowIterator<'_>, scale: &dyn Scale, name: &str) -> Option<f64> {
        iterator.get(name).and_then(|v| scale.value_of(v))
    }

    fn resolve(&self, iterator: &mut RowIterator<'_>) {
        let index = iterator.index();
        let x = match iterator.get(fields::X) {
            Some(value) => self.x_scale.value_of(value),
            None => Some(index as f64),
        };
        let value = self.field(iterator, self.y_scale, fields::VALUE);
        let high = self.field(iterator, self.y_scale, fields::HIGH);
        let low = self.field(iterator, self.y_scale, fields::LOW);
        let size = iterator.get(fields::SIZE).and_then(Value::as_f64);

        let Some(meta) = iterator.meta_mut() else {
            return;
        };
        *meta = PointMeta::new(index);
        let Some(x) = x else {
            meta.missing = true;
            return;
        };
        meta.x_ratio = self.x_scale.transform(x, 0.5);
        meta.x = self.category_px(meta.x_ratio);

        if self.range {
            let (Some(high), Some(low)) = (high, low) else {
                meta.missing = true;
                return;
            };
            meta.high = self.y_px(high);
            meta.low = self.y_px(low);
            meta.value_ratio = self.y_scale.transform(high, 0.0);
            meta.value = meta.high;
            meta.zero = self.zero_px(0.0);
            return;
        }

        let entry = self.stack.get(index);
        let Some(value) = value else {
            meta.missing = true;
            if let Some(entry) = entry {
                meta.zero = self.zero_px(entry.zero);
                meta.value = meta.zero;
            }
            return;
        };
        let (zero, top) = entry.map_or((0.0, value), |e| (e.zero, e.value));
        meta.value_ratio = self.y_scale.transform(top, 0.0);
        if entry.is_some() {
            meta.value_ratio = meta.value_ratio.clamp(0.0, 1.0);
        }
        meta.value = self.value_px(meta.value_ratio);
        meta.zero = self.zero_px(zero);

        if let Some(entry) = entry {
            meta.zero_missing = entry.zero_missing;
            let edge = |(zero, value): (f64, f64)| StackEdge {
                zero: self.y_px(zero),
                value: self.y_px(value),
            };
            meta.prev_stack = entry.prev.map(edge);
            meta.next_stack = entry.next.map(edge);
        }

        if self.sized {
            let Some(size) = size else {
                meta.missing = true;
                return;
            };
            let ratio = if self.max_size > 0.0 { size.abs() / self.max_size } else { 0.0 };
            let radius = self.settings.bubble_size().radius(ratio as f32);
            meta.size = if size < 0.0 { -radius } else { radius };
        }
    }

    fn position(&self, point: &PointMeta) -> Option<PositionProvider> {
        if point.missing || !is_resolved(point.x) || !is_resolved(point.value) {
            return None;
        }
        Some(if self.vertical {
            PositionProvider {
                x: point.value,
                y: point.x,
            }
        } else {
            PositionProvider {
                x: point.x,
                y: point.value,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scale::{LinearScale, OrdinalScale};
    use crate::style::Paint;
    use ordinate_core::consistency::SignalEvent;
    use std::cell::RefCell;

    fn column_series(values: &[Option<f64>]) -> Series {
        let x = Rc::new(OrdinalScale::new(["a", "b", "c", "d", "e"].iter().take(values.len()).copied()));
        let y = Rc::new(LinearScale::new(0.0, 100.0));
        let mut series = Series::new(DrawerType::Column, DataSet::from_values(values), x, y);
        series.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        series
    }

    #[test]
    fn test_new_series_is_invalid() {
        let series = column_series(&[Some(1.0)]);
        assert!(!series.is_consistent());
        assert!(series.has_invalidation_state(ConsistencyState::SERIES_SHAPE_MANAGER));
    }

    #[test]
    fn test_draw_is_idempotent() {
        let mut series = column_series(&[Some(10.0), Some(20.0)]);
        assert_eq!(series.draw(None), DrawOutcome::Rebuilt);
        assert!(series.is_consistent());
        assert_eq!(series.draw(None), DrawOutcome::Skipped);
        assert_eq!(series.drawn_points(), 2);
    }

    #[test]
    fn test_column_coordinates() {
        let mut series = column_series(&[Some(40.0), Some(80.0)]);
        series.draw(None);
        let meta = series.meta();
        assert_eq!(meta[0].x, 25.0);
        assert_eq!(meta[0].value, 60.0);
        assert_eq!(meta[0].zero, 100.0);
        assert_eq!(series.point_width(), 40.0);
        assert_eq!(series.position(1), Some(PositionProvider { x: 75.0, y: 20.0 }));
    }

    #[test]
    fn test_missing_point_has_no_shapes() {
        let mut series = column_series(&[Some(10.0), None, Some(20.0)]);
        series.draw(None);
        assert_eq!(series.drawn_points(), 2);
        assert_eq!(series.stats().missing, 1);
        assert!(series.meta()[1].shapes.is_none());
        assert_eq!(series.position(1), None);
        assert_eq!(series.shapes().groups().len(), 2);
    }

    #[test]
    fn test_color_change_repaints_in_place() {
        let mut series = column_series(&[Some(10.0)]);
        series.draw(None);
        let state = series.set_color(Color::RED);
        assert!(state.contains(ConsistencyState::SERIES_COLOR));
        assert_eq!(series.draw(None), DrawOutcome::Updated);
        let fill = series.shapes().used_shapes().find(|s| s.name() == "fill").unwrap();
        assert_eq!(fill.fill, Paint::Solid(Color::RED));
    }

    #[test]
    fn test_data_change_signals_parent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut series = column_series(&[Some(10.0)]);
        series.draw(None);
        series.listen_signals(Box::new(move |e: &SignalEvent| sink.borrow_mut().push(e.signals)));
        assert!(series.set_value(0, fields::VALUE, 30.0));
        assert!(!series.set_value(5, fields::VALUE, 30.0));
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].contains(Signal::DATA_CHANGED | Signal::NEEDS_REDRAW));
    }

    #[test]
    fn test_disabled_series_releases_shapes() {
        let mut series = column_series(&[Some(10.0)]);
        series.draw(None);
        series.set_enabled(false);
        assert_eq!(series.draw(None), DrawOutcome::Disabled);
        assert_eq!(series.shapes().used_count(), 0);
        series.set_enabled(true);
        assert_eq!(series.draw(None), DrawOutcome::Rebuilt);
        assert_eq!(series.drawn_points(), 1);
    }

    #[test]
    fn test_appearance_animation_runs_once() {
        let mut series = column_series(&[Some(50.0)]);
        series.set_animation(AnimationSettings::enabled(1.0)).unwrap();
        series.draw(None);
        assert!(series.is_animating());
        assert_eq!(series.position(0), Some(PositionProvider { x: 50.0, y: 100.0 }));
        assert!(series.tick(0.0));
        assert!(!series.tick(2.0));
        assert!(!series.is_animating());
        assert_eq!(series.position(0), Some(PositionProvider { x: 50.0, y: 50.0 }));

        series.set_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        series.draw(None);
        assert!(!series.is_animating());
    }

    #[test]
    fn test_bar_swaps_axes() {
        let x = Rc::new(OrdinalScale::new(["a", "b"]));
        let y = Rc::new(LinearScale::new(0.0, 100.0));
        let data = DataSet::from_values(&[Some(50.0), Some(100.0)]);
        let mut series = Series::new(DrawerType::Bar, data, x, y);
        series.set_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        series.draw(None);
        assert_eq!(series.position(0), Some(PositionProvider { x: 100.0, y: 25.0 }));
        assert_eq!(series.point_width(), 40.0);
    }

    #[test]
    fn test_bubble_radius_keeps_sign() {
        let x = Rc::new(LinearScale::new(0.0, 10.0));
        let y = Rc::new(LinearScale::new(0.0, 10.0));
        let mut data = DataSet::new(&[fields::X, fields::VALUE, fields::SIZE]);
        data.push_row([Value::Number(1.0), Value::Number(5.0), Value::Number(10.0)]);
        data.push_row([Value::Number(2.0), Value::Number(5.0), Value::Number(-5.0)]);
        data.push_row([Value::Number(3.0), Value::Number(5.0), Value::Missing]);
        let mut series = Series::new(DrawerType::Bubble, data, x, y);
        series.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        series.draw(None);
        let meta = series.meta();
        assert_eq!(meta[0].size, 20.0);
        assert_eq!(meta[1].size, -12.5);
        assert!(meta[2].missing);
        assert_eq!(series.drawn_points(), 2);
    }

    #[test]
    fn test_signal_mapping() {
        assert_eq!(signal_for(ConsistencyState::SERIES_COLOR), Signal::NEEDS_REDRAW_APPEARANCE);
        assert_eq!(
            signal_for(ConsistencyState::SERIES_STACK | ConsistencyState::SERIES_POINTS),
            Signal::NEEDS_REDRAW | Signal::NEEDS_RECALCULATION
        );
        assert!(signal_for(ConsistencyState::empty()).is_empty());
    }
}
