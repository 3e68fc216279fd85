//! Charts: the parents of series and the owners of point state.

use std::rc::Rc;

use ordinate_core::Config;
use ordinate_core::alloc::HashMap;
use ordinate_core::consistency::{ConsistencyState, ConsistencyTracker, Invalidatable, ListenerKey, Signal, SignalInbox};
use ordinate_core::profiling::profile_function;

use super::data::{NodeId, TreeData, Value};
use super::point::{Point, TreeNodePoint};
use super::rect::Rect;
use super::scale::Scale;
use super::series::{DrawOutcome, Series, SeriesId, StackEntry};
use super::shapes::{LayerId, VectorSurface};
use super::state::{InteractivityState, PointState, PointStates};

#[derive(Debug)]
struct SeriesEntry {
    series: Series,
    inbox: SignalInbox,
    listener: ListenerKey,
}

/// Running totals of one stacked row.
#[derive(Debug, Clone, Copy, Default)]
struct StackTotals {
    positive: f64,
    negative: f64,
    /// The last series added to this row is missing it.
    missing: bool,
    prev: NeighbourTotals,
    next: NeighbourTotals,
}

impl StackTotals {
    fn total(&mut self, negative: bool) -> &mut f64 {
        if negative { &mut self.negative } else { &mut self.positive }
    }
}

/// Totals of the series below that are also present at an adjacent row.
#[derive(Debug, Clone, Copy, Default)]
struct NeighbourTotals {
    positive: f64,
    negative: f64,
    /// Some series below is missing the adjacent row.
    missing: bool,
}

impl NeighbourTotals {
    fn edge(&self, negative: bool, value: f64) -> Option<(f64, f64)> {
        if !self.missing {
            return None;
        }
        let zero = if negative { self.negative } else { self.positive };
        Some((zero, zero + value))
    }

    fn add(&mut self, neighbour_missing: bool, negative: bool, value: f64) {
        if neighbour_missing {
            self.missing = true;
        } else if negative {
            self.negative += value;
        } else {
            self.positive += value;
        }
    }
}

/// A cartesian chart.
///
/// The chart listens to every series it owns through a [`SignalInbox`] and
/// turns their signals into its own consistency bits. [`draw`](Self::draw)
/// walks whatever is invalid: bounds, stacking baselines, then each series.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use ordinate_geometry::chart::*;
///
/// let mut chart = Chart::new(Rect::new(0.0, 0.0, 300.0, 200.0));
/// let x = Rc::new(OrdinalScale::new(["a", "b"]));
/// let y = Rc::new(LinearScale::new(0.0, 10.0));
/// let id = chart.add_series(Series::new(DrawerType::Line, DataSet::from_values(&[Some(2.0), Some(8.0)]), x, y));
///
/// chart.draw();
/// chart.hover(id, 1);
/// assert!(chart.point(id, 1).hovered());
/// ```
#[derive(Debug)]
pub struct Chart {
    tracker: ConsistencyTracker,
    config: Config,
    bounds: Rect,
    layer: LayerId,
    series: Vec<SeriesEntry>,
    states: HashMap<SeriesId, InteractivityState>,
}

impl Chart {
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, Config::default())
    }

    pub fn with_config(bounds: Rect, config: Config) -> Self {
        Self {
            tracker: ConsistencyTracker::new(),
            config,
            bounds,
            layer: LayerId::next(),
            series: Vec::new(),
            states: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.invalidate(ConsistencyState::BOUNDS, Signal::BOUNDS_CHANGED);
        }
    }

    /// Layer every series' shapes attach to.
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    // =========================================================================
    // Series
    // =========================================================================

    /// Take ownership of a series and start listening to it.
    pub fn add_series(&mut self, mut series: Series) -> SeriesId {
        let validation = self.config.validation;
        series.update_settings(|s| s.set_validation(validation));
        series.set_container(self.layer);
        series.set_bounds(self.bounds);

        let inbox = SignalInbox::new();
        let listener = series.listen_signals(inbox.listener());
        let id = series.id();
        tracing::debug!(series = id.raw(), kind = ?series.kind(), "series added");
        self.series.push(SeriesEntry {
            series,
            inbox,
            listener,
        });
        self.invalidate(
            ConsistencyState::SERIES_POINTS | ConsistencyState::SERIES_STACK,
            Signal::NEEDS_REDRAW,
        );
        id
    }

    /// Remove a series, its listener and its point states.
    pub fn remove_series(&mut self, id: SeriesId) -> Option<Series> {
        let position = self.series.iter().position(|e| e.series.id() == id)?;
        let SeriesEntry {
            mut series, listener, ..
        } = self.series.remove(position);
        series.unlisten_signals(listener);
        self.states.remove(&id);
        self.invalidate(
            ConsistencyState::SERIES_POINTS | ConsistencyState::SERIES_STACK,
            Signal::NEEDS_REDRAW,
        );
        tracing::debug!(series = id.raw(), "series removed");
        Some(series)
    }

    pub fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|e| e.series.id() == id).map(|e| &e.series)
    }

    /// Mutable access to a series. Changes reach the chart through signals.
    pub fn series_mut(&mut self, id: SeriesId) -> Option<&mut Series> {
        self.series.iter_mut().find(|e| e.series.id() == id).map(|e| &mut e.series)
    }

    pub fn series_ids(&self) -> impl Iterator<Item = SeriesId> + '_ {
        self.series.iter().map(|e| e.series.id())
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn collect_signals(&mut self) {
        let mut state = ConsistencyState::empty();
        for entry in &self.series {
            if entry.inbox.is_pending() {
                state |= entry.inbox.take().to_parent_state();
            }
        }
        if !state.is_empty() {
            self.invalidate(state, Signal::NEEDS_REDRAW);
        }
    }

    /// Draw everything that is invalid. Returns the number of series that did
    /// any work.
    pub fn draw(&mut self) -> usize {
        profile_function!();
        self.collect_signals();
        let consistency = self.tracker.consistency();

        if consistency.contains(ConsistencyState::BOUNDS) {
            for entry in &mut self.series {
                entry.series.set_bounds(self.bounds);
            }
        }
        if consistency.contains(ConsistencyState::SERIES_STACK) {
            self.compute_stacks();
        }

        let mut drawn = 0;
        for entry in &mut self.series {
            let id = entry.series.id();
            if let Some(states) = self.states.get_mut(&id) {
                states.retain_rows(entry.series.row_count());
            }
            let outcome = entry.series.draw(self.states.get(&id));
            if outcome != DrawOutcome::Skipped {
                drawn += 1;
            }
            // Signals raised by the pass itself.
            entry.inbox.take();
        }

        self.mark_consistent(ConsistencyState::all());
        tracing::debug!(series = drawn, "chart drawn");
        drawn
    }

    /// Recompute stacking baselines. Series stack with the stacked series
    /// added before them that share their y scale; positive and negative
    /// values stack separately.
    fn compute_stacks(&mut self) {
        let mut groups: Vec<(Rc<dyn Scale>, Vec<usize>)> = Vec::new();
        for (position, entry) in self.series.iter_mut().enumerate() {
            if !entry.series.is_stacked() {
                entry.series.set_stack(Vec::new());
                continue;
            }
            let scale = entry.series.y_scale();
            match groups.iter_mut().find(|(s, _)| Rc::ptr_eq(s, scale)) {
                Some((_, members)) => members.push(position),
                None => groups.push((Rc::clone(scale), vec![position])),
            }
        }

        for (_, members) in &groups {
            let rows = members
                .iter()
                .map(|p| self.series[*p].series.row_count())
                .max()
                .unwrap_or(0);
            let mut totals = vec![StackTotals::default(); rows];

            for position in members {
                let series = &mut self.series[*position].series;
                let values = series.stack_values();
                let stack = values
                    .iter()
                    .enumerate()
                    .map(|(row, value)| {
                        let totals = &mut totals[row];
                        let zero_missing = totals.missing;
                        let Some(value) = *value else {
                            totals.missing = true;
                            return StackEntry {
                                zero: totals.positive,
                                value: totals.positive,
                                zero_missing,
                                prev: None,
                                next: None,
                            };
                        };
                        totals.missing = false;
                        let negative = value < 0.0;
                        let zero = *totals.total(negative);
                        *totals.total(negative) += value;
                        let entry = StackEntry {
                            zero,
                            value: zero + value,
                            zero_missing,
                            prev: totals.prev.edge(negative, value),
                            next: totals.next.edge(negative, value),
                        };
                        if row > 0 {
                            totals.prev.add(values[row - 1].is_none(), negative, value);
                        }
                        if let Some(neighbour) = values.get(row + 1) {
                            totals.next.add(neighbour.is_none(), negative, value);
                        }
                        entry
                    })
                    .collect();
                series.set_stack(stack);
            }
        }
        tracing::debug!(groups = groups.len(), "stacks computed");
    }

    /// Emit every series' shapes in z order.
    pub fn render(&self, surface: &mut dyn VectorSurface) {
        let mut order: Vec<&Series> = self.series.iter().map(|e| &e.series).collect();
        order.sort_by(|a, b| a.settings().z_index().total_cmp(&b.settings().z_index()));
        for series in order {
            series.render(surface);
        }
    }

    /// Advance running animations to `now` seconds. Returns true while any
    /// runs.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut running = false;
        for entry in &mut self.series {
            running |= entry.series.tick(now);
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.series.iter().any(|e| e.series.is_animating())
    }

    // =========================================================================
    // Point state
    // =========================================================================

    fn change_point_state(&mut self, id: SeriesId, index: usize, state: PointState, on: bool) -> bool {
        let Some(entry) = self.series.iter_mut().find(|e| e.series.id() == id) else {
            return false;
        };
        if index >= entry.series.row_count() {
            return false;
        }
        let states = self.states.entry(id).or_default();
        let changed = if on { states.add(index, state) } else { states.remove(index, state) };
        if changed {
            entry.series.refresh_point_state(index, states);
            tracing::trace!(series = id.raw(), index, ?state, on, "point state changed");
        }
        changed
    }

    fn clear_point_state(&mut self, id: SeriesId, state: PointState) -> bool {
        let Some(entry) = self.series.iter_mut().find(|e| e.series.id() == id) else {
            return false;
        };
        let Some(states) = self.states.get_mut(&id) else {
            return false;
        };
        let changed = states.remove_all(state);
        for index in &changed {
            entry.series.refresh_point_state(*index, states);
        }
        !changed.is_empty()
    }

    /// Hover a point. Returns true if its state changed.
    pub fn hover(&mut self, id: SeriesId, index: usize) -> bool {
        self.change_point_state(id, index, PointState::Hover, true)
    }

    /// Unhover one point, or every point of the series.
    pub fn unhover(&mut self, id: SeriesId, index: Option<usize>) -> bool {
        match index {
            Some(index) => self.change_point_state(id, index, PointState::Hover, false),
            None => self.clear_point_state(id, PointState::Hover),
        }
    }

    /// Select a point. Returns true if its state changed.
    pub fn select(&mut self, id: SeriesId, index: usize) -> bool {
        self.change_point_state(id, index, PointState::Select, true)
    }

    /// Unselect one point, or every point of the series.
    pub fn unselect(&mut self, id: SeriesId, index: Option<usize>) -> bool {
        match index {
            Some(index) => self.change_point_state(id, index, PointState::Select, false),
            None => self.clear_point_state(id, PointState::Select),
        }
    }

    pub fn has_point_state(&self, id: SeriesId, state: PointState, index: usize) -> bool {
        match self.states.get(&id) {
            Some(states) => states.has_point_state(state, index),
            None => state == PointState::Normal,
        }
    }

    /// View of one row of a series.
    pub fn point(&mut self, id: SeriesId, index: usize) -> Point<'_> {
        Point::new(self, id, index)
    }
}

impl Invalidatable for Chart {
    const SUPPORTED_CONSISTENCY_STATES: ConsistencyState = ConsistencyState::VISUAL_GROUP
        .union(ConsistencyState::DATA)
        .union(ConsistencyState::SERIES_POINTS)
        .union(ConsistencyState::SERIES_LABELS)
        .union(ConsistencyState::SERIES_STACK);
    const SUPPORTED_SIGNALS: Signal = Signal::NEEDS_REDRAW.union(Signal::BOUNDS_CHANGED);

    fn tracker(&self) -> &ConsistencyTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ConsistencyTracker {
        &mut self.tracker
    }
}

/// A chart over hierarchical data. Point state is keyed by each node's
/// depth-first position and follows the nodes when the tree changes shape.
#[derive(Debug, Default)]
pub struct TreeChart {
    tracker: ConsistencyTracker,
    data: TreeData,
    states: InteractivityState,
}

impl TreeChart {
    pub fn new(data: TreeData) -> Self {
        Self {
            tracker: ConsistencyTracker::new(),
            data,
            states: InteractivityState::new(),
        }
    }

    pub fn data(&self) -> &TreeData {
        &self.data
    }

    /// Run a structural change, keeping point states on their nodes.
    fn restructure<T>(&mut self, f: impl FnOnce(&mut TreeData) -> T) -> T {
        let by_node: Vec<(NodeId, PointStates)> = self
            .states
            .iter()
            .filter_map(|(index, flags)| self.data.node_at(index).map(|node| (node, flags)))
            .collect();
        let result = f(&mut self.data);
        self.states = InteractivityState::new();
        for (node, flags) in by_node {
            if let Some(index) = self.data.linear_index(node) {
                self.states.set_flags(index, flags);
            }
        }
        self.invalidate(ConsistencyState::DATA, Signal::DATA_CHANGED | Signal::NEEDS_REDRAW);
        result
    }

    pub fn add_root(&mut self, fields: &[(&str, Value)]) -> NodeId {
        self.restructure(|data| data.add_root(fields))
    }

    pub fn add_child(&mut self, parent: NodeId, fields: &[(&str, Value)]) -> Option<NodeId> {
        self.restructure(|data| data.add_child(parent, fields))
    }

    /// Remove a node and its subtree along with their point states.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.restructure(|data| data.remove(node))
    }

    /// Write a node field. Returns false if the node does not exist.
    pub fn set_value(&mut self, node: NodeId, field: &str, value: Value) -> bool {
        let written = self.data.set(node, field, value);
        if written {
            self.invalidate(ConsistencyState::DATA, Signal::DATA_CHANGED | Signal::NEEDS_REDRAW);
        }
        written
    }

    pub(crate) fn change_node_state(&mut self, index: usize, state: PointState, on: bool) -> bool {
        if index >= self.data.len() {
            return false;
        }
        let changed = if on {
            self.states.add(index, state)
        } else {
            self.states.remove(index, state)
        };
        if changed {
            self.invalidate(ConsistencyState::APPEARANCE, Signal::NEEDS_REDRAW);
        }
        changed
    }

    pub fn hover(&mut self, node: NodeId, hovered: bool) -> bool {
        self.data
            .linear_index(node)
            .is_some_and(|index| self.change_node_state(index, PointState::Hover, hovered))
    }

    pub fn select(&mut self, node: NodeId, selected: bool) -> bool {
        self.data
            .linear_index(node)
            .is_some_and(|index| self.change_node_state(index, PointState::Select, selected))
    }

    pub fn has_point_state(&self, state: PointState, index: usize) -> bool {
        self.states.has_point_state(state, index)
    }

    /// View of one node.
    pub fn node_point(&mut self, node: NodeId) -> TreeNodePoint<'_> {
        TreeNodePoint::new(self, node)
    }

    /// Mark the chart drawn.
    pub fn draw(&mut self) -> bool {
        let dirty = !self.is_consistent();
        self.mark_consistent(ConsistencyState::all());
        dirty
    }
}

impl Invalidatable for TreeChart {
    const SUPPORTED_CONSISTENCY_STATES: ConsistencyState = ConsistencyState::VISUAL_GROUP.union(ConsistencyState::DATA);
    const SUPPORTED_SIGNALS: Signal = Signal::NEEDS_REDRAW.union(Signal::DATA_CHANGED);

    fn tracker(&self) -> &ConsistencyTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ConsistencyTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::capabilities::DrawerType;
    use crate::chart::data::{DataSet, fields};
    use crate::chart::scale::{LinearScale, OrdinalScale};

    fn scales() -> (Rc<OrdinalScale>, Rc<LinearScale>) {
        (
            Rc::new(OrdinalScale::new(["a", "b", "c"])),
            Rc::new(LinearScale::new(0.0, 100.0)),
        )
    }

    fn chart_with(kind: DrawerType, values: &[Option<f64>]) -> (Chart, SeriesId) {
        let (x, y) = scales();
        let mut chart = Chart::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        let id = chart.add_series(Series::new(kind, DataSet::from_values(values), x, y));
        (chart, id)
    }

    #[test]
    fn test_draw_then_skip() {
        let (mut chart, _) = chart_with(DrawerType::Column, &[Some(10.0), Some(20.0)]);
        assert_eq!(chart.draw(), 1);
        assert!(chart.is_consistent());
        assert_eq!(chart.draw(), 0);
    }

    #[test]
    fn test_series_change_reaches_chart() {
        let (mut chart, id) = chart_with(DrawerType::Line, &[Some(10.0), Some(20.0)]);
        chart.draw();
        chart.series_mut(id).unwrap().set_value(1, fields::VALUE, 50.0);
        assert_eq!(chart.draw(), 1);
        assert_eq!(chart.series(id).unwrap().position(1).unwrap().y, 50.0);
    }

    #[test]
    fn test_bounds_propagate() {
        let (mut chart, id) = chart_with(DrawerType::Column, &[Some(10.0)]);
        chart.draw();
        chart.set_bounds(Rect::new(0.0, 0.0, 600.0, 100.0));
        chart.draw();
        assert_eq!(chart.series(id).unwrap().bounds().width, 600.0);
    }

    #[test]
    fn test_remove_series_unlistens() {
        let (mut chart, id) = chart_with(DrawerType::Column, &[Some(10.0)]);
        chart.draw();
        let series = chart.remove_series(id).unwrap();
        assert_eq!(series.tracker().listener_count(), 0);
        assert!(chart.series(id).is_none());
        assert!(chart.remove_series(id).is_none());
    }

    #[test]
    fn test_hover_and_select() {
        let (mut chart, id) = chart_with(DrawerType::Column, &[Some(10.0), Some(20.0)]);
        chart.draw();
        assert!(chart.hover(id, 1));
        assert!(!chart.hover(id, 1));
        assert!(!chart.hover(id, 7));
        assert!(chart.has_point_state(id, PointState::Hover, 1));
        assert!(chart.select(id, 0));
        assert!(chart.unhover(id, None));
        assert!(!chart.has_point_state(id, PointState::Hover, 1));
        assert!(chart.has_point_state(id, PointState::Select, 0));
        assert!(chart.unselect(id, Some(0)));
        assert!(chart.has_point_state(id, PointState::Normal, 0));
    }

    #[test]
    fn test_stacked_baselines() {
        let (x, y) = scales();
        let mut chart = Chart::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        let y: Rc<dyn Scale> = y;
        let mut lower = Series::new(DrawerType::Area, DataSet::from_values(&[Some(10.0), None, Some(30.0)]), x.clone(), Rc::clone(&y));
        lower.set_stacked(true);
        let mut upper = Series::new(DrawerType::Area, DataSet::from_values(&[Some(5.0), Some(5.0), Some(5.0)]), x, y);
        upper.set_stacked(true);
        let lower = chart.add_series(lower);
        let upper = chart.add_series(upper);
        chart.draw();

        let stack = chart.series(upper).unwrap().stack();
        assert_eq!(stack[0].zero, 10.0);
        assert_eq!(stack[0].value, 15.0);
        assert_eq!(stack[1].zero, 0.0);
        assert!(stack[1].zero_missing);
        assert!(!stack[2].zero_missing);
        assert_eq!(stack[0].prev, None);
        assert_eq!(stack[0].next, Some((0.0, 5.0)));
        assert_eq!(stack[2].prev, Some((0.0, 5.0)));
        assert_eq!(stack[2].next, None);
        let lower_stack = chart.series(lower).unwrap().stack();
        assert!(lower_stack.iter().all(|e| e.prev.is_none() && e.next.is_none()));
        assert_eq!(chart.series(upper).unwrap().meta()[0].value, 85.0);
    }

    fn stacked_pair(lower: &[Option<f64>], upper: &[Option<f64>]) -> (Chart, SeriesId, SeriesId) {
        let (x, y) = scales();
        let y: Rc<dyn Scale> = y;
        let mut chart = Chart::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        let mut ids = Vec::new();
        for values in [lower, upper] {
            let mut series = Series::new(DrawerType::Column, DataSet::from_values(values), x.clone(), Rc::clone(&y));
            series.set_stacked(true);
            ids.push(chart.add_series(series));
        }
        chart.draw();
        (chart, ids[0], ids[1])
    }

    #[test]
    fn test_negative_stack_edges() {
        let (chart, _, upper) = stacked_pair(&[Some(-10.0), None, Some(-30.0)], &[Some(-5.0), Some(5.0), Some(-5.0)]);
        let stack = chart.series(upper).unwrap().stack();
        assert_eq!(stack[0].zero, -10.0);
        assert_eq!(stack[0].value, -15.0);
        assert_eq!(stack[0].next, Some((0.0, -5.0)));
        assert_eq!(stack[1].zero, 0.0);
        assert_eq!(stack[1].value, 5.0);
        assert_eq!(stack[2].prev, Some((0.0, -5.0)));
    }

    #[test]
    fn test_stacked_top_clamps_to_plot() {
        let (chart, _, upper) = stacked_pair(&[Some(80.0), Some(10.0), Some(10.0)], &[Some(40.0), Some(10.0), Some(10.0)]);
        let meta = &chart.series(upper).unwrap().meta()[0];
        assert_eq!(meta.value_ratio, 1.0);
        assert_eq!(meta.value, 0.0);
        assert_eq!(meta.zero, 20.0);
    }

    #[test]
    fn test_unstacked_series_have_no_stack() {
        let (mut chart, id) = chart_with(DrawerType::Column, &[Some(10.0)]);
        chart.draw();
        assert!(chart.series(id).unwrap().stack().is_empty());
    }

    #[test]
    fn test_tree_states_follow_nodes() {
        let mut tree = TreeChart::default();
        let root = tree.add_root(&[]);
        let a = tree.add_child(root, &[]).unwrap();
        let b = tree.add_child(root, &[]).unwrap();
        assert!(tree.select(b, true));
        assert!(tree.has_point_state(PointState::Select, 2));

        tree.remove(a);
        assert!(tree.has_point_state(PointState::Select, 1));
        assert!(tree.draw());
        assert!(!tree.draw());
    }
}
