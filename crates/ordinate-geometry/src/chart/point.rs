//! Point views.
//!
//! A [`Point`] addresses one row of a series, a [`TreeNodePoint`] one node of
//! a tree chart. Both are built per access and own nothing: reads and writes
//! go to the underlying data, state changes go through the chart.

use super::data::{NodeId, PointMeta, PositionProvider, Value};
use super::series::SeriesId;
use super::state::PointState;
use super::types::{Chart, TreeChart};

/// Row `index` of a series.
#[derive(Debug)]
pub struct Point<'a> {
    chart: &'a mut Chart,
    series: SeriesId,
    index: usize,
}

impl<'a> Point<'a> {
    pub(crate) fn new(chart: &'a mut Chart, series: SeriesId, index: usize) -> Self {
        Self { chart, series, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn series_id(&self) -> SeriesId {
        self.series
    }

    /// Returns true while the series exists and still has this row.
    pub fn exists(&self) -> bool {
        self.chart
            .series(self.series)
            .is_some_and(|s| self.index < s.row_count())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.chart.series(self.series)?.get(self.index, field)
    }

    /// Write a field of the row. Returns false if the point no longer exists.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> bool {
        let index = self.index;
        self.chart
            .series_mut(self.series)
            .is_some_and(|s| s.set_value(index, field, value))
    }

    pub fn hovered(&self) -> bool {
        self.chart.has_point_state(self.series, PointState::Hover, self.index)
    }

    pub fn selected(&self) -> bool {
        self.chart.has_point_state(self.series, PointState::Select, self.index)
    }

    /// Hover or unhover the point. Returns true if its state changed.
    pub fn hover(&mut self, hovered: bool) -> bool {
        if hovered {
            self.chart.hover(self.series, self.index)
        } else {
            self.chart.unhover(self.series, Some(self.index))
        }
    }

    /// Select or unselect the point. Returns true if its state changed.
    pub fn select(&mut self, selected: bool) -> bool {
        if selected {
            self.chart.select(self.series, self.index)
        } else {
            self.chart.unselect(self.series, Some(self.index))
        }
    }

    /// Metadata of the last draw pass.
    pub fn meta(&self) -> Option<&PointMeta> {
        self.chart.series(self.series)?.meta().get(self.index)
    }

    pub fn position(&self) -> Option<PositionProvider> {
        self.chart.series(self.series)?.position(self.index)
    }
}

/// One node of a [`TreeChart`]. The node's depth-first position is cached
/// when the view is built.
#[derive(Debug)]
pub struct TreeNodePoint<'a> {
    chart: &'a mut TreeChart,
    node: NodeId,
    index: Option<usize>,
}

impl<'a> TreeNodePoint<'a> {
    pub(crate) fn new(chart: &'a mut TreeChart, node: NodeId) -> Self {
        let index = chart.data().linear_index(node);
        Self { chart, node, index }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Depth-first position of the node, `None` if it was removed.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn exists(&self) -> bool {
        self.chart.data().contains(self.node)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.chart.data().get(self.node, field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> bool {
        self.chart.set_value(self.node, field, value.into())
    }

    pub fn hovered(&self) -> bool {
        self.index
            .is_some_and(|index| self.chart.has_point_state(PointState::Hover, index))
    }

    pub fn selected(&self) -> bool {
        self.index
            .is_some_and(|index| self.chart.has_point_state(PointState::Select, index))
    }

    pub fn hover(&mut self, hovered: bool) -> bool {
        match self.index {
            Some(index) => self.chart.change_node_state(index, PointState::Hover, hovered),
            None => false,
        }
    }

    pub fn select(&mut self, selected: bool) -> bool {
        match self.index {
            Some(index) => self.chart.change_node_state(index, PointState::Select, selected),
            None => false,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        self.chart.data().children(self.node)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::chart::capabilities::DrawerType;
    use crate::chart::data::{DataSet, TreeData, fields};
    use crate::chart::rect::Rect;
    use crate::chart::scale::{LinearScale, OrdinalScale};
    use crate::chart::series::Series;

    fn chart() -> (Chart, SeriesId) {
        let mut chart = Chart::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let x = Rc::new(OrdinalScale::new(["a", "b"]));
        let y = Rc::new(LinearScale::new(0.0, 10.0));
        let data = DataSet::from_values(&[Some(1.0), Some(2.0)]);
        let id = chart.add_series(Series::new(DrawerType::Column, data, x, y));
        chart.draw();
        (chart, id)
    }

    #[test]
    fn test_point_reads_and_writes_row() {
        let (mut chart, id) = chart();
        let mut point = chart.point(id, 1);
        assert!(point.exists());
        assert_eq!(point.get(fields::VALUE), Some(&Value::Number(2.0)));
        assert!(point.set(fields::VALUE, 4.0));
        assert_eq!(point.get(fields::VALUE), Some(&Value::Number(4.0)));
        assert!(point.position().is_some());
    }

    #[test]
    fn test_stale_point_fails_gracefully() {
        let (mut chart, id) = chart();
        chart.series_mut(id).unwrap().remove_row(1);
        let mut point = chart.point(id, 1);
        assert!(!point.exists());
        assert_eq!(point.get(fields::VALUE), None);
        assert!(!point.set(fields::VALUE, 1.0));
        assert!(!point.hover(true));
    }

    #[test]
    fn test_state_round_trips_through_chart() {
        let (mut chart, id) = chart();
        let mut point = chart.point(id, 0);
        assert!(point.hover(true));
        assert!(point.hovered());
        assert!(!point.selected());
        assert!(point.select(true));
        assert!(point.selected());
        drop(point);
        assert!(chart.has_point_state(id, PointState::Select, 0));
        assert!(chart.point(id, 0).hover(false));
        assert!(!chart.has_point_state(id, PointState::Hover, 0));
    }

    #[test]
    fn test_tree_node_point() {
        let mut data = TreeData::new();
        let root = data.add_root(&[("value", 1.0.into())]);
        let leaf = data.add_child(root, &[("value", 2.0.into())]).unwrap();
        let mut tree = TreeChart::new(data);

        let mut point = tree.node_point(leaf);
        assert_eq!(point.index(), Some(1));
        assert!(point.exists());
        assert_eq!(point.get("value"), Some(&Value::Number(2.0)));
        assert!(point.select(true));
        assert!(point.selected());
        assert!(point.set("value", 3.0));
        assert!(tree.has_point_state(PointState::Select, 1));
        assert_eq!(tree.node_point(root).children(), &[leaf]);

        tree.remove(leaf);
        let point = tree.node_point(leaf);
        assert!(!point.exists());
        assert!(!point.selected());
    }
}
