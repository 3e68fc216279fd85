//! The data collaborator: row storage, per-pass point metadata and the
//! iterator series drive their draw pass with.

use ordinate_core::alloc::HashMap;

use super::shapes::ShapesGroup;

/// Well-known field names.
pub mod fields {
    pub const X: &str = "x";
    pub const VALUE: &str = "value";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const SIZE: &str = "size";
}

/// A raw field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Value {
    /// The value as a finite number. `NaN` and infinities count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the value cannot be plotted as a number.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing) || matches!(self, Value::Number(n) if !n.is_finite())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

/// Tabular data: named columns, one `Vec<Value>` per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create an empty data set with the given columns.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            rows: Vec::new(),
        }
    }

    /// Single `value` column; `None` entries are missing.
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let mut data = Self::new(&[fields::VALUE]);
        for value in values {
            data.push_row([Value::from(*value)]);
        }
        data
    }

    /// `x` and `value` columns.
    pub fn from_xy(points: &[(f64, Option<f64>)]) -> Self {
        let mut data = Self::new(&[fields::X, fields::VALUE]);
        for (x, value) in points {
            data.push_row([Value::Number(*x), Value::from(*value)]);
        }
        data
    }

    /// `high` and `low` columns.
    pub fn from_ranges(ranges: &[Option<(f64, f64)>]) -> Self {
        let mut data = Self::new(&[fields::HIGH, fields::LOW]);
        for range in ranges {
            let (high, low) = match range {
                Some((h, l)) => (Value::Number(*h), Value::Number(*l)),
                None => (Value::Missing, Value::Missing),
            };
            data.push_row([high, low]);
        }
        data
    }

    /// Append a row. Missing trailing cells are filled with [`Value::Missing`].
    pub fn push_row(&mut self, values: impl IntoIterator<Item = Value>) -> usize {
        let mut row: Vec<Value> = values.into_iter().take(self.columns.len()).collect();
        row.resize(self.columns.len(), Value::Missing);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Remove a row. Returns false if it does not exist.
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row < self.rows.len() {
            self.rows.remove(row);
            true
        } else {
            false
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn column(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == field)
    }

    /// Read a field. `None` when the row or column does not exist.
    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        let column = self.column(field)?;
        self.rows.get(row).map(|r| &r[column])
    }

    /// Write a field, adding the column if needed. Returns false if the row
    /// does not exist.
    pub fn set(&mut self, row: usize, field: &str, value: Value) -> bool {
        if row >= self.rows.len() {
            return false;
        }
        let column = match self.column(field) {
            Some(column) => column,
            None => {
                self.columns.push(field.to_owned());
                for r in &mut self.rows {
                    r.push(Value::Missing);
                }
                self.columns.len() - 1
            }
        };
        self.rows[row][column] = value;
        true
    }
}

/// This point stacked only on the series below that continue into the
/// adjacent row. Set when some series below is missing that row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackEdge {
    pub zero: f32,
    pub value: f32,
}

/// Anchor that labels and markers follow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionProvider {
    pub x: f32,
    pub y: f32,
}

/// Transient per-row values written during coordinate resolution and read by
/// drawers and animation. Pixel fields are `NaN` until resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMeta {
    pub index: usize,
    pub missing: bool,
    pub x: f32,
    pub value: f32,
    pub zero: f32,
    pub high: f32,
    pub low: f32,
    pub x_ratio: f64,
    pub value_ratio: f64,
    /// Signed bubble radius in pixels.
    pub size: f32,
    /// The baseline under this point comes from a missing row of a series below.
    pub zero_missing: bool,
    pub prev_stack: Option<StackEdge>,
    pub next_stack: Option<StackEdge>,
    pub shapes: Option<ShapesGroup>,
    pub position: Option<PositionProvider>,
}

impl PointMeta {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            missing: false,
            x: f32::NAN,
            value: f32::NAN,
            zero: f32::NAN,
            high: f32::NAN,
            low: f32::NAN,
            x_ratio: f64::NAN,
            value_ratio: f64::NAN,
            size: f32::NAN,
            zero_missing: false,
            prev_stack: None,
            next_stack: None,
            shapes: None,
            position: None,
        }
    }
}

/// Forward iterator over rows with a read/write metadata slot per row.
pub trait DataIterator {
    /// Rewind before the first row.
    fn reset(&mut self);

    /// Move to the next row. Returns false past the last row.
    fn advance(&mut self) -> bool;

    /// Index of the current row.
    fn index(&self) -> usize;

    fn row_count(&self) -> usize;

    /// Read a field of the current row.
    fn get(&self, field: &str) -> Option<&Value>;

    /// Metadata of the current row, `None` before the first or past the last row.
    fn meta(&self) -> Option<&PointMeta>;

    fn meta_mut(&mut self) -> Option<&mut PointMeta>;
}

/// [`DataIterator`] over a [`DataSet`] and a series' metadata cache.
#[derive(Debug)]
pub struct RowIterator<'a> {
    data: &'a DataSet,
    cache: &'a mut Vec<PointMeta>,
    current: Option<usize>,
}

impl<'a> RowIterator<'a> {
    /// Create an iterator. The cache is grown to the row count.
    pub fn new(data: &'a DataSet, cache: &'a mut Vec<PointMeta>) -> Self {
        let rows = data.row_count();
        if cache.len() < rows {
            let start = cache.len();
            cache.extend((start..rows).map(PointMeta::new));
        }
        cache.truncate(rows);
        Self {
            data,
            cache,
            current: None,
        }
    }

    fn current_index(&self) -> usize {
        self.current.unwrap_or(0)
    }
}

impl DataIterator for RowIterator<'_> {
    fn reset(&mut self) {
        self.current = None;
    }

    fn advance(&mut self) -> bool {
        let next = self.current.map_or(0, |i| i + 1);
        if next < self.data.row_count() {
            self.current = Some(next);
            true
        } else {
            self.current = Some(self.data.row_count());
            false
        }
    }

    fn index(&self) -> usize {
        self.current_index()
    }

    fn row_count(&self) -> usize {
        self.data.row_count()
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(self.current_index(), field)
    }

    fn meta(&self) -> Option<&PointMeta> {
        self.cache.get(self.current?)
    }

    fn meta_mut(&mut self) -> Option<&mut PointMeta> {
        self.cache.get_mut(self.current?)
    }
}

/// Handle to a node of a [`TreeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct TreeNode {
    fields: HashMap<String, Value>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Hierarchical data stored in an arena. Removed nodes leave a hole so stale
/// [`NodeId`]s resolve to nothing instead of another node.
#[derive(Debug, Clone, Default)]
pub struct TreeData {
    nodes: Vec<Option<TreeNode>>,
    roots: Vec<NodeId>,
    linear: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
}

impl TreeData {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parent: Option<NodeId>, fields: &[(&str, Value)]) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(TreeNode {
            fields: fields.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
            parent,
            children: Vec::new(),
        }));
        id
    }

    /// Add a top-level node.
    pub fn add_root(&mut self, fields: &[(&str, Value)]) -> NodeId {
        let id = self.insert(None, fields);
        self.roots.push(id);
        self.rebuild_linear_index();
        id
    }

    /// Add a child node. Returns `None` if `parent` no longer exists.
    pub fn add_child(&mut self, parent: NodeId, fields: &[(&str, Value)]) -> Option<NodeId> {
        self.node(parent)?;
        let id = self.insert(Some(parent), fields);
        if let Some(Some(node)) = self.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        self.rebuild_linear_index();
        Some(id)
    }

    /// Remove a node and its subtree. Returns false if it did not exist.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        match node.parent {
            Some(parent) => {
                if let Some(Some(p)) = self.nodes.get_mut(parent.0) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.get_mut(child.0).and_then(Option::take) {
                pending.extend(removed.children);
            }
        }
        self.rebuild_linear_index();
        true
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: NodeId, field: &str) -> Option<&Value> {
        self.node(id)?.fields.get(field)
    }

    /// Write a field. Returns false if the node does not exist.
    pub fn set(&mut self, id: NodeId, field: &str, value: Value) -> bool {
        match self.nodes.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => {
                node.fields.insert(field.to_owned(), value);
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.linear.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linear.is_empty()
    }

    /// Position of a node in depth-first order.
    pub fn linear_index(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Node at a depth-first position.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.linear.get(index).copied()
    }

    fn rebuild_linear_index(&mut self) {
        self.linear.clear();
        self.positions.clear();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id.0).and_then(Option::as_ref) {
                self.positions.insert(id, self.linear.len());
                self.linear.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}
