//! Pooled vector paths grouped by name and point state.
//!
//! A [`ShapesManager`] belongs to exactly one series. It owns every
//! [`VectorPath`] the series draws into, reuses them across passes through
//! per-[`ShapeType`] pools, and hands drawers [`ShapesGroup`]s: name to
//! [`ShapeId`] maps for one point state.

use std::cmp;
use std::sync::atomic::{AtomicU64, Ordering};

use ordinate_core::alloc::HashMap;

use super::state::PointState;
use crate::path::Path;
use crate::style::{Color, HatchPattern, Paint, StateStyle, Stroke};

/// Order of fill shapes among shapes with the same z index.
pub const FILL_ORDER: u8 = 0;
/// Order of hatch fill shapes among shapes with the same z index.
pub const HATCH_ORDER: u8 = 1;
/// Order of stroke shapes among shapes with the same z index.
pub const STROKE_ORDER: u8 = 2;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// A renderable parent that shapes attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    /// Allocate a fresh layer id.
    pub fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// Index of a shape inside its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

/// Primitive kind, one pool each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Path,
    Circle,
    Rect,
}

/// Typed description of one named shape of a drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeConfig {
    pub name: &'static str,
    pub shape_type: ShapeType,
    pub fill: StateStyle<Paint>,
    pub stroke: StateStyle<Option<Stroke>>,
    pub order: u8,
    pub is_hatch: bool,
    /// Included when a group is requested without an explicit name set.
    pub required: bool,
}

impl ShapeConfig {
    /// Filled shape without outline.
    pub fn fill(name: &'static str, shape_type: ShapeType, color: Color) -> Self {
        Self {
            name,
            shape_type,
            fill: StateStyle::fill_from(color),
            stroke: StateStyle::uniform(None),
            order: FILL_ORDER,
            is_hatch: false,
            required: true,
        }
    }

    /// Outline without fill.
    pub fn stroke(name: &'static str, shape_type: ShapeType, color: Color, width: f32) -> Self {
        Self {
            name,
            shape_type,
            fill: StateStyle::uniform(Paint::None),
            stroke: StateStyle::stroke_from(color, width),
            order: STROKE_ORDER,
            is_hatch: false,
            required: true,
        }
    }

    /// Hatch overlay; invisible when `pattern` is `None`.
    pub fn hatch(name: &'static str, shape_type: ShapeType, pattern: Option<HatchPattern>) -> Self {
        let paint = pattern.map_or(Paint::None, |pattern| Paint::Hatch {
            pattern,
            color: Color::BLACK.with_alpha(0.5),
        });
        Self {
            name,
            shape_type,
            fill: StateStyle::uniform(paint),
            stroke: StateStyle::uniform(None),
            order: HATCH_ORDER,
            is_hatch: true,
            required: true,
        }
    }

    /// Filled and outlined shape.
    pub fn filled_outline(name: &'static str, shape_type: ShapeType, color: Color, width: f32) -> Self {
        Self {
            stroke: StateStyle::stroke_from(color, width),
            ..Self::fill(name, shape_type, color)
        }
    }

    /// Exclude from the default name set.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn is_visible_in(&self, state: PointState) -> bool {
        self.fill.for_state(state).is_visible()
            || self.stroke.for_state(state).is_some_and(|s| s.is_visible())
    }
}

/// A path handle with its paint, parent and z order.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    name: &'static str,
    shape_type: ShapeType,
    def: usize,
    pub path: Path,
    pub parent: Option<LayerId>,
    pub z_index: f32,
    /// Tie-breaker between shapes sharing `z_index`.
    pub order: u8,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
    pub visible: bool,
}

impl VectorPath {
    fn new(shape_type: ShapeType) -> Self {
        Self {
            name: "",
            shape_type,
            def: 0,
            path: Path::new(),
            parent: None,
            z_index: 0.0,
            order: 0,
            fill: Paint::None,
            stroke: None,
            visible: true,
        }
    }

    /// Name of the config this shape was configured from.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Render order: z index first, then fill, hatch and stroke.
    pub fn z_cmp(&self, other: &Self) -> cmp::Ordering {
        self.z_index
            .total_cmp(&other.z_index)
            .then(self.order.cmp(&other.order))
    }
}

/// Bit set over a manager's shape configs, selecting which shapes a group
/// contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeNames(u64);

impl ShapeNames {
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn contains(&self, def: usize) -> bool {
        self.0 & (1 << def) != 0
    }
}

/// Shapes for one point state, addressed by config name.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapesGroup {
    state: PointState,
    entries: Vec<(&'static str, ShapeId)>,
}

impl ShapesGroup {
    pub fn state(&self) -> PointState {
        self.state
    }

    pub fn get(&self, name: &str) -> Option<ShapeId> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.entries.iter().map(|(_, id)| *id)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The renderer collaborator.
pub trait VectorSurface {
    /// Draw one attached, visible shape. Called in ascending z order.
    fn draw_path(&mut self, layer: LayerId, shape: &VectorPath);
}

/// Allocator and cache of a series' shapes.
#[derive(Debug, Clone)]
pub struct ShapesManager {
    configs: Vec<ShapeConfig>,
    shapes: Vec<VectorPath>,
    pools: HashMap<ShapeType, Vec<ShapeId>>,
    pool_pointers: HashMap<ShapeType, usize>,
    used: Vec<ShapeId>,
    groups: Vec<ShapesGroup>,
    cache: HashMap<(PointState, ShapeNames), usize>,
    container: Option<LayerId>,
    base_z: f32,
}

impl ShapesManager {
    pub fn new(configs: Vec<ShapeConfig>) -> Self {
        debug_assert!(configs.len() <= 64, "at most 64 shape configs per manager");
        Self {
            configs,
            shapes: Vec::new(),
            pools: HashMap::new(),
            pool_pointers: HashMap::new(),
            used: Vec::new(),
            groups: Vec::new(),
            cache: HashMap::new(),
            container: None,
            base_z: 0.0,
        }
    }

    pub fn configs(&self) -> &[ShapeConfig] {
        &self.configs
    }

    /// Replace the configs, keeping shapes and pools. Names must match the
    /// previous configs one to one; call [`update_colors`](Self::update_colors)
    /// afterwards to apply new paints.
    pub fn replace_configs(&mut self, configs: Vec<ShapeConfig>) {
        debug_assert!(
            configs.iter().map(|c| c.name).eq(self.configs.iter().map(|c| c.name)),
            "replacement configs must keep names and order"
        );
        self.configs = configs;
    }

    fn def_of(&self, name: &str) -> Option<usize> {
        self.configs.iter().position(|c| c.name == name)
    }

    /// Name set for the given config names. Unknown names are ignored.
    pub fn names(&self, names: &[&str]) -> ShapeNames {
        let mut mask = 0u64;
        for name in names {
            match self.def_of(name) {
                Some(def) => mask |= 1 << def,
                None => debug_assert!(false, "unknown shape name {name}"),
            }
        }
        ShapeNames(mask)
    }

    /// Name set of every required config.
    pub fn required_names(&self) -> ShapeNames {
        let mut mask = 0u64;
        for (def, config) in self.configs.iter().enumerate() {
            if config.required {
                mask |= 1 << def;
            }
        }
        ShapeNames(mask)
    }

    pub fn container(&self) -> Option<LayerId> {
        self.container
    }

    /// Attach every used shape to `layer`. Shapes allocated later attach to
    /// it as well.
    pub fn set_container(&mut self, layer: LayerId) {
        if self.container == Some(layer) {
            return;
        }
        self.container = Some(layer);
        for id in &self.used {
            self.shapes[id.0].parent = Some(layer);
        }
    }

    /// Group for `state` and `names` (default: required names). Repeated
    /// requests in one pass return the same shapes.
    pub fn get_shapes_group(&mut self, state: PointState, names: Option<ShapeNames>) -> ShapesGroup {
        let names = names.unwrap_or_else(|| self.required_names());
        if let Some(&slot) = self.cache.get(&(state, names)) {
            return self.groups[slot].clone();
        }
        self.add_shapes_group(state, Some(names))
    }

    /// Allocate a new group even if one is cached for `(state, names)`. The
    /// new group replaces the cached one; the old group keeps its shapes.
    pub fn add_shapes_group(&mut self, state: PointState, names: Option<ShapeNames>) -> ShapesGroup {
        let names = names.unwrap_or_else(|| self.required_names());
        let mut entries = Vec::new();
        for def in 0..self.configs.len() {
            if names.contains(def) {
                let id = self.allocate(def, state);
                entries.push((self.configs[def].name, id));
            }
        }
        let group = ShapesGroup { state, entries };
        tracing::trace!(?state, shapes = group.len(), "allocated shapes group");
        self.cache.insert((state, names), self.groups.len());
        self.groups.push(group.clone());
        group
    }

    fn allocate(&mut self, def: usize, state: PointState) -> ShapeId {
        let shape_type = self.configs[def].shape_type;
        let pool = self.pools.entry(shape_type).or_default();
        let pointer = self.pool_pointers.entry(shape_type).or_default();
        let id = match pool.get(*pointer) {
            Some(id) => *id,
            None => {
                let id = ShapeId(self.shapes.len());
                self.shapes.push(VectorPath::new(shape_type));
                pool.push(id);
                id
            }
        };
        *pointer += 1;
        self.used.push(id);

        let config = &self.configs[def];
        let shape = &mut self.shapes[id.0];
        shape.name = config.name;
        shape.def = def;
        shape.path.clear();
        shape.parent = self.container;
        shape.z_index = self.base_z;
        shape.order = config.order;
        shape.fill = config.fill.for_state(state);
        shape.stroke = config.stroke.for_state(state);
        shape.visible = !config.is_hatch || config.is_visible_in(state);
        id
    }

    /// Release every used shape back to its pool and forget cached groups.
    pub fn clear_shapes(&mut self) {
        for id in self.used.drain(..) {
            let shape = &mut self.shapes[id.0];
            shape.path.clear();
            shape.parent = None;
        }
        for pointer in self.pool_pointers.values_mut() {
            *pointer = 0;
        }
        self.groups.clear();
        self.cache.clear();
    }

    /// Repaint a group for `state`.
    pub fn update_colors(&mut self, state: PointState, group: &ShapesGroup) {
        for id in group.ids() {
            let shape = &mut self.shapes[id.0];
            let config = &self.configs[shape.def];
            shape.fill = config.fill.for_state(state);
            shape.stroke = config.stroke.for_state(state);
            if config.is_hatch {
                shape.visible = config.is_visible_in(state);
            }
        }
    }

    /// Repaint every group allocated this pass for `state`.
    pub fn update_all_colors(&mut self, state: PointState) {
        let groups = std::mem::take(&mut self.groups);
        for group in &groups {
            self.update_colors(state, group);
        }
        self.groups = groups;
    }

    /// Move every used shape to a new base z index.
    pub fn update_z_index(&mut self, base_z: f32) {
        self.base_z = base_z;
        for id in &self.used {
            self.shapes[id.0].z_index = base_z;
        }
    }

    pub fn shape(&self, id: ShapeId) -> Option<&VectorPath> {
        self.shapes.get(id.0)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut VectorPath> {
        self.shapes.get_mut(id.0)
    }

    /// Path of the shape named `name` in `group`.
    pub fn path(&self, group: &ShapesGroup, name: &str) -> Option<&Path> {
        group.get(name).and_then(|id| self.shape(id)).map(|s| &s.path)
    }

    pub fn path_mut(&mut self, group: &ShapesGroup, name: &str) -> Option<&mut Path> {
        group
            .get(name)
            .and_then(|id| self.shapes.get_mut(id.0))
            .map(|s| &mut s.path)
    }

    /// Apply `f` to the paths of every listed name present in `group`.
    pub fn for_each_path(&mut self, group: &ShapesGroup, names: &[&str], mut f: impl FnMut(&mut Path)) {
        for name in names {
            if let Some(path) = self.path_mut(group, name) {
                f(path);
            }
        }
    }

    /// Shapes in use this pass, in allocation order.
    pub fn used_shapes(&self) -> impl Iterator<Item = &VectorPath> + '_ {
        self.used.iter().map(|id| &self.shapes[id.0])
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Groups allocated this pass.
    pub fn groups(&self) -> &[ShapesGroup] {
        &self.groups
    }

    /// Number of shapes ever created for a type.
    pub fn pool_size(&self, shape_type: ShapeType) -> usize {
        self.pools.get(&shape_type).map_or(0, Vec::len)
    }

    /// Draw attached, visible, non-empty shapes in ascending z order.
    pub fn render(&self, surface: &mut dyn VectorSurface) {
        let mut order: Vec<&VectorPath> = self
            .used_shapes()
            .filter(|s| s.visible && s.parent.is_some() && !s.path.is_empty())
            .collect();
        order.sort_by(|a, b| a.z_cmp(b));
        for shape in order {
            if let Some(layer) = shape.parent {
                surface.draw_path(layer, shape);
            }
        }
    }
}
