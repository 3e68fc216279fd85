//! Recording implementation of `VectorSurface`.

use std::sync::Arc;

use ordinate_geometry::chart::{LayerId, ShapeType, VectorPath, VectorSurface};
use ordinate_geometry::{Paint, Path, Stroke};
use parking_lot::Mutex;

/// One recorded `draw_path` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub layer: LayerId,
    pub name: &'static str,
    pub shape_type: ShapeType,
    pub z_index: f32,
    pub order: u8,
    pub path: Path,
    pub fill: Paint,
    pub stroke: Option<Stroke>,
}

impl DrawCall {
    fn from_path(layer: LayerId, shape: &VectorPath) -> Self {
        Self {
            layer,
            name: shape.name(),
            shape_type: shape.shape_type(),
            z_index: shape.z_index,
            order: shape.order,
            path: shape.path.clone(),
            fill: shape.fill,
            stroke: shape.stroke,
        }
    }
}

/// Surface that records draw calls instead of rasterizing.
///
/// Clones share the same call log, so a clone can be handed to the code
/// under test while the original is kept for assertions.
///
/// # Example
///
/// ```rust
/// use ordinate_test_utils::RecordingSurface;
///
/// let surface = RecordingSurface::new();
/// assert!(surface.calls().is_empty());
/// assert_eq!(surface.count_named("fill"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<DrawCall>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of recorded paths configured from the shape config `name`.
    pub fn count_named(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.name == name).count()
    }

    /// Recorded calls on one layer.
    pub fn calls_on(&self, layer: LayerId) -> Vec<DrawCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.layer == layer)
            .cloned()
            .collect()
    }

    /// Returns true if z indices never decreased between calls.
    pub fn is_z_ordered(&self) -> bool {
        self.calls
            .lock()
            .windows(2)
            .all(|pair| pair[0].z_index <= pair[1].z_index)
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl VectorSurface for RecordingSurface {
    fn draw_path(&mut self, layer: LayerId, shape: &VectorPath) {
        self.calls.lock().push(DrawCall::from_path(layer, shape));
    }
}
