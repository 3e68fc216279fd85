//! Incremental chart drawing.
//!
//! A [`Chart`] owns series; a [`Series`] owns one drawer and one
//! [`ShapesManager`]. Every object tracks what is stale about it with a
//! consistency bitmask and reports changes to its parent through signals, so
//! a redraw only touches what actually changed:
//!
//! - a color change repaints existing shapes
//! - a data change rebuilds the affected series and its stack group
//! - a consistent series is skipped entirely
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use ordinate_geometry::chart::*;
//!
//! let mut chart = Chart::new(Rect::new(0.0, 0.0, 200.0, 100.0));
//! let x = Rc::new(OrdinalScale::new(["a", "b"]));
//! let y = Rc::new(LinearScale::new(0.0, 10.0));
//! let id = chart.add_series(Series::new(
//!     DrawerType::Line,
//!     DataSet::from_values(&[Some(2.0), Some(8.0)]),
//!     x,
//!     y,
//! ));
//!
//! assert_eq!(chart.draw(), 1);
//! // Nothing changed, nothing is drawn.
//! assert_eq!(chart.draw(), 0);
//!
//! // Point states repaint in place, no draw pass needed.
//! chart.point(id, 1).hover(true);
//! assert!(chart.point(id, 1).hovered());
//! assert_eq!(chart.draw(), 0);
//!
//! chart.series_mut(id).unwrap().set_value(0, fields::VALUE, 4.0);
//! assert_eq!(chart.draw(), 1);
//! ```

pub mod animation;
pub mod capabilities;
pub mod data;
pub mod drawers;
pub mod point;
pub mod rect;
pub mod scale;
pub mod series;
pub mod settings;
pub mod shapes;
pub mod state;
pub mod types;

pub use animation::{AnimationPhase, ColumnAnimation, EasingFunction};
pub use capabilities::{DrawerCapabilities, DrawerType};
pub use data::{DataSet, NodeId, PointMeta, PositionProvider, TreeData, Value, fields};
pub use point::{Point, TreeNodePoint};
pub use rect::Rect;
pub use scale::{LinearScale, OrdinalScale, Scale};
pub use series::{DrawOutcome, DrawStats, Series, SeriesId};
pub use settings::{AnimationSettings, BubbleSizeRange, PointWidth, SeriesSettings, StepDirection};
pub use shapes::{LayerId, ShapeConfig, ShapeType, ShapesManager, VectorPath, VectorSurface};
pub use state::{InteractivityState, PointState, PointStates};
pub use types::{Chart, TreeChart};
