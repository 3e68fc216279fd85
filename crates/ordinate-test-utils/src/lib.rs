//! Test doubles for Ordinate.
//!
//! - [`RecordingSurface`] - a [`VectorSurface`](ordinate_geometry::chart::VectorSurface)
//!   that records every path it is asked to draw
//! - [`SignalRecorder`] - a signal listener that keeps every event it receives
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use ordinate_geometry::chart::*;
//! use ordinate_test_utils::RecordingSurface;
//!
//! let mut chart = Chart::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let x = Rc::new(OrdinalScale::new(["a", "b"]));
//! let y = Rc::new(LinearScale::new(0.0, 10.0));
//! chart.add_series(Series::new(
//!     DrawerType::Column,
//!     DataSet::from_values(&[Some(3.0), Some(6.0)]),
//!     x,
//!     y,
//! ));
//! chart.draw();
//!
//! let mut surface = RecordingSurface::new();
//! chart.render(&mut surface);
//! assert_eq!(surface.count_named("fill"), 2);
//! ```
//!
//! Both types use `parking_lot::Mutex` for interior mutability so they can be
//! shared between the object under test and the assertions.

pub mod signals;
pub mod surface;

pub use signals::*;
pub use surface::*;
