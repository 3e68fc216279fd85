//! Ordinate Geometry - vector paths and incremental chart drawing
//!
//! This crate provides:
//! - Path primitives that drawers append to point by point
//! - Colors, paints and strokes with per-point-state variants
//! - The chart module: scales, data iteration, the shapes manager, series
//!   drawers, series and chart orchestration, point views and animation
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use ordinate_geometry::chart::*;
//!
//! let mut chart = Chart::new(Rect::new(0.0, 0.0, 400.0, 300.0));
//! let x = Rc::new(OrdinalScale::new(["Q1", "Q2", "Q3"]));
//! let y = Rc::new(LinearScale::new(0.0, 100.0));
//! let data = DataSet::from_values(&[Some(10.0), None, Some(20.0)]);
//! let id = chart.add_series(Series::new(DrawerType::Column, data, x, y));
//!
//! chart.draw();
//! assert_eq!(chart.series(id).unwrap().drawn_points(), 2);
//! ```

pub mod chart;
mod path;
mod style;

pub use path::*;
pub use style::*;
