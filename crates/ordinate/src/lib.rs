//! Ordinate - an incremental charting engine
//!
//! Ordinate draws chart series into retained vector shapes and redraws only
//! what changed. It provides:
//!
//! - **Consistency tracking**: every visual object knows which of its aspects
//!   are stale and tells its parent exactly once
//! - **Series drawers**: column, bar, range column, line, step line, spline,
//!   area, step area, range area, bubble and marker
//! - **Shape pooling**: path handles are reused between passes and recolored
//!   in place on hover and selection
//! - **Animation**: columns grow from their baseline on first draw
//! - **Streaming**: a fixed-capacity cycled queue and indicators built on it
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use ordinate::prelude::*;
//!
//! let mut chart = Chart::new(Rect::new(0.0, 0.0, 640.0, 480.0));
//! let x = Rc::new(OrdinalScale::new(["Mon", "Tue", "Wed"]));
//! let y = Rc::new(LinearScale::new(0.0, 50.0));
//! let id = chart.add_series(
//!     Series::new(DrawerType::Column, DataSet::from_values(&[Some(12.0), Some(30.0), None]), x, y)
//!         .with_name("visits"),
//! );
//!
//! let clock = AnimationClock::new();
//! clock.drive(&mut chart);
//! assert_eq!(chart.series(id).unwrap().drawn_points(), 2);
//! ```
//!
//! # Crates
//!
//! - [`core`] - consistency states and signals, the cycled queue, config,
//!   logging and profiling
//! - [`geometry`] - paths, paints and the chart module

pub mod clock;

pub use ordinate_core as core;
pub use ordinate_core::{logging, profiling};
pub use ordinate_geometry as geometry;
pub use ordinate_geometry::chart;

pub use clock::AnimationClock;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::AnimationClock;

    pub use ordinate_core::consistency::{ConsistencyState, Invalidatable, Signal, SignalEvent, SignalInbox};
    pub use ordinate_core::queue::CycledQueue;
    pub use ordinate_core::{Config, ConfigError, ConfigResult, ValidationPolicy};

    pub use ordinate_geometry::chart::{
        AnimationSettings, Chart, DataSet, DrawerType, LinearScale, OrdinalScale, Point, PointState, PointWidth,
        Rect, Scale, Series, SeriesId, SeriesSettings, StepDirection, TreeChart, TreeData, Value, VectorSurface,
        fields,
    };
    pub use ordinate_geometry::{Color, Paint, Path, Stroke};
}
