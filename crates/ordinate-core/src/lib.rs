//! Ordinate Core
//!
//! Engine-wide plumbing for the Ordinate charting engine: the consistency
//! state and signal protocol, the cycled queue used by streaming indicators
//! and multi-point drawers, configuration, logging and profiling.

pub mod alloc;
pub mod config;
pub mod consistency;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod queue;

pub use config::{Config, ValidationPolicy};
pub use error::{ConfigError, ConfigResult};
