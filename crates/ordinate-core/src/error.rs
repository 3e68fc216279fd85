//! Configuration errors.

use thiserror::Error;

/// A configuration value was rejected under [`ValidationPolicy::Strict`](crate::config::ValidationPolicy::Strict).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("queue limit must be a positive integer, got {0}")]
    InvalidQueueLimit(f64),

    #[error("indicator period must be a positive integer, got {0}")]
    InvalidPeriod(f64),

    #[error("point width must be finite and non-negative, got {0}")]
    InvalidPointWidth(f32),

    #[error("animation duration must be finite and non-negative, got {0} seconds")]
    InvalidDuration(f32),

    #[error("bubble size range is invalid: min {min}, max {max}")]
    InvalidSizeRange { min: f32, max: f32 },
}

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
