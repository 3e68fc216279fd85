//! Engine-wide configuration.

use crate::error::{ConfigError, ConfigResult};

/// Default capacity of a [`CycledQueue`](crate::queue::CycledQueue).
pub const DEFAULT_QUEUE_LIMIT: usize = 256;

/// How invalid configuration values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Replace invalid values with defaults and log a warning.
    #[default]
    Lenient,
    /// Reject invalid values with a [`ConfigError`].
    Strict,
}

impl ValidationPolicy {
    /// Apply the policy to a validation outcome.
    ///
    /// Under [`Lenient`](Self::Lenient) a failed validation yields `fallback`
    /// and a warning; under [`Strict`](Self::Strict) the error is returned.
    pub fn resolve<T>(self, outcome: ConfigResult<T>, fallback: T) -> ConfigResult<T> {
        match (self, outcome) {
            (_, Ok(value)) => Ok(value),
            (Self::Lenient, Err(err)) => {
                tracing::warn!("{err}; using default");
                Ok(fallback)
            }
            (Self::Strict, Err(err)) => Err(err),
        }
    }
}

/// Configuration shared by every chart.
#[derive(Debug, Clone)]
pub struct Config {
    pub validation: ValidationPolicy,
    pub queue_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            validation: ValidationPolicy::Lenient,
            queue_limit: DEFAULT_QUEUE_LIMIT,
        }
    }
}

impl Config {
    /// Strict configuration: every invalid value is an error.
    pub fn strict() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Set the default queue limit, validated by the current policy.
    pub fn with_queue_limit(mut self, limit: f64) -> ConfigResult<Self> {
        self.queue_limit = crate::queue::validate_limit(limit, self.validation)?;
        Ok(self)
    }
}

/// Validate that `value` is a natural number (an integer of at least 1).
pub(crate) fn natural(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

/// Validate an indicator period.
pub fn validate_period(period: f64, policy: ValidationPolicy) -> ConfigResult<usize> {
    let outcome = natural(period).ok_or(ConfigError::InvalidPeriod(period));
    policy.resolve(outcome, DEFAULT_PERIOD)
}

/// Period used when an indicator period is invalid.
pub const DEFAULT_PERIOD: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.validation, ValidationPolicy::Lenient);
        assert_eq!(config.queue_limit, DEFAULT_QUEUE_LIMIT);
    }

    #[test]
    fn test_natural() {
        assert_eq!(natural(3.0), Some(3));
        assert_eq!(natural(0.0), None);
        assert_eq!(natural(2.5), None);
        assert_eq!(natural(f64::NAN), None);
        assert_eq!(natural(-4.0), None);
    }

    #[test]
    fn test_lenient_period_falls_back() {
        assert_eq!(validate_period(0.5, ValidationPolicy::Lenient), Ok(DEFAULT_PERIOD));
        assert_eq!(validate_period(14.0, ValidationPolicy::Lenient), Ok(14));
    }

    #[test]
    fn test_strict_period_rejects() {
        assert_eq!(
            validate_period(-1.0, ValidationPolicy::Strict),
            Err(ConfigError::InvalidPeriod(-1.0))
        );
    }

    #[test]
    fn test_config_queue_limit() {
        let config = Config::default().with_queue_limit(0.0).unwrap();
        assert_eq!(config.queue_limit, DEFAULT_QUEUE_LIMIT);
        assert!(Config::strict().with_queue_limit(0.0).is_err());
        assert_eq!(Config::strict().with_queue_limit(8.0).unwrap().queue_limit, 8);
    }
}
