//! Scales map data values to ratios along an axis.
//!
//! Ratios are `0.0` at the axis start and `1.0` at its end; values outside the
//! scale range map outside `[0, 1]`. Series multiply ratios by their pixel
//! bounds.

use std::fmt;

use crate::chart::data::Value;

/// The scale collaborator consumed by series coordinate resolution.
pub trait Scale: fmt::Debug {
    /// Ratio for `value`. `sub_ratio` positions inside a category band and is
    /// ignored by continuous scales. Returns `NaN` for `NaN` input.
    fn transform(&self, value: f64, sub_ratio: f64) -> f64;

    /// Value for a ratio.
    fn inverse_transform(&self, ratio: f64) -> f64;

    /// Returns true if the scale runs from its end to its start.
    fn is_inverted(&self) -> bool;

    /// Width of one category band as a ratio, `0.0` for continuous scales.
    fn category_width_ratio(&self) -> f64 {
        0.0
    }

    /// Numeric position of a raw field value on this scale.
    fn value_of(&self, value: &Value) -> Option<f64> {
        value.as_f64()
    }
}

/// Continuous scale between `min` and `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub inverted: bool,
}

impl LinearScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inverted: false,
        }
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }
}

impl Scale for LinearScale {
    fn transform(&self, value: f64, _sub_ratio: f64) -> f64 {
        let ratio = (value - self.min) / self.span();
        if self.inverted { 1.0 - ratio } else { ratio }
    }

    fn inverse_transform(&self, ratio: f64) -> f64 {
        let ratio = if self.inverted { 1.0 - ratio } else { ratio };
        self.min + ratio * self.span()
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }
}

/// Band scale over named categories. Category `i` occupies
/// `[i / n, (i + 1) / n]`; `transform(i, 0.5)` is its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    categories: Vec<String>,
    pub inverted: bool,
}

impl OrdinalScale {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            inverted: false,
        }
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Index of a category by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    fn count(&self) -> f64 {
        self.categories.len().max(1) as f64
    }
}

impl Scale for OrdinalScale {
    fn transform(&self, value: f64, sub_ratio: f64) -> f64 {
        let ratio = (value + sub_ratio) / self.count();
        if self.inverted { 1.0 - ratio } else { ratio }
    }

    fn inverse_transform(&self, ratio: f64) -> f64 {
        let ratio = if self.inverted { 1.0 - ratio } else { ratio };
        (ratio * self.count()).floor()
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn category_width_ratio(&self) -> f64 {
        1.0 / self.count()
    }

    fn value_of(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Text(name) => self.index_of(name).map(|i| i as f64),
            other => other.as_f64(),
        }
    }
}
