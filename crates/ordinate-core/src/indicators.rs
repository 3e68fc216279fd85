//! Streaming technical indicators built on [`CycledQueue`].
//!
//! Calculators consume one value at a time and return `None` until enough
//! values have been seen to fill their period.

use crate::config::{ValidationPolicy, validate_period};
use crate::error::ConfigResult;
use crate::queue::CycledQueue;

/// Simple moving average over the last `period` values.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    queue: CycledQueue<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a calculator. An invalid period is handled by `policy`.
    pub fn new(period: f64, policy: ValidationPolicy) -> ConfigResult<Self> {
        let period = validate_period(period, policy)?;
        Ok(Self {
            period,
            queue: CycledQueue::with_limit(period),
            sum: 0.0,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset to the initial state.
    pub fn start(&mut self) {
        self.queue.clear(None);
        self.sum = 0.0;
    }

    /// Feed the next value. Missing (NaN) values are skipped.
    pub fn process(&mut self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        if let Some(evicted) = self.queue.enqueue(value) {
            self.sum -= evicted;
        }
        self.sum += value;
        if self.queue.len() < self.period {
            return None;
        }
        Some(self.sum / self.period as f64)
    }
}

/// Relative strength index with Wilder smoothing.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: usize,
    changes: CycledQueue<f64>,
    prev: Option<f64>,
    avg_gain: f64,
    avg_loss: f64,
    warmed_up: bool,
}

impl RelativeStrengthIndex {
    pub fn new(period: f64, policy: ValidationPolicy) -> ConfigResult<Self> {
        let period = validate_period(period, policy)?;
        Ok(Self {
            period,
            changes: CycledQueue::with_limit(period),
            prev: None,
            avg_gain: 0.0,
            avg_loss: 0.0,
            warmed_up: false,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Reset to the initial state.
    pub fn start(&mut self) {
        self.changes.clear(None);
        self.prev = None;
        self.avg_gain = 0.0;
        self.avg_loss = 0.0;
        self.warmed_up = false;
    }

    /// Feed the next close value.
    pub fn process(&mut self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let prev = self.prev.replace(value)?;
        let change = value - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let period = self.period as f64;

        if self.warmed_up {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        } else {
            self.changes.enqueue(change);
            if self.changes.len() < self.period {
                return None;
            }
            let (gains, losses) = self.changes.iter().fold((0.0, 0.0), |(g, l), c| {
                (g + c.max(0.0), l + (-c).max(0.0))
            });
            self.avg_gain = gains / period;
            self.avg_loss = losses / period;
            self.warmed_up = true;
        }

        if self.avg_loss == 0.0 {
            return Some(if self.avg_gain == 0.0 { 50.0 } else { 100.0 });
        }
        let rs = self.avg_gain / self.avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}
