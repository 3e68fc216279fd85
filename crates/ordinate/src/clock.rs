use std::time::{Duration, Instant};

use ordinate_core::profiling::{self, profile_function};
use ordinate_geometry::chart::Chart;

/// Host-side timer that drives chart animations.
///
/// Animations are stepped with [`now`](Self::now), the scaled time in
/// seconds. Pausing or slowing the clock therefore pauses or slows every
/// animation it drives, while [`elapsed`](Self::elapsed) keeps tracking wall
/// time.
///
/// # Example
/// ```
/// use std::rc::Rc;
/// use std::time::Duration;
/// use ordinate::prelude::*;
///
/// let mut chart = Chart::new(Rect::new(0.0, 0.0, 100.0, 100.0));
/// let x = Rc::new(OrdinalScale::new(["a"]));
/// let y = Rc::new(LinearScale::new(0.0, 10.0));
/// let mut series = Series::new(DrawerType::Column, DataSet::from_values(&[Some(5.0)]), x, y);
/// series.set_animation(AnimationSettings::enabled(0.5)).unwrap();
/// chart.add_series(series);
///
/// let mut clock = AnimationClock::new();
/// assert!(clock.drive(&mut chart));
/// clock.advance(Duration::from_millis(100));
/// assert!(clock.drive(&mut chart));
/// for _ in 0..5 {
///     clock.advance(Duration::from_millis(100));
///     clock.drive(&mut chart);
/// }
/// assert!(!chart.is_animating());
/// ```
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Scaled seconds since the clock started.
    now: f64,
    elapsed: Duration,
    delta: Duration,
    frame_count: u64,
    /// 1.0 = normal, 0.0 = paused
    time_scale: f32,
    /// Cap on a single step, so a long hitch doesn't skip animations.
    max_delta: Duration,
    last_update: Instant,
}

impl AnimationClock {
    /// Default cap on a single step.
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self {
            now: 0.0,
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
            time_scale: 1.0,
            max_delta: Self::DEFAULT_MAX_DELTA,
            last_update: Instant::now(),
        }
    }

    /// Step by the wall time passed since the last update.
    pub fn update(&mut self) {
        let now = Instant::now();
        let raw = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(raw);
    }

    /// Step by an explicit amount of wall time.
    pub fn advance(&mut self, raw: Duration) {
        self.delta = raw.min(self.max_delta);
        self.elapsed += raw;
        self.now += self.delta.as_secs_f64() * f64::from(self.time_scale);
        self.frame_count += 1;
    }

    /// Draw whatever is invalid on `chart`, then step its animations to
    /// [`now`](Self::now). Returns true while an animation still runs.
    pub fn drive(&self, chart: &mut Chart) -> bool {
        profile_function!();
        profiling::new_frame();
        let drawn = chart.draw();
        let running = chart.tick(self.now);
        tracing::trace!(frame = self.frame_count, now = self.now, drawn, running, "chart driven");
        running
    }

    /// Scaled time in seconds, the time base of animations.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Unscaled wall time passed through the clock.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Last step, after capping.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32() * self.time_scale
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative scales clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    #[inline]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    pub fn set_max_delta(&mut self, max_delta: Duration) {
        self.max_delta = max_delta;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.time_scale = 0.0;
    }

    #[inline]
    pub fn resume(&mut self) {
        self.time_scale = 1.0;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::thread;

    use ordinate_geometry::chart::{AnimationSettings, DataSet, DrawerType, LinearScale, OrdinalScale, Rect, Series};

    fn animated_chart(duration: f32) -> Chart {
        let mut chart = Chart::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let x = Rc::new(OrdinalScale::new(["a", "b"]));
        let y = Rc::new(LinearScale::new(0.0, 10.0));
        let mut series = Series::new(DrawerType::Column, DataSet::from_values(&[Some(4.0), Some(8.0)]), x, y);
        series.set_animation(AnimationSettings::enabled(duration)).unwrap();
        chart.add_series(series);
        chart
    }

    #[test]
    fn test_clock_creation() {
        let clock = AnimationClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.delta(), Duration::ZERO);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_update_uses_wall_time() {
        let mut clock = AnimationClock::new();
        thread::sleep(Duration::from_millis(10));
        clock.update();
        assert_eq!(clock.frame_count(), 1);
        assert!(clock.delta() > Duration::ZERO);
        assert!(clock.now() > 0.0);
    }

    #[test]
    fn test_max_delta_caps_step() {
        let mut clock = AnimationClock::new();
        clock.set_max_delta(Duration::from_millis(50));
        clock.advance(Duration::from_millis(200));
        assert_eq!(clock.delta(), Duration::from_millis(50));
        assert_eq!(clock.elapsed(), Duration::from_millis(200));
        assert!((clock.now() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_animation_time() {
        let mut clock = AnimationClock::new();
        clock.advance(Duration::from_millis(50));
        let before = clock.now();
        clock.pause();
        clock.advance(Duration::from_millis(50));
        assert_eq!(clock.now(), before);
        assert_eq!(clock.delta_seconds(), 0.0);
        clock.resume();
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_drive_runs_animation_to_completion() {
        let mut chart = animated_chart(0.3);
        let mut clock = AnimationClock::new();

        assert!(clock.drive(&mut chart));
        let mut frames = 0;
        loop {
            clock.advance(Duration::from_millis(50));
            frames += 1;
            if !clock.drive(&mut chart) {
                break;
            }
            assert!(frames < 20);
        }
        assert!(frames >= 6);
        assert!(!chart.is_animating());
    }

    #[test]
    fn test_paused_clock_holds_animation() {
        let mut chart = animated_chart(0.2);
        let mut clock = AnimationClock::new();
        clock.drive(&mut chart);
        clock.pause();
        for _ in 0..10 {
            clock.advance(Duration::from_millis(100));
            assert!(clock.drive(&mut chart));
        }
        clock.resume();
        for _ in 0..3 {
            clock.advance(Duration::from_millis(100));
            clock.drive(&mut chart);
        }
        assert!(!chart.is_animating());
    }
}
