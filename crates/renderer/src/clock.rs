use std::time::Duration;

/// Monotonic simulation clock scaled by the user's speed multiplier.
///
/// The clock only ever accumulates `delta * speed`, so a zero speed holds
/// the time at exactly its current value, bit for bit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimClock {
    time: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by one frame's wall-clock delta, scaled.
    pub fn advance(&mut self, delta: Duration, speed: f32) -> f32 {
        self.time += delta.as_secs_f32() * speed;
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

/// Exponentially smoothed frame-time estimate backing the panel's
/// frame-rate readout.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    smoothed_delta: f32,
}

impl FrameStats {
    const SMOOTHING: f32 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one frame's wall-clock delta into the estimate. The first
    /// sample is taken as-is so the readout does not ramp up from zero.
    pub fn update(&mut self, delta: Duration) {
        let sample = delta.as_secs_f32();
        if self.smoothed_delta == 0.0 {
            self.smoothed_delta = sample;
        } else {
            self.smoothed_delta += (sample - self.smoothed_delta) * Self::SMOOTHING;
        }
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.smoothed_delta * 1000.0
    }

    pub fn fps(&self) -> f32 {
        if self.smoothed_delta > 0.0 {
            1.0 / self.smoothed_delta
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_scaled_deltas() {
        let mut clock = SimClock::new();
        let delta = Duration::from_millis(16);
        for _ in 0..120 {
            clock.advance(delta, 0.5);
        }
        let expected = 120.0 * delta.as_secs_f32() * 0.5;
        assert!((clock.time() - expected).abs() < 1e-4);
    }

    #[test]
    fn zero_speed_holds_time_at_exactly_zero() {
        let mut clock = SimClock::new();
        for _ in 0..10 {
            clock.advance(Duration::from_millis(16), 0.0);
        }
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn speed_changes_apply_from_the_next_frame() {
        let mut clock = SimClock::new();
        clock.advance(Duration::from_secs(1), 1.0);
        clock.advance(Duration::from_secs(1), 2.0);
        assert!((clock.time() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn frame_stats_track_a_steady_cadence() {
        let mut stats = FrameStats::new();
        let delta = Duration::from_millis(16);
        for _ in 0..200 {
            stats.update(delta);
        }
        assert!((stats.fps() - 62.5).abs() < 0.5);
        assert!((stats.frame_time_ms() - 16.0).abs() < 0.1);
    }

    #[test]
    fn first_frame_stat_sample_is_taken_whole() {
        let mut stats = FrameStats::new();
        stats.update(Duration::from_millis(20));
        assert!((stats.frame_time_ms() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn frame_stats_smooth_out_a_spike() {
        let mut stats = FrameStats::new();
        for _ in 0..100 {
            stats.update(Duration::from_millis(16));
        }
        stats.update(Duration::from_millis(160));
        // One outlier nudges the estimate, it does not replace it.
        assert!(stats.frame_time_ms() < 35.0);
        assert!(stats.frame_time_ms() > 16.0);
    }
}
