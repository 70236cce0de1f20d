//! Frame timing

use std::time::{Duration, Instant};

/// Tracks time between frames and since start
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    last: Instant,
    dt: f32,
}

impl Clock {
    /// Starts the clock now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Starts the clock at a given instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            dt: 0.0,
        }
    }

    /// Marks the start of a new frame
    pub fn next_frame(&mut self) {
        self.next_frame_at(Instant::now());
    }

    /// Marks the start of a new frame at `now`
    pub fn next_frame_at(&mut self, now: Instant) {
        self.dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
    }

    /// Seconds between the two most recent frames
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time since the clock started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_measures_from_start() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        assert_eq!(clock.dt(), 0.0);

        clock.next_frame_at(start + Duration::from_millis(250));
        assert!((clock.dt() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_dt_is_per_frame() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.next_frame_at(start + Duration::from_millis(100));
        clock.next_frame_at(start + Duration::from_millis(150));
        assert!((clock.dt() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start + Duration::from_secs(1));
        clock.next_frame_at(start);
        assert_eq!(clock.dt(), 0.0);
    }
}
