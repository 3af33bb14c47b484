use std::time::Instant;

/// Frame clock - tracks delta time plus running frame-rate averages for the
/// window title
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    frame_count: u64,
    elapsed: f32,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;
        self.elapsed += delta;
        delta
    }

    /// Average frames per second since the last reset
    pub fn average_fps(&self) -> f32 {
        if self.elapsed > 0.0 {
            self.frame_count as f32 / self.elapsed
        } else {
            0.0
        }
    }

    /// Average seconds per frame since the last reset
    pub fn average_spf(&self) -> f32 {
        if self.frame_count > 0 {
            self.elapsed / self.frame_count as f32
        } else {
            0.0
        }
    }

    /// Reset clock and averages to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.frame_count = 0;
        self.elapsed = 0.0;
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
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        // Should be roughly 10ms = 0.01s
        assert!(delta >= 0.009 && delta <= 0.050);
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick();
        // Should be very small since we just reset
        assert!(delta < 0.005);
    }

    #[test]
    fn averages_track_frames() {
        let mut clock = Clock::new();
        assert_eq!(clock.average_fps(), 0.0);
        assert_eq!(clock.average_spf(), 0.0);

        for _ in 0..5 {
            thread::sleep(Duration::from_millis(2));
            clock.tick();
        }

        assert!(clock.average_fps() > 0.0);
        assert!(clock.average_spf() > 0.0);
        // fps and spf are reciprocal
        assert!((clock.average_fps() * clock.average_spf() - 1.0).abs() < 1e-3);
    }
}
