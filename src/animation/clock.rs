//! Discrete animation clock.
//!
//! The host drives the clock from whatever loop it has (an animation-frame
//! callback, a fixed-tick game loop, a test feeding synthetic time). The clock
//! compares elapsed time against the frame interval rather than counting
//! callbacks, so irregular callback timing does not change playback speed.

/// Returns true once `elapsed_ms` since the last advance reaches `speed_ms`.
pub fn should_advance(elapsed_ms: f64, speed_ms: u32) -> bool {
    elapsed_ms >= f64::from(speed_ms)
}

// ============================================================================
// FrameClock
// ============================================================================

/// Accumulates time between frame advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    speed_ms: u32,
    elapsed_ms: f64,
}

impl FrameClock {
    /// Creates a clock that advances every `speed_ms` milliseconds.
    pub fn new(speed_ms: u32) -> Self {
        Self {
            speed_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Returns the frame interval.
    pub fn speed(&self) -> u32 {
        self.speed_ms
    }

    /// Changes the frame interval without resetting accumulated time.
    pub fn set_speed(&mut self, speed_ms: u32) {
        self.speed_ms = speed_ms;
    }

    /// Adds `delta_ms` and reports whether the frame should advance.
    ///
    /// The baseline resets on every advance, so a long stall produces one
    /// advance rather than a burst.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        self.elapsed_ms += delta_ms.max(0.0);
        if should_advance(self.elapsed_ms, self.speed_ms) {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// Clears accumulated time.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

// ============================================================================
// Playback
// ============================================================================

/// Tracks the active frame of a looping animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    clock: FrameClock,
    frame: usize,
    frame_count: usize,
}

impl Playback {
    /// Starts playback at frame 0.
    pub fn new(speed_ms: u32, frame_count: usize) -> Self {
        Self {
            clock: FrameClock::new(speed_ms),
            frame: 0,
            frame_count,
        }
    }

    /// Returns the index of the frame currently shown.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns the number of frames in the loop.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Returns the clock driving this playback.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Replaces the frame count, e.g. after the frames were regenerated.
    ///
    /// The active frame restarts at 0 if it falls outside the new range.
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        if self.frame >= frame_count {
            self.frame = 0;
        }
    }

    /// Advances time by `delta_ms` and returns the active frame index.
    ///
    /// With no frames the index stays at 0.
    pub fn tick(&mut self, delta_ms: f64) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        if self.clock.tick(delta_ms) {
            self.frame = if self.frame + 1 >= self.frame_count {
                0
            } else {
                self.frame + 1
            };
        }
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_on_reaching_interval() {
        let mut clock = FrameClock::new(100);
        assert!(!clock.tick(40.0));
        assert!(!clock.tick(59.0));
        assert!(clock.tick(1.0));
        assert!(!clock.tick(99.0));
    }

    #[test]
    fn stall_yields_single_advance() {
        let mut clock = FrameClock::new(50);
        assert!(clock.tick(1000.0));
        assert!(!clock.tick(10.0));
    }

    #[test]
    fn playback_wraps() {
        let mut playback = Playback::new(50, 3);
        let seen: Vec<_> = (0..4).map(|_| playback.tick(50.0)).collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn playback_without_frames_stays_put() {
        let mut playback = Playback::new(50, 0);
        assert_eq!(playback.tick(500.0), 0);

        let mut playback = Playback::new(50, 5);
        playback.tick(50.0);
        playback.tick(50.0);
        playback.set_frame_count(2);
        assert_eq!(playback.frame(), 0);
    }
}
