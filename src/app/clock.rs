use std::time::{Duration, Instant};

/// Timing of one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Frames ticked before this one.
    pub frame_index: u64,
}

impl FrameTime {
    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Produces a [`FrameTime`] per presented frame.
///
/// Elapsed time is capped so a stall (debugger, minimised window) does not
/// show up as one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    max_elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_elapsed(Duration::from_millis(250))
    }

    pub fn with_max_elapsed(max_elapsed: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            max_elapsed,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = now.saturating_duration_since(self.last).min(self.max_elapsed);
        self.last = now;

        let time = FrameTime {
            elapsed,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames_and_clamps() {
        let start = Instant::now();
        let mut clock = FrameClock::with_max_elapsed(Duration::from_millis(100));
        clock.last = start;

        let first = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(first.frame_index, 0);
        assert_eq!(first.elapsed, Duration::from_millis(16));

        let second = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(second.frame_index, 1);
        assert_eq!(second.elapsed, Duration::from_millis(100));
    }
}
