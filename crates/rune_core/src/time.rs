//! Frame time
//!
//! Variable-step frame clock. The host measures (or is told) how long the
//! last frame took and hands that delta to scripts; nothing downstream may
//! assume a fixed step.

use std::time::{Duration, Instant};

/// Timing of one host frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Frame index, starting at 0.
    pub frame: u64,
    /// Simulation time accumulated up to and including this frame.
    pub elapsed: Duration,
}

/// Frame clock with an upper bound on the delta it reports.
pub struct FrameClock {
    last: Option<Instant>,
    frame: u64,
    elapsed: Duration,
    max_delta: f32,
}

impl FrameClock {
    /// `max_delta` caps the delta after a stall (debugger, window drag).
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            frame: 0,
            elapsed: Duration::ZERO,
            max_delta,
        }
    }

    /// Measure wall-clock time since the previous call. The first call
    /// reports a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let measured = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.advance(measured)
    }

    /// Advance by an externally supplied delta.
    ///
    /// Accumulated time saturates at `Duration::MAX`.
    pub fn advance(&mut self, delta: f32) -> FrameTime {
        let delta = self.clamp(delta);
        let step = Duration::try_from_secs_f32(delta).unwrap_or(Duration::MAX);
        let elapsed = self.elapsed.checked_add(step).unwrap_or_else(|| {
            tracing::warn!(delta, "accumulated frame time saturated");
            Duration::MAX
        });
        let time = FrameTime {
            delta,
            frame: self.frame,
            elapsed,
        };
        self.elapsed = time.elapsed;
        self.frame += 1;
        time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn total_time(&self) -> Duration {
        self.elapsed
    }

    fn clamp(&self, delta: f32) -> f32 {
        if !delta.is_finite() || delta < 0.0 {
            tracing::warn!(delta, "discarding invalid frame delta");
            return 0.0;
        }
        if delta > self.max_delta {
            tracing::debug!(delta, max = self.max_delta, "clamping frame delta");
            return self.max_delta;
        }
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}
