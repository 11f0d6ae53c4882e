/// Variable-rate frame clock.
///
/// The host reports the wall-clock delta of each animation frame; the clock
/// clamps it so a frame after a long stall (hidden tab, debugger) does not
/// advance the simulation by seconds at once.
pub struct FrameClock {
    /// Upper bound for a single frame delta, in seconds.
    max_dt: f32,
    /// Delta of the most recent frame after clamping.
    last_dt: f32,
    /// Total clamped time since start.
    elapsed: f64,
    /// Number of frames advanced.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_dt: 0.0,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Feed the raw host delta. Returns the clamped delta to simulate with.
    /// Negative or non-finite input counts as a zero-length frame.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.last_dt = dt;
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    /// Clamped delta of the last frame.
    pub fn dt(&self) -> f32 {
        self.last_dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
