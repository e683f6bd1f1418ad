//! Frame timing: delta time, elapsed time and a frames-per-second counter.
//!
//! The timer is advanced with an externally measured delta (the window layer
//! owns the clock), which keeps frame stepping deterministic in tests.

/// Frame timer driven by the caller's delta time.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    elapsed: f64,
    delta: f32,
    frame_count: u64,
    frames_in_window: u32,
    window_start: f64,
    fps: u32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `delta_time` seconds.
    ///
    /// FPS is the number of frames counted in the last complete one-second
    /// window. Negative or non-finite deltas are treated as zero.
    pub fn advance(&mut self, delta_time: f32) {
        let delta = if delta_time.is_finite() && delta_time > 0.0 { delta_time } else { 0.0 };
        self.delta = delta;
        self.elapsed += delta as f64;
        self.frame_count += 1;
        self.frames_in_window += 1;

        if self.elapsed >= self.window_start + 1.0 {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = self.elapsed;
        }
    }

    /// Delta time of the last frame, in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta
    }

    /// Total elapsed time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames advanced since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames counted in the last complete one-second window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
