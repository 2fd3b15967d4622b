//! Frame timing for the windowed host.
//!
//! The simulation advances one step per frame regardless of wall time, so
//! this only feeds the FPS readout and logs.

use std::time::{Duration, Instant};

/// How often the FPS figure is recomputed.
const FPS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// Per-frame delta, frame count and a smoothed FPS.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_updated: bool,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_updated: false,
        }
    }

    /// Mark the end of a frame. Returns the delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        self.fps_updated = fps_elapsed >= FPS_UPDATE_INTERVAL;
        if self.fps_updated {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the last tick recomputed [`fps`](Self::fps).
    #[inline]
    pub fn fps_updated(&self) -> bool {
        self.fps_updated
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
