use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Rolling frames-per-second counter. Purely observational.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounter {
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameCounter {
    /// Count a frame; returns a fresh reading once a full window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            self.frames = 0;
            return None;
        };
        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < WINDOW {
            return None;
        }
        let fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}
