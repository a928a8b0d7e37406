use bevy::prelude::*;

/// Frame counter that publishes frames per second once per elapsed second.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FrameStats {
    /// Counts one frame of `delta` seconds. Returns the new rate when a full
    /// second has accumulated.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta.max(0.0);
        if self.elapsed < 1.0 {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    /// Last published rate, 0 until the first second has passed.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
