//! Runtime settings for the terminal renderer
use std::time::Duration;

use cubespin_core::solid::DEFAULT_STRIDE;
use cubespin_core::{CoreError, CoreResult, RotationStep};

use crate::renderer::{DEFAULT_BACKGROUND, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Roughly 60 frames per second
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Spacing between surface samples
    pub stride: f64,
    /// Sleep after every frame; not shortened when rendering runs long
    pub frame_interval: Duration,
    pub rotation_step: RotationStep,
    pub background: char,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl RenderConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::config(format!(
                "display must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        // Terminal cursor positions are u16
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(CoreError::config(format!(
                "display {}x{} exceeds terminal limits",
                self.width, self.height
            )));
        }
        if !(self.stride.is_finite() && self.stride > 0.0) {
            return Err(CoreError::config(format!(
                "sample stride must be positive, got {}",
                self.stride
            )));
        }
        if !self.rotation_step.is_finite() {
            return Err(CoreError::config("rotation step must be finite"));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stride: DEFAULT_STRIDE,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            rotation_step: RotationStep::default(),
            background: DEFAULT_BACKGROUND,
            max_frames: None,
        }
    }
}
