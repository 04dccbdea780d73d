//! Clear, rasterize, flush, advance, sleep
use anyhow::{Context, Result};
use cubespin_core::{Camera, Scene, Transform};
use std::io::Write;
use std::time::{Duration, Instant};

use crate::config::RenderConfig;
use crate::renderer::ScreenBuffer;

/// Owns the state that persists across frames: the rotation and the screen
/// buffer. Everything else is rebuilt every frame.
pub struct FrameLoop {
    config: RenderConfig,
    camera: Camera,
    scene: Scene,
    transform: Transform,
    buffer: ScreenBuffer,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: RenderConfig, camera: Camera, scene: Scene) -> Result<Self> {
        config.validate().context("invalid render configuration")?;
        scene.validate(&camera).context("invalid scene")?;

        let buffer = ScreenBuffer::new(config.width, config.height, config.background);
        Ok(Self {
            config,
            camera,
            scene,
            transform: Transform::zero(),
            buffer,
            frames: 0,
        })
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Frames flushed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Redraw every solid, in scene order, into a cleared buffer.
    ///
    /// Returns the number of samples that landed off-screen.
    pub fn render_frame(&mut self) -> usize {
        self.buffer.clear();

        let mut dropped = 0;
        for solid in &self.scene.solids {
            dropped +=
                self.buffer
                    .render_solid(solid, &self.transform, &self.camera, self.config.stride);
        }
        dropped
    }

    /// Render one frame to `sink` and step the rotation
    pub fn tick<W: Write>(&mut self, sink: &mut W) -> Result<usize> {
        let dropped = self.render_frame();
        self.buffer.flush(sink)?;
        sink.flush()?;

        self.transform.advance(&self.config.rotation_step);
        self.frames += 1;
        Ok(dropped)
    }

    /// Run until `interrupted` reports true or the frame limit is reached.
    ///
    /// `interrupted` is checked before every frame, so a stop request never
    /// leaves a half-drawn frame behind. Returns the number of frames
    /// rendered by this call.
    pub fn run<W, F>(&mut self, sink: &mut W, mut interrupted: F) -> Result<u64>
    where
        W: Write,
        F: FnMut() -> Result<bool>,
    {
        let interval = self.config.frame_interval;
        let started_at = self.frames;
        tracing::info!(
            solids = self.scene.len(),
            width = self.config.width,
            height = self.config.height,
            interval_ms = interval.as_millis() as u64,
            "render loop starting"
        );

        let mut window_start = Instant::now();
        let mut window_frames = 0u32;
        let mut window_dropped = 0usize;

        loop {
            if let Some(limit) = self.config.max_frames {
                if self.frames - started_at >= limit {
                    break;
                }
            }
            if interrupted()? {
                tracing::info!("interrupt requested");
                break;
            }

            let frame_start = Instant::now();
            window_dropped += self.tick(sink)?;
            window_frames += 1;

            let elapsed = frame_start.elapsed();
            if !interval.is_zero() && elapsed > interval {
                tracing::warn!(
                    frame = self.frames,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "frame took longer than the frame interval"
                );
            }

            let window = window_start.elapsed();
            if window >= Duration::from_secs(1) {
                tracing::debug!(
                    fps = window_frames as f64 / window.as_secs_f64(),
                    dropped_per_frame = window_dropped / window_frames as usize,
                    "frame rate"
                );
                window_start = Instant::now();
                window_frames = 0;
                window_dropped = 0;
            }

            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }

        let rendered = self.frames - started_at;
        tracing::info!(frames = rendered, "render loop stopped");
        Ok(rendered)
    }
}
