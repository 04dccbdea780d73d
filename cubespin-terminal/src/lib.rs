//! Terminal-based point-sampled rasterizer for spinning solids
use anyhow::Result;
use std::io::{stdout, BufWriter};

pub mod config;
pub mod frame_loop;
pub mod renderer;
pub mod session;

pub use config::RenderConfig;
pub use frame_loop::FrameLoop;
pub use renderer::ScreenBuffer;
pub use session::TerminalSession;

/// Runs a [`FrameLoop`] against the real terminal
pub struct TerminalApp {
    frame_loop: FrameLoop,
}

impl TerminalApp {
    pub fn new(frame_loop: FrameLoop) -> Self {
        Self { frame_loop }
    }

    /// Render until a quit key or the frame limit; returns frames rendered
    pub fn run(&mut self) -> Result<u64> {
        let mut term = TerminalSession::enter()?;

        let result = {
            let mut out = BufWriter::new(stdout().lock());
            self.frame_loop.run(&mut out, session::poll_interrupt)
        };

        // Cleanup
        let restored = term.exit();
        let frames = result?;
        restored?;
        Ok(frames)
    }
}
