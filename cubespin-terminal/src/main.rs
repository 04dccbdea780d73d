//! Cubespin - three cubes spinning in the terminal
//!
//! Controls:
//!   - Q / Esc / Ctrl-C: Quit

use anyhow::{Context, Result};
use clap::Parser;
use cubespin_core::{Camera, Scene};
use cubespin_terminal::{FrameLoop, RenderConfig, TerminalApp};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cubespin", version, about = "Spinning cubes rendered as text")]
struct Cli {
    /// Buffer width in characters.
    #[arg(long)]
    width: Option<usize>,

    /// Buffer height in characters.
    #[arg(long)]
    height: Option<usize>,

    /// Size the buffer to the current terminal (overrides --width/--height).
    #[arg(long)]
    fit: bool,

    /// Sleep between frames, in milliseconds.
    #[arg(long, default_value_t = 16)]
    interval_ms: u64,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Write logs to this file (stdout is the display).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let defaults = RenderConfig::default();
        let (width, height) = if self.fit {
            let (w, h) = crossterm::terminal::size().context("failed to query terminal size")?;
            (w as usize, h as usize)
        } else {
            (
                self.width.unwrap_or(defaults.width),
                self.height.unwrap_or(defaults.height),
            )
        };

        Ok(RenderConfig {
            frame_interval: Duration::from_millis(self.interval_ms),
            max_frames: self.frames,
            ..defaults.with_size(width, height)
        })
    }
}

fn init_logging(path: Option<&Path>, verbose: bool) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let config = cli.render_config()?;
    let frame_loop = FrameLoop::new(config, Camera::default(), Scene::three_cubes())?;

    let frames = TerminalApp::new(frame_loop).run()?;
    tracing::info!(frames, "exiting");
    Ok(())
}
