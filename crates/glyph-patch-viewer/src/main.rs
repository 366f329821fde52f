// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! glyph-patch-viewer: draws font outlines and demo curves as GPU-evaluated
//! Bezier patches. Main parses flags and wires App into winit.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use egui_winit::winit::event_loop::EventLoop;

mod app;
mod app_events;
mod app_frame;
mod geometry;
mod gpu;
mod hud;
mod input;
mod perf;
mod render;
mod viewport;

#[derive(Parser, Debug)]
#[command(author, version, about = "Glyph patch viewer")]
pub(crate) struct Args {
    /// Directory the key-bound font files are resolved against
    #[arg(long, default_value = "fonts")]
    pub(crate) font_dir: PathBuf,
    /// Initial scroll speed (clamped to the allowed range)
    #[arg(long)]
    pub(crate) speed: Option<f32>,
    /// Advance the scrolling phrase only on the right arrow key
    #[arg(long)]
    pub(crate) no_auto_scroll: bool,
    /// Start from default prefs instead of the saved ones
    #[arg(long)]
    pub(crate) reset_prefs: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();
    let args = Args::parse();
    let event_loop = EventLoop::new()?;
    let mut app = app::App::new(&args);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
