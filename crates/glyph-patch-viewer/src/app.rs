// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level application wiring and event loop handler.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use egui_winit::winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowAttributes},
};
use egui_winit::State as EguiWinitState;
use glyph_patch_app_core::{
    config::ConfigService,
    notice::{NoticeBoard, NoticeKind},
    prefs::{PrefsPort, ViewerPrefs},
};
use glyph_patch_config_fs::FsConfigStore;
use glyph_patch_core::{
    Command, ControllerNotice, ControllerOptions, SceneModeController, ScrollSettings,
};
use glyph_patch_fonts::TtfOutlineSource;
use tracing::{error, info, warn};

use crate::{
    geometry::FrameGeometry, gpu::Gpu, input::InputAction, perf::PerfStats, viewport::Viewport,
    Args,
};

pub struct App {
    pub viewport: Option<Viewport>,
    pub egui_ctx: egui::Context,
    pub config: Option<Box<dyn PrefsPort>>,
    pub prefs: ViewerPrefs,
    pub notices: NoticeBoard,
    pub controller: SceneModeController<TtfOutlineSource>,
    pub geometry: FrameGeometry,
    pub perf: PerfStats,
    pub font_dir: PathBuf,
    pub last_frame: Instant,
    pub shutdown_requested: bool,
    pub fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new(args: &Args) -> Self {
        let now = Instant::now();
        let mut notices = NoticeBoard::new(16);

        let config: Option<Box<dyn PrefsPort>> = match FsConfigStore::new() {
            Ok(store) => {
                info!(dir = %store.base().display(), "prefs directory");
                Some(Box::new(ConfigService::new(store)))
            }
            Err(err) => {
                warn!(%err, "config store unavailable");
                notices.post(
                    NoticeKind::Warn,
                    "Config store unavailable",
                    Some(format!("{err}; prefs won't persist this session")),
                    now,
                );
                None
            }
        };

        let prefs = if args.reset_prefs {
            info!("ignoring saved prefs");
            ViewerPrefs::default()
        } else {
            match config.as_ref().map(|c| c.load_prefs()) {
                Some(Ok(Some(prefs))) => prefs,
                Some(Ok(None)) | None => ViewerPrefs::default(),
                Some(Err(err)) => {
                    warn!(%err, "could not load prefs");
                    notices.post(
                        NoticeKind::Warn,
                        "Prefs not loaded",
                        Some(err.to_string()),
                        now,
                    );
                    ViewerPrefs::default()
                }
            }
        };

        let scroll = ScrollSettings {
            initial_speed: args.speed.unwrap_or(prefs.scroll.initial_speed),
            ..ScrollSettings::default()
        }
        .sanitized();
        let options = ControllerOptions {
            scroll,
            auto_scroll: prefs.scroll.auto_scroll && !args.no_auto_scroll,
            ..ControllerOptions::default()
        };

        Self {
            viewport: None,
            egui_ctx: egui::Context::default(),
            config,
            prefs,
            notices,
            controller: SceneModeController::new(TtfOutlineSource::new(), options),
            geometry: FrameGeometry::default(),
            perf: PerfStats::default(),
            font_dir: args.font_dir.clone(),
            last_frame: now,
            shutdown_requested: false,
            fatal: None,
        }
    }

    pub fn apply_command(&mut self, cmd: Command) {
        if let Err(err) = self.controller.apply(cmd) {
            self.notices.post(
                NoticeKind::Warn,
                "Font load failed",
                Some(err.to_string()),
                Instant::now(),
            );
        }
        self.drain_controller_notices();
        if !self.controller.is_running() {
            self.shutdown_requested = true;
        }
    }

    pub fn apply_input(&mut self, action: InputAction) {
        match action {
            InputAction::Command(cmd) => self.apply_command(cmd),
            InputAction::ToggleHud => self.prefs.hud.show_hud = !self.prefs.hud.show_hud,
            InputAction::ToggleAutoScroll => {
                let on = !self.controller.auto_scroll();
                self.controller.set_auto_scroll(on);
            }
        }
    }

    pub fn drain_controller_notices(&mut self) {
        let now = Instant::now();
        for notice in self.controller.take_notices() {
            match notice {
                ControllerNotice::EmptyGlyph(w) => {
                    self.notices.post(
                        NoticeKind::Info,
                        "Empty glyph",
                        Some(format!(
                            "{:?} has no outline in {}",
                            w.character,
                            w.font.display()
                        )),
                        now,
                    );
                }
                ControllerNotice::RebuildFailed(err) => {
                    self.notices.post(
                        NoticeKind::Warn,
                        "Scroll rebuild failed",
                        Some(err.to_string()),
                        now,
                    );
                }
            }
        }
    }

    /// Fold live settings back into the prefs and persist them.
    pub fn save_prefs(&mut self) {
        self.prefs.scroll.initial_speed = self.controller.scroll().speed();
        self.prefs.scroll.auto_scroll = self.controller.auto_scroll();
        if let Some(cfg) = &self.config {
            if let Err(err) = cfg.save_prefs(&self.prefs) {
                warn!(%err, "could not save prefs");
            }
        }
    }

    /// Error that ended the event loop, if any.
    pub fn into_result(self) -> Result<()> {
        self.fatal.map_or(Ok(()), Err)
    }

    fn create_viewport(&self, event_loop: &ActiveEventLoop) -> Result<Viewport> {
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Glyph Patch Viewer")
                .with_visible(true),
        )?;
        let window: &'static Window = Box::leak(Box::new(window));
        let gpu = pollster::block_on(Gpu::new(window, self.prefs.hud.vsync))?;
        let egui_state = EguiWinitState::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            event_loop,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.config.format,
            egui_wgpu::RendererOptions::default(),
        );
        Ok(Viewport {
            window,
            gpu,
            egui_state,
            egui_renderer,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewport.is_some() {
            return;
        }
        match self.create_viewport(event_loop) {
            Ok(vp) => {
                event_loop.set_control_flow(ControlFlow::Poll);
                self.viewport = Some(vp);
                self.last_frame = Instant::now();
            }
            Err(err) => {
                error!(%err, "viewer startup failed");
                self.fatal = Some(err.context("could not open the viewer window"));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: egui_winit::winit::window::WindowId,
        event: WindowEvent,
    ) {
        self.handle_window_event(window_id, event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown_requested {
            self.save_prefs();
            event_loop.exit();
            return;
        }
        if self.viewport.is_none() {
            return;
        }
        self.frame();
    }
}
