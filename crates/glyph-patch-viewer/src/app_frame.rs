// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-frame tick: advance the scene, draw the HUD, render.

use std::time::Instant;

use glyph_patch_core::FontSelection;
use tracing::error;

use crate::{
    app::App,
    hud::{draw_hud, HudModel, HudToggles},
    render::{self, RenderStatus},
};

impl App {
    pub fn frame(&mut self) {
        let now = Instant::now();
        self.perf
            .push(now.duration_since(self.last_frame).as_secs_f32() * 1000.0);
        self.last_frame = now;

        let (mode, degree, scroll) = {
            let frame = self.controller.frame();
            self.geometry.fill(&frame);
            (frame.mode, frame.degree, frame.scroll)
        };
        self.drain_controller_notices();
        self.notices.prune(now);
        let notices = self.notices.visible(now);
        let font = self
            .controller
            .state()
            .font
            .as_ref()
            .filter(|_| mode.is_text())
            .map(FontSelection::display_name);

        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        let raw_input = vp.egui_state.take_egui_input(vp.window);

        let model = HudModel {
            mode,
            degree,
            font,
            scroll,
            fps: self.perf.fps(),
            frame_ms: self.perf.last_ms(),
            patch_count: self.geometry.patches.len(),
            notices: &notices,
        };
        let before = HudToggles {
            auto_scroll: self.controller.auto_scroll(),
            vsync: self.prefs.hud.vsync,
        };
        let mut toggles = before;
        let show_hud = self.prefs.hud.show_hud;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_hud {
                draw_hud(ctx, &model, &mut toggles);
            }
        });
        vp.egui_state
            .handle_platform_output(vp.window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [vp.gpu.config.width, vp.gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        if toggles.vsync != before.vsync {
            vp.gpu.set_vsync(toggles.vsync);
            self.prefs.hud.vsync = toggles.vsync;
        }
        if toggles.auto_scroll != before.auto_scroll {
            self.controller.set_auto_scroll(toggles.auto_scroll);
        }

        vp.gpu.upload(&self.geometry);
        match render::render_frame(vp, &paint_jobs, full_output.textures_delta, &screen_desc) {
            RenderStatus::Presented | RenderStatus::Skipped => {}
            RenderStatus::OutOfMemory => {
                error!("surface out of memory");
                self.fatal = Some(anyhow::anyhow!("GPU surface ran out of memory"));
                self.shutdown_requested = true;
            }
        }
        vp.window.request_redraw();
    }
}
