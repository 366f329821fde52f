// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! egui overlay: scene status, key help and notices.

use egui::Context;
use glyph_patch_app_core::notice::{NoticeKind, NoticeView};
use glyph_patch_core::{RenderDegree, SceneMode, ScrollState};

/// Snapshot of what the HUD reports this frame.
pub struct HudModel<'a> {
    pub mode: SceneMode,
    pub degree: RenderDegree,
    pub font: Option<String>,
    pub scroll: Option<ScrollState>,
    pub fps: f32,
    pub frame_ms: f32,
    pub patch_count: usize,
    pub notices: &'a [NoticeView],
}

/// Checkbox-backed settings the HUD may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudToggles {
    pub auto_scroll: bool,
    pub vsync: bool,
}

const KEY_HELP: &str = "1/2 demo quadratic/cubic | 3-5 static fonts | 6-8 scrolling fonts\n\
                        Right step | Up/Down speed | A auto-scroll | H hide HUD | Esc quit";

fn mode_label(mode: SceneMode) -> &'static str {
    match mode {
        SceneMode::ControlPointDemo => "control-point demo",
        SceneMode::StaticText => "static text",
        SceneMode::ScrollingText => "scrolling text",
    }
}

fn notice_colour(kind: NoticeKind) -> egui::Color32 {
    match kind {
        NoticeKind::Info => egui::Color32::LIGHT_GRAY,
        NoticeKind::Warn => egui::Color32::from_rgb(240, 200, 80),
        NoticeKind::Error => egui::Color32::from_rgb(240, 90, 90),
    }
}

pub fn draw_hud(ctx: &Context, model: &HudModel<'_>, toggles: &mut HudToggles) {
    egui::Area::new("status".into())
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(format!(
                "{} | {} | {} patches",
                mode_label(model.mode),
                model.degree.label(),
                model.patch_count
            ));
            if let Some(font) = &model.font {
                ui.label(format!("font: {font}"));
            }
            if let Some(scroll) = model.scroll {
                ui.label(format!(
                    "speed {:.2} | translation {:.2}",
                    scroll.speed, scroll.translation
                ));
            }
        });

    egui::Area::new("notices".into())
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            for n in model.notices {
                let colour = notice_colour(n.kind).gamma_multiply(n.remaining.clamp(0.3, 1.0));
                let title = if n.repeats > 1 {
                    format!("{} (x{})", n.title, n.repeats)
                } else {
                    n.title.clone()
                };
                ui.colored_label(colour, title);
                if let Some(body) = &n.body {
                    ui.small(body.as_str());
                }
            }
        });

    egui::Area::new("perf".into())
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            ui.label(format!("FPS: {:.1} ({:.2} ms)", model.fps, model.frame_ms));
        });

    egui::Area::new("controls".into())
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -40.0))
        .show(ctx, |ui| {
            ui.label(KEY_HELP);
            ui.horizontal(|ui| {
                ui.checkbox(&mut toggles.auto_scroll, "Auto-scroll");
                ui.checkbox(&mut toggles.vsync, "VSync");
            });
        });

    egui::Area::new("watermark".into())
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            ui.label(format!("glyph-patch v{}", env!("CARGO_PKG_VERSION")));
        });
}
