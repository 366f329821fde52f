// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Window-event handling for the App.

use crate::{app::App, input};
use egui_winit::winit::event::WindowEvent;

impl App {
    pub fn handle_window_event(
        &mut self,
        window_id: egui_winit::winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        if vp.window.id() != window_id {
            return;
        }
        let consumed = vp.egui_state.on_window_event(vp.window, &event).consumed;

        match &event {
            WindowEvent::CloseRequested => {
                self.shutdown_requested = true;
                return;
            }
            WindowEvent::Resized(size) => vp.gpu.resize(*size),
            _ => {}
        }
        if consumed {
            return;
        }

        let speed_step = self.controller.scroll().settings().speed_step;
        if let Some(action) =
            input::handle_window_event(&event, &self.prefs.fonts, &self.font_dir, speed_step)
        {
            self.apply_input(action);
        }
    }
}
