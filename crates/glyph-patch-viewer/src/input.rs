// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Input handling: map key presses onto controller commands and HUD toggles.

use std::path::Path;

use egui_winit::winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};
use glyph_patch_app_core::prefs::{FontSlot, SlotMode};
use glyph_patch_core::{Command, RenderDegree};

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Command(Command),
    ToggleHud,
    ToggleAutoScroll,
}

/// Keys that keep firing while held.
fn repeats(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::ArrowRight | KeyCode::ArrowUp | KeyCode::ArrowDown
    )
}

fn slot_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Digit3 => Some(0),
        KeyCode::Digit4 => Some(1),
        KeyCode::Digit5 => Some(2),
        KeyCode::Digit6 => Some(3),
        KeyCode::Digit7 => Some(4),
        KeyCode::Digit8 => Some(5),
        _ => None,
    }
}

pub fn action_for_key(
    code: KeyCode,
    slots: &[FontSlot],
    font_dir: &Path,
    speed_step: f32,
) -> Option<InputAction> {
    if let Some(idx) = slot_index(code) {
        let slot = slots.get(idx)?;
        let selection = slot.selection(font_dir);
        let cmd = match slot.mode {
            SlotMode::Static => Command::SelectStaticFont(selection),
            SlotMode::Scroll => Command::SelectScrollFont(selection),
        };
        return Some(InputAction::Command(cmd));
    }
    let cmd = match code {
        KeyCode::Digit1 => Command::SelectDemo(RenderDegree::Quadratic),
        KeyCode::Digit2 => Command::SelectDemo(RenderDegree::Cubic),
        KeyCode::ArrowRight => Command::ScrollStep,
        KeyCode::ArrowUp => Command::AdjustScrollSpeed(speed_step),
        KeyCode::ArrowDown => Command::AdjustScrollSpeed(-speed_step),
        KeyCode::Escape => Command::Quit,
        KeyCode::KeyH => return Some(InputAction::ToggleHud),
        KeyCode::KeyA => return Some(InputAction::ToggleAutoScroll),
        _ => return None,
    };
    Some(InputAction::Command(cmd))
}

/// Translate a window event; only key presses produce actions.
pub fn handle_window_event(
    event: &WindowEvent,
    slots: &[FontSlot],
    font_dir: &Path,
    speed_step: f32,
) -> Option<InputAction> {
    let WindowEvent::KeyboardInput { event, .. } = event else {
        return None;
    };
    if event.state != ElementState::Pressed {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    if event.repeat && !repeats(code) {
        return None;
    }
    action_for_key(code, slots, font_dir, speed_step)
}
