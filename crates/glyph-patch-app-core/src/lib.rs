// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Application services for the glyph-patch viewer (config, prefs, notices).
//! Keeps the winit/wgpu layer thin and free of persistence logic.

pub mod config;
pub mod notice;
pub mod prefs;
