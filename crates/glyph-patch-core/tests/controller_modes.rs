// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! SceneModeController: mode resets, speed clamp, scroll wrap and failure
//! recovery, driven through an in-memory outline source.

use approx::assert_relative_eq;
use glam::Vec2;
use glyph_patch_core::{
    Command, Contour, ControllerNotice, ControllerOptions, FontLoadError, FontSelection, Glyph,
    MemoryOutlineSource, RenderDegree, SceneMode, SceneModeController, Segment, SCROLL_PHRASE,
};

const STATIC_FONT: &str = "fonts/Lora-Italic.ttf";
const SCROLL_FONT: &str = "fonts/Inconsolata.otf";

fn bar(ch: char) -> Glyph {
    Glyph {
        character: ch,
        contours: vec![Contour::from(vec![
            Segment::Line([Vec2::ZERO, Vec2::X]),
            Segment::Quadratic([Vec2::X, Vec2::ONE, Vec2::Y]),
        ])],
    }
}

fn full_alphabet() -> Vec<Glyph> {
    SCROLL_PHRASE
        .chars()
        .chain("Adnan".chars())
        .filter(|c| !c.is_whitespace())
        .map(bar)
        .collect()
}

fn controller(auto_scroll: bool) -> SceneModeController<MemoryOutlineSource> {
    let source = MemoryOutlineSource::new()
        .with_font(STATIC_FONT, full_alphabet())
        .with_font(SCROLL_FONT, full_alphabet());
    SceneModeController::new(
        source,
        ControllerOptions {
            auto_scroll,
            ..ControllerOptions::default()
        },
    )
}

#[test]
fn entering_text_modes_clears_stream_before_regeneration() {
    let mut c = controller(false);
    let _ = c.frame();

    c.apply(Command::SelectStaticFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap();
    assert!(c.stream().is_empty());
    let frame = c.frame();
    assert_eq!(frame.mode, SceneMode::StaticText);
    assert!(!frame.patches.is_empty());

    c.apply(Command::SelectScrollFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    assert!(c.stream().is_empty());
    assert!(!c.frame().patches.is_empty());

    // Re-entering the same mode is a hard reset too.
    c.apply(Command::SelectScrollFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    assert!(c.stream().is_empty());
}

#[test]
fn text_stream_is_patch_aligned_at_font_degree() {
    let mut c = controller(false);
    c.apply(Command::SelectStaticFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    let frame = c.frame();
    assert_eq!(frame.degree, RenderDegree::Cubic);
    // "Adnan": five glyphs, two segments each.
    assert_eq!(frame.patches.len(), 5 * 2 * 4);
    assert!(frame.markers.is_none());
}

#[test]
fn demo_selection_sets_degree_and_keeps_text_buffer() {
    let mut c = controller(false);
    c.apply(Command::SelectStaticFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap();
    let before = c.frame().patches.clone();
    c.apply(Command::SelectDemo(RenderDegree::Cubic)).unwrap();
    let frame = c.frame();
    assert_eq!(frame.mode, SceneMode::ControlPointDemo);
    assert_eq!(frame.patches.len(), 20);
    assert_eq!(frame.polygon.map(|p| p.len()), Some(40));
    assert_eq!(c.stream(), &before);
}

#[test]
fn scroll_translation_resets_on_entry() {
    let mut c = controller(false);
    let scroll = FontSelection::from_path(SCROLL_FONT);
    c.apply(Command::SelectScrollFont(scroll.clone())).unwrap();
    for _ in 0..10 {
        c.apply(Command::ScrollStep).unwrap();
    }
    assert!(c.scroll().translation() < 0.0);
    c.apply(Command::SelectScrollFont(scroll)).unwrap();
    assert_relative_eq!(c.scroll().translation(), 0.0);
}

#[test]
fn speed_is_clamped_in_both_directions() {
    let mut c = controller(false);
    c.apply(Command::SelectScrollFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    for _ in 0..50 {
        c.apply(Command::AdjustScrollSpeed(0.02)).unwrap();
        assert!(c.scroll().speed() <= 0.2);
    }
    assert_relative_eq!(c.scroll().speed(), 0.2);
    for _ in 0..50 {
        c.apply(Command::AdjustScrollSpeed(-0.02)).unwrap();
        assert!(c.scroll().speed() >= 0.02);
    }
    assert_relative_eq!(c.scroll().speed(), 0.02);
    c.apply(Command::AdjustScrollSpeed(-10.0)).unwrap();
    assert_relative_eq!(c.scroll().speed(), 0.02);
}

#[test]
fn speed_commands_are_ignored_outside_scrolling() {
    let mut c = controller(false);
    c.apply(Command::AdjustScrollSpeed(0.1)).unwrap();
    c.apply(Command::ScrollStep).unwrap();
    assert_relative_eq!(c.scroll().speed(), 0.02);
    assert_relative_eq!(c.scroll().translation(), 0.0);
}

#[test]
fn scroll_wraps_to_restart_offset_without_drift() {
    let mut c = controller(false);
    c.apply(Command::SelectScrollFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap();
    assert_relative_eq!(c.scroll().wrap_threshold(), -26.4, epsilon = 1e-5);
    assert_relative_eq!(c.scroll().speed(), 0.02);
    let expected = (26.4_f64 / 0.02_f64).ceil() as i64;
    assert_eq!(expected, 1320);

    let mut wrapped_at = None;
    for step in 1..=expected + 2 {
        c.apply(Command::ScrollStep).unwrap();
        if c.scroll().translation() > 0.0 {
            wrapped_at = Some(step);
            break;
        }
    }
    let wrapped_at = wrapped_at.expect("scroll never wrapped");
    assert_eq!(wrapped_at, expected);
    assert_relative_eq!(c.scroll().translation(), 3.0);

    // Leftmost glyph starts at its own origin (0, 0), placed at the restart offset.
    let frame = c.frame();
    let transform = glyph_patch_core::DisplayTransform::default();
    assert_eq!(frame.patches.positions()[0], transform.apply(Vec2::ZERO, 3.0));
    assert_eq!(frame.scroll.map(|s| s.translation), Some(3.0));
}

#[test]
fn auto_scroll_advances_each_frame() {
    let mut c = controller(true);
    c.apply(Command::SelectScrollFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    let _ = c.frame();
    let _ = c.frame();
    assert_relative_eq!(c.scroll().translation(), -0.04);
}

#[test]
fn failed_font_load_leaves_everything_unchanged() {
    let mut c = controller(false);
    c.apply(Command::SelectStaticFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap();
    let stream = c.frame().patches.clone();
    let state = c.state().clone();

    let missing = FontSelection::from_path("fonts/Missing.otf");
    let err = c
        .apply(Command::SelectScrollFont(missing.clone()))
        .unwrap_err();
    assert!(matches!(err, FontLoadError::NotFound { .. }));
    assert_eq!(c.state(), &state);
    assert_eq!(c.stream(), &stream);

    c.source_mut().corrupt_font(STATIC_FONT);
    let err = c
        .apply(Command::SelectStaticFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap_err();
    assert!(matches!(err, FontLoadError::Parse { .. }));
    assert_eq!(c.state(), &state);
    assert_eq!(c.frame().patches, &stream);
}

#[test]
fn failed_rebuild_after_wrap_keeps_buffer_and_offset() {
    let mut c = controller(false);
    c.apply(Command::SelectScrollFont(FontSelection::from_path(SCROLL_FONT)))
        .unwrap();
    for _ in 0..20 {
        c.apply(Command::AdjustScrollSpeed(0.02)).unwrap();
    }
    // Walk up to the last step before the wrap.
    let threshold = c.scroll().wrap_threshold();
    while c.scroll().translation() - c.scroll().speed() >= threshold {
        c.apply(Command::ScrollStep).unwrap();
    }
    let stream = c.frame().patches.clone();
    let translation = c.scroll().translation();

    c.source_mut().remove_font(std::path::Path::new(SCROLL_FONT));
    c.apply(Command::ScrollStep).unwrap();
    assert_relative_eq!(c.scroll().translation(), translation);
    assert_eq!(c.frame().patches, &stream);
    let notices = c.take_notices();
    assert!(notices
        .iter()
        .any(|n| matches!(n, ControllerNotice::RebuildFailed(FontLoadError::NotFound { .. }))));
}

#[test]
fn failed_rebuild_stalls_scroll_until_next_mode_command() {
    let mut c = controller(true);
    let scroll = FontSelection::from_path(SCROLL_FONT);
    c.apply(Command::SelectScrollFont(scroll.clone())).unwrap();
    for _ in 0..20 {
        c.apply(Command::AdjustScrollSpeed(0.02)).unwrap();
    }
    let threshold = c.scroll().wrap_threshold();
    while c.scroll().translation() - c.scroll().speed() >= threshold {
        c.apply(Command::ScrollStep).unwrap();
    }
    let translation = c.scroll().translation();
    let _ = c.take_notices();

    c.source_mut().remove_font(std::path::Path::new(SCROLL_FONT));
    let requests = c.source_mut().requests();
    for _ in 0..5 {
        let _ = c.frame();
    }
    c.apply(Command::ScrollStep).unwrap();

    assert_eq!(c.source_mut().requests() - requests, 1);
    assert!(c.scroll_stalled());
    assert_relative_eq!(c.scroll().translation(), translation);
    let failures = c
        .take_notices()
        .into_iter()
        .filter(|n| matches!(n, ControllerNotice::RebuildFailed(_)))
        .count();
    assert_eq!(failures, 1);

    // A mode command is the way out.
    c.source_mut().insert_font(SCROLL_FONT, full_alphabet());
    c.apply(Command::SelectScrollFont(scroll)).unwrap();
    assert!(!c.scroll_stalled());
    let _ = c.frame();
    assert!(c.scroll().translation() < 0.0);
}

#[test]
fn missing_characters_warn_once_each() {
    let source = MemoryOutlineSource::new().with_font(STATIC_FONT, [bar('A')]);
    let mut c = SceneModeController::new(source, ControllerOptions::default());
    c.apply(Command::SelectStaticFont(FontSelection::from_path(STATIC_FONT)))
        .unwrap();
    let warned: Vec<char> = c
        .take_notices()
        .into_iter()
        .filter_map(|n| match n {
            ControllerNotice::EmptyGlyph(w) => Some(w.character),
            ControllerNotice::RebuildFailed(_) => None,
        })
        .collect();
    assert_eq!(warned, vec!['d', 'n', 'a']);
    // Only 'A' contributes vertices.
    assert_eq!(c.frame().patches.len(), 2 * 3);
}

#[test]
fn quit_stops_the_loop_and_ignores_later_commands() {
    let mut c = controller(true);
    c.apply(Command::Quit).unwrap();
    assert!(!c.is_running());
    c.apply(Command::SelectDemo(RenderDegree::Cubic)).unwrap();
    assert_eq!(c.state().degree, RenderDegree::Quadratic);
}
