// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Outline-to-patch conversion and scene control for the glyph patch viewer.

This crate provides:
- The outline data model (`Segment`, `Contour`, `Glyph`) and the flat
  `VertexStream` handed to a renderer.
- `PatchConverter`, which rewrites mixed-degree contours into uniform patches.
- `ControlPointDemoGenerator`, the fixed demonstration curve set.
- `SceneModeController`, the command-driven mode state machine, with
  `ScrollAnimator` for the scrolling phrase.
- The `OutlineSource` port and an in-memory implementation for tests.

Design notes:
- No windowing or GPU dependency; everything here is plain data.
- Single-threaded: the controller is owned by the frame loop.
"]

pub mod controller;
pub mod demo;
pub mod layout;
pub mod outline;
pub mod patch;
pub mod scroll;
pub mod types;

pub use controller::{
    reduce, Command, ControllerNotice, ControllerOptions, ControllerState, Effect, Frame,
    SceneModeController,
};
pub use demo::{ControlPointDemoGenerator, DemoGeometry};
pub use layout::{Phrase, GLYPH_ADVANCE, SCROLL_PHRASE, STATIC_PHRASE};
pub use outline::{
    implied_degree, EmptyGlyphWarning, FontLoadError, FontSelection, MemoryOutlineSource,
    OutlineSource,
};
pub use patch::{normalize_segment, DisplayTransform, PatchConverter};
pub use scroll::{ScrollAdvance, ScrollAnimator, ScrollSettings, ScrollState};
pub use types::{palette, Contour, Glyph, Patch, RenderDegree, SceneMode, Segment, VertexStream};
