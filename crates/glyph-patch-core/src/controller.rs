// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene mode state machine.
//!
//! Commands are reduced by the pure [`reduce`] into a next
//! [`ControllerState`] plus a list of [`Effect`]s. [`SceneModeController`]
//! runs those effects against its outline source and buffers. Font loads run
//! before anything is committed so a failed load leaves the controller
//! exactly as it was.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::demo::{ControlPointDemoGenerator, DemoGeometry};
use crate::layout::{Phrase, SCROLL_PHRASE, STATIC_PHRASE};
use crate::outline::{EmptyGlyphWarning, FontLoadError, FontSelection, OutlineSource};
use crate::patch::{DisplayTransform, PatchConverter};
use crate::scroll::{ScrollAdvance, ScrollAnimator, ScrollSettings, ScrollState};
use crate::types::{Glyph, RenderDegree, SceneMode, VertexStream};

/// One discrete input, already decoded from the keyboard.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Show the hand-authored curves at the given degree.
    SelectDemo(RenderDegree),
    /// Draw the static word with this font.
    SelectStaticFont(FontSelection),
    /// Scroll the phrase with this font, restarting at translation 0.
    SelectScrollFont(FontSelection),
    /// Move the scrolling phrase one step left.
    ScrollStep,
    /// Change scroll speed by the given delta.
    AdjustScrollSpeed(f32),
    /// End the main loop.
    Quit,
}

/// Work the controller performs after a reduction.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Load every glyph of the mode's phrase from this font.
    LoadFont(FontSelection),
    /// Drop the current text stream.
    ClearStream,
    /// Put the scroll translation back to 0.
    ResetScroll,
    /// Advance the scroll once.
    StepScroll,
    /// Change speed by the given delta.
    AdjustSpeed(f32),
    /// Loop termination was requested.
    Quit,
}

/// Mode, degree and font; everything [`reduce`] decides on.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerState {
    /// Active dataset.
    pub mode: SceneMode,
    /// Patch size of the active batch.
    pub degree: RenderDegree,
    /// Font of the last successful text-mode entry.
    pub font: Option<FontSelection>,
    /// False once `Quit` has been reduced.
    pub running: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            mode: SceneMode::ControlPointDemo,
            degree: RenderDegree::Quadratic,
            font: None,
            running: true,
        }
    }
}

/// Pure transition function.
pub fn reduce(state: &ControllerState, command: Command) -> (ControllerState, Vec<Effect>) {
    let mut next = state.clone();
    let mut fx = Vec::new();
    if !state.running {
        return (next, fx);
    }
    match command {
        Command::SelectDemo(degree) => {
            next.mode = SceneMode::ControlPointDemo;
            next.degree = degree;
        }
        Command::SelectStaticFont(font) => {
            next.mode = SceneMode::StaticText;
            next.degree = font.degree;
            next.font = Some(font.clone());
            fx.push(Effect::LoadFont(font));
            fx.push(Effect::ClearStream);
        }
        Command::SelectScrollFont(font) => {
            next.mode = SceneMode::ScrollingText;
            next.degree = font.degree;
            next.font = Some(font.clone());
            fx.push(Effect::LoadFont(font));
            fx.push(Effect::ClearStream);
            fx.push(Effect::ResetScroll);
        }
        Command::ScrollStep => {
            if state.mode == SceneMode::ScrollingText {
                fx.push(Effect::StepScroll);
            }
        }
        Command::AdjustScrollSpeed(delta) => {
            if state.mode == SceneMode::ScrollingText {
                fx.push(Effect::AdjustSpeed(delta));
            }
        }
        Command::Quit => {
            next.running = false;
            fx.push(Effect::Quit);
        }
    }
    (next, fx)
}

/// Construction-time settings for [`SceneModeController`].
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerOptions {
    /// Scroll speed bounds and restart offset.
    pub scroll: ScrollSettings,
    /// Advance the scroll on every frame, not only on [`Command::ScrollStep`].
    pub auto_scroll: bool,
    /// Em units → clip space mapping.
    pub transform: DisplayTransform,
    /// Word for static text mode.
    pub static_phrase: Phrase,
    /// Phrase for scrolling text mode.
    pub scroll_phrase: Phrase,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            scroll: ScrollSettings::default(),
            auto_scroll: true,
            transform: DisplayTransform::default(),
            static_phrase: Phrase::fixed(STATIC_PHRASE),
            scroll_phrase: Phrase::fixed(SCROLL_PHRASE),
        }
    }
}

/// Recoverable condition raised outside of [`SceneModeController::apply`].
#[derive(Debug)]
pub enum ControllerNotice {
    /// A phrase character had no outline.
    EmptyGlyph(EmptyGlyphWarning),
    /// Rebuilding after a scroll wrap failed; the previous buffer was kept.
    RebuildFailed(FontLoadError),
}

/// What to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Active dataset.
    pub mode: SceneMode,
    /// Patch size of `patches`.
    pub degree: RenderDegree,
    /// Curve control points grouped into patches.
    pub patches: &'a VertexStream,
    /// Control-point markers (demo only).
    pub markers: Option<&'a VertexStream>,
    /// Control polygon line list (demo only).
    pub polygon: Option<&'a VertexStream>,
    /// Scroll values while scrolling.
    pub scroll: Option<ScrollState>,
}

struct LoadedPhrase {
    glyphs: Vec<Glyph>,
    warnings: Vec<EmptyGlyphWarning>,
}

fn load_phrase<S: OutlineSource>(
    source: &mut S,
    font: &FontSelection,
    phrase: &Phrase,
) -> Result<LoadedPhrase, FontLoadError> {
    let mut glyphs = Vec::with_capacity(phrase.glyph_count());
    let mut warnings = Vec::new();
    let mut warned = HashSet::new();
    for ch in phrase.text().chars() {
        let glyph = source.glyph(&font.path, ch)?;
        if glyph.is_empty() && !ch.is_whitespace() && warned.insert(ch) {
            warnings.push(EmptyGlyphWarning {
                character: ch,
                font: font.path.clone(),
            });
        }
        glyphs.push(glyph);
    }
    Ok(LoadedPhrase { glyphs, warnings })
}

/// Owns mode state, scroll state and the vertex buffers for each frame.
pub struct SceneModeController<S> {
    source: S,
    state: ControllerState,
    converter: PatchConverter,
    demo_generator: ControlPointDemoGenerator,
    demo: DemoGeometry,
    glyphs: Vec<Glyph>,
    stream: VertexStream,
    dirty: bool,
    scroll: ScrollAnimator,
    auto_scroll: bool,
    scroll_stalled: bool,
    static_phrase: Phrase,
    scroll_phrase: Phrase,
    notices: Vec<ControllerNotice>,
}

impl<S: OutlineSource> SceneModeController<S> {
    /// Controller in the initial state (quadratic demo).
    pub fn new(source: S, options: ControllerOptions) -> Self {
        let scroll = ScrollAnimator::for_phrase(options.scroll, &options.scroll_phrase);
        Self {
            source,
            state: ControllerState::default(),
            converter: PatchConverter::new(options.transform),
            demo_generator: ControlPointDemoGenerator,
            demo: DemoGeometry::default(),
            glyphs: Vec::new(),
            stream: VertexStream::new(),
            dirty: false,
            scroll,
            auto_scroll: options.auto_scroll,
            scroll_stalled: false,
            static_phrase: options.static_phrase,
            scroll_phrase: options.scroll_phrase,
            notices: Vec::new(),
        }
    }

    /// Current mode, degree and font.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// False after [`Command::Quit`].
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Text-mode vertex stream as last built.
    pub fn stream(&self) -> &VertexStream {
        &self.stream
    }

    /// Scroll animator (translation, speed, settings).
    pub fn scroll(&self) -> &ScrollAnimator {
        &self.scroll
    }

    /// Whether [`frame`](Self::frame) advances the scroll.
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    /// Toggle per-frame scroll advance.
    pub fn set_auto_scroll(&mut self, on: bool) {
        self.auto_scroll = on;
    }

    /// True after a rebuild on wrap failed. The scroll holds still until the
    /// next mode command.
    pub fn scroll_stalled(&self) -> bool {
        self.scroll_stalled
    }

    /// Mutable access to the outline source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Drain warnings and swallowed failures raised since the last call.
    pub fn take_notices(&mut self) -> Vec<ControllerNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Reduce `command` and run its effects.
    ///
    /// # Errors
    /// Returns the [`FontLoadError`] of a failed font load. In that case no
    /// state, font or buffer has changed.
    pub fn apply(&mut self, command: Command) -> Result<(), FontLoadError> {
        let selects_mode = matches!(
            command,
            Command::SelectDemo(_) | Command::SelectStaticFont(_) | Command::SelectScrollFont(_)
        );
        let (next, effects) = reduce(&self.state, command);

        let mut staged = None;
        for effect in &effects {
            if let Effect::LoadFont(font) = effect {
                let phrase = match next.mode {
                    SceneMode::ScrollingText => &self.scroll_phrase,
                    _ => &self.static_phrase,
                };
                match load_phrase(&mut self.source, font, phrase) {
                    Ok(loaded) => {
                        info!(
                            font = %font.path.display(),
                            glyphs = loaded.glyphs.len(),
                            "font loaded"
                        );
                        staged = Some(loaded);
                    }
                    Err(err) => {
                        warn!(?err, "font load failed; keeping previous scene");
                        return Err(err);
                    }
                }
            }
        }

        if next.mode != self.state.mode || next.degree != self.state.degree {
            debug!(mode = ?next.mode, degree = ?next.degree, "scene transition");
        }
        self.state = next;
        if selects_mode {
            self.scroll_stalled = false;
        }

        for effect in effects {
            match effect {
                Effect::LoadFont(_) => {
                    if let Some(loaded) = staged.take() {
                        self.adopt(loaded);
                    }
                }
                Effect::ClearStream => {
                    self.stream.clear();
                    self.dirty = true;
                }
                Effect::ResetScroll => self.scroll.reset(),
                Effect::StepScroll => self.step_scroll(),
                Effect::AdjustSpeed(delta) => {
                    let speed = self.scroll.adjust_speed(delta);
                    debug!(speed, "scroll speed");
                }
                Effect::Quit => info!("quit requested"),
            }
        }
        Ok(())
    }

    /// Regenerate whatever the active mode needs and return it.
    ///
    /// The demo is rebuilt every frame. Text is rebuilt only after a state
    /// change or a scroll step.
    pub fn frame(&mut self) -> Frame<'_> {
        match self.state.mode {
            SceneMode::ControlPointDemo => {
                self.demo_generator
                    .generate_into(self.state.degree, &mut self.demo);
            }
            SceneMode::StaticText => {
                if self.dirty {
                    self.rebuild_text();
                }
            }
            SceneMode::ScrollingText => {
                if self.auto_scroll && self.state.running {
                    self.step_scroll();
                }
                if self.dirty {
                    self.rebuild_text();
                }
            }
        }
        self.view()
    }

    /// The current buffers without regenerating anything.
    pub fn view(&self) -> Frame<'_> {
        let demo = self.state.mode == SceneMode::ControlPointDemo;
        Frame {
            mode: self.state.mode,
            degree: self.state.degree,
            patches: if demo { &self.demo.curves } else { &self.stream },
            markers: demo.then_some(&self.demo.markers),
            polygon: demo.then_some(&self.demo.polygon),
            scroll: (self.state.mode == SceneMode::ScrollingText).then(|| self.scroll.state()),
        }
    }

    fn adopt(&mut self, loaded: LoadedPhrase) {
        for warning in loaded.warnings {
            warn!(character = ?warning.character, font = %warning.font.display(), "empty glyph");
            self.notices.push(ControllerNotice::EmptyGlyph(warning));
        }
        self.glyphs = loaded.glyphs;
    }

    fn step_scroll(&mut self) {
        if self.scroll_stalled {
            return;
        }
        let before = self.scroll.state();
        match self.scroll.advance() {
            ScrollAdvance::Moved => self.dirty = true,
            ScrollAdvance::Wrapped => {
                let Some(font) = self.state.font.clone() else {
                    self.dirty = true;
                    return;
                };
                match load_phrase(&mut self.source, &font, &self.scroll_phrase) {
                    Ok(loaded) => {
                        debug!(translation = self.scroll.translation(), "scroll wrapped");
                        self.adopt(loaded);
                        self.stream.clear();
                        self.dirty = true;
                    }
                    Err(err) => {
                        warn!(?err, "rebuild after wrap failed; keeping previous buffer");
                        self.scroll.restore(before);
                        self.scroll_stalled = true;
                        self.notices.push(ControllerNotice::RebuildFailed(err));
                    }
                }
            }
        }
    }

    fn rebuild_text(&mut self) {
        let (phrase, translation) = match self.state.mode {
            SceneMode::ScrollingText => (&self.scroll_phrase, self.scroll.translation()),
            _ => (&self.static_phrase, 0.0),
        };
        self.stream.clear();
        for (glyph, (_, offset)) in self.glyphs.iter().zip(phrase.offsets(translation)) {
            self.converter
                .convert_glyph(glyph, self.state.degree, offset, &mut self.stream);
        }
        self.dirty = false;
    }
}
