// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-advance placement of a phrase's glyphs along the x-axis.

/// Horizontal distance between consecutive glyph origins, in em units.
pub const GLYPH_ADVANCE: f32 = 0.6;

/// Word drawn in static text mode.
pub const STATIC_PHRASE: &str = "Adnan";

/// Phrase drawn in scrolling text mode.
pub const SCROLL_PHRASE: &str = "The quick brown fox jumps over the lazy dog.";

/// A run of characters laid out on a fixed advance grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Phrase {
    text: String,
    advance: f32,
}

impl Phrase {
    /// Phrase with an explicit per-glyph advance.
    pub fn new(text: impl Into<String>, advance: f32) -> Self {
        Self {
            text: text.into(),
            advance,
        }
    }

    /// Phrase on the default [`GLYPH_ADVANCE`] grid.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(text, GLYPH_ADVANCE)
    }

    /// The characters, in order.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advance between glyph origins.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Number of glyph slots (characters, including spaces).
    pub fn glyph_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Total laid-out width.
    pub fn width(&self) -> f32 {
        self.glyph_count() as f32 * self.advance
    }

    /// Translation below which the whole phrase has left the view.
    pub fn wrap_threshold(&self) -> f32 {
        -self.width()
    }

    /// Each character with its horizontal offset; the first glyph sits
    /// exactly at `translation`.
    pub fn offsets(&self, translation: f32) -> impl Iterator<Item = (char, f32)> + '_ {
        let advance = self.advance;
        self.text
            .chars()
            .enumerate()
            .map(move |(i, ch)| (ch, translation + i as f32 * advance))
    }
}
