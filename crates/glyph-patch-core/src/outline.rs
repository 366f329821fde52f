// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Glyph outline port.
//!
//! The controller asks an [`OutlineSource`] for one glyph at a time. The
//! production adapter parses font files; tests use [`MemoryOutlineSource`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Glyph, RenderDegree};

/// Failure to obtain outlines from a font file.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// No file at the given path.
    #[error("font file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read font file {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a usable font.
    #[error("failed to parse font file {}: {reason}", path.display())]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}

impl FontLoadError {
    /// Path of the font that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// A requested character the font has no outline for.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("glyph {character:?} has no outline in {}", font.display())]
pub struct EmptyGlyphWarning {
    /// Character that came back empty.
    pub character: char,
    /// Font it was requested from.
    pub font: PathBuf,
}

/// A font file together with the degree its curves are rendered at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSelection {
    /// Font file on disk.
    pub path: PathBuf,
    /// Patch degree used for every glyph of this font.
    pub degree: RenderDegree,
}

impl FontSelection {
    /// Selection with an explicit degree.
    pub fn new(path: impl Into<PathBuf>, degree: RenderDegree) -> Self {
        Self {
            path: path.into(),
            degree,
        }
    }

    /// Selection whose degree follows the file's outline format.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let degree = implied_degree(&path);
        Self { path, degree }
    }

    /// File name for display; falls back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Degree native to a font file's outlines: CFF-flavoured OpenType is
/// cubic, TrueType is quadratic.
pub fn implied_degree(path: &Path) -> RenderDegree {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("otf" | "cff" | "otc") => RenderDegree::Cubic,
        _ => RenderDegree::Quadratic,
    }
}

/// Supplies glyph outlines, normalized to em units, from a font file.
pub trait OutlineSource {
    /// Outline of `character` in the font at `font`.
    ///
    /// A character the font does not map yields an empty [`Glyph`], not an
    /// error.
    fn glyph(&mut self, font: &Path, character: char) -> Result<Glyph, FontLoadError>;
}

/// In-memory outline source keyed by font path.
#[derive(Clone, Debug, Default)]
pub struct MemoryOutlineSource {
    fonts: HashMap<PathBuf, HashMap<char, Glyph>>,
    broken: HashSet<PathBuf>,
    requests: usize,
}

impl MemoryOutlineSource {
    /// Source with no fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_font`](Self::insert_font).
    #[must_use]
    pub fn with_font(
        mut self,
        path: impl Into<PathBuf>,
        glyphs: impl IntoIterator<Item = Glyph>,
    ) -> Self {
        self.insert_font(path, glyphs);
        self
    }

    /// Register a font's glyphs, replacing any previous entry.
    pub fn insert_font(&mut self, path: impl Into<PathBuf>, glyphs: impl IntoIterator<Item = Glyph>) {
        let path = path.into();
        self.broken.remove(&path);
        self.fonts
            .insert(path, glyphs.into_iter().map(|g| (g.character, g)).collect());
    }

    /// Forget a font; later requests report [`FontLoadError::NotFound`].
    pub fn remove_font(&mut self, path: &Path) {
        self.fonts.remove(path);
    }

    /// Make every request for `path` fail to parse.
    pub fn corrupt_font(&mut self, path: impl Into<PathBuf>) {
        self.broken.insert(path.into());
    }

    /// Number of glyph requests served so far, failures included.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl OutlineSource for MemoryOutlineSource {
    fn glyph(&mut self, font: &Path, character: char) -> Result<Glyph, FontLoadError> {
        self.requests += 1;
        if self.broken.contains(font) {
            return Err(FontLoadError::Parse {
                path: font.to_path_buf(),
                reason: "corrupt font data".into(),
            });
        }
        let glyphs = self.fonts.get(font).ok_or_else(|| FontLoadError::NotFound {
            path: font.to_path_buf(),
        })?;
        Ok(glyphs
            .get(&character)
            .cloned()
            .unwrap_or_else(|| Glyph::empty(character)))
    }
}
