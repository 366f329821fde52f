// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Font-file [`OutlineSource`] for glyph-patch.
//!
//! [`TtfOutlineSource`] reads TrueType and CFF-flavoured OpenType files with
//! `ttf-parser` and turns glyph outlines into [`Contour`]s of [`Segment`]s in
//! em units (one em spans `0.0..1.0`). Font bytes are cached per path after
//! the first successful parse.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;
use glyph_patch_core::{Contour, FontLoadError, Glyph, OutlineSource, Segment};
use tracing::debug;

/// Outline source backed by font files on disk.
#[derive(Debug, Default)]
pub struct TtfOutlineSource {
    cache: HashMap<PathBuf, Vec<u8>>,
}

impl TtfOutlineSource {
    /// Source with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fonts currently cached.
    pub fn cached_fonts(&self) -> usize {
        self.cache.len()
    }

    fn bytes(&mut self, path: &Path) -> Result<&[u8], FontLoadError> {
        if !self.cache.contains_key(path) {
            let data = read_font(path)?;
            let face = parse(&data, path)?;
            debug!(
                font = %path.display(),
                glyphs = face.number_of_glyphs(),
                units_per_em = face.units_per_em(),
                "font parsed"
            );
            self.cache.insert(path.to_path_buf(), data);
        }
        self.cache
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| FontLoadError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

impl OutlineSource for TtfOutlineSource {
    fn glyph(&mut self, font: &Path, character: char) -> Result<Glyph, FontLoadError> {
        let data = self.bytes(font)?;
        glyph_from_bytes(data, font, character)
    }
}

/// Extract `character` from in-memory font data. `path` is only used for
/// error reporting.
///
/// # Errors
/// [`FontLoadError::Parse`] when `data` is not a font.
pub fn glyph_from_bytes(data: &[u8], path: &Path, character: char) -> Result<Glyph, FontLoadError> {
    let face = parse(data, path)?;
    let Some(id) = face.glyph_index(character) else {
        return Ok(Glyph::empty(character));
    };
    let mut collector = ContourCollector::new(1.0 / f32::from(face.units_per_em()));
    if face.outline_glyph(id, &mut collector).is_none() {
        // Mapped but outline-less (e.g. space).
        return Ok(Glyph::empty(character));
    }
    Ok(Glyph {
        character,
        contours: collector.finish(),
    })
}

fn read_font(path: &Path) -> Result<Vec<u8>, FontLoadError> {
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => FontLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn parse<'a>(data: &'a [u8], path: &Path) -> Result<ttf_parser::Face<'a>, FontLoadError> {
    let face = ttf_parser::Face::parse(data, 0).map_err(|e| FontLoadError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if face.units_per_em() == 0 {
        return Err(FontLoadError::Parse {
            path: path.to_path_buf(),
            reason: "units per em is zero".into(),
        });
    }
    Ok(face)
}

/// Collects `ttf-parser` outline callbacks into contours.
///
/// Each closed contour gets an explicit closing line when its last point
/// differs from its first.
struct ContourCollector {
    scale: f32,
    contours: Vec<Contour>,
    current: Contour,
    start: Vec2,
    cursor: Vec2,
}

impl ContourCollector {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            contours: Vec::new(),
            current: Contour::new(),
            start: Vec2::ZERO,
            cursor: Vec2::ZERO,
        }
    }

    fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) * self.scale
    }

    fn push(&mut self, segment: Segment) {
        self.cursor = segment.end();
        self.current.push(segment);
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<Contour> {
        self.flush();
        self.contours
    }
}

impl ttf_parser::OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        self.start = self.point(x, y);
        self.cursor = self.start;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.push(Segment::Line([self.cursor, p]));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.point(x1, y1);
        let p = self.point(x, y);
        self.push(Segment::Quadratic([self.cursor, c, p]));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.point(x1, y1);
        let c2 = self.point(x2, y2);
        let p = self.point(x, y);
        self.push(Segment::Cubic([self.cursor, c1, c2, p]));
    }

    fn close(&mut self) {
        if self.cursor != self.start {
            self.push(Segment::Line([self.cursor, self.start]));
        }
        self.flush();
    }
}
