// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contour → patch conversion.
//!
//! A fixed-vertex patch primitive needs every patch in a batch to carry the
//! same number of control points. Glyph outlines mix lines, quadratics and
//! cubics, so each segment is first rewritten at the batch's
//! [`RenderDegree`] and then emitted through a [`DisplayTransform`].

use glam::{Vec2, Vec3};

use crate::types::{palette, Contour, Glyph, RenderDegree, Segment, VertexStream};

/// Maps em-normalized outline coordinates into clip space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTransform {
    /// Added to every x coordinate before scaling.
    pub origin_x: f32,
    /// Uniform scale applied after the horizontal shift.
    pub scale: f32,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            origin_x: -1.5,
            scale: 0.5,
        }
    }
}

impl DisplayTransform {
    /// Place `p` at `horizontal_offset` and scale it into clip space.
    pub fn apply(&self, p: Vec2, horizontal_offset: f32) -> Vec2 {
        Vec2::new(
            (p.x + horizontal_offset + self.origin_x) * self.scale,
            p.y * self.scale,
        )
    }
}

/// Rewrite `segment` as a segment of exactly `degree`.
///
/// * same degree: unchanged.
/// * line → cubic: `p0, p0, p1, p1`.
/// * line → quadratic: `p0, p0, p1`.
/// * quadratic → cubic: exact degree elevation.
/// * cubic → quadratic: single-quadratic approximation through the
///   midpoint-preserving control `(3(c1 + c2) - (c0 + c3)) / 4`.
pub fn normalize_segment(segment: &Segment, degree: RenderDegree) -> Segment {
    match (*segment, degree) {
        (Segment::Line([a, b]), RenderDegree::Quadratic) => Segment::Quadratic([a, a, b]),
        (Segment::Line([a, b]), RenderDegree::Cubic) => Segment::Cubic([a, a, b, b]),
        (Segment::Quadratic([a, c, b]), RenderDegree::Cubic) => {
            let two_thirds = 2.0 / 3.0;
            Segment::Cubic([a, a + (c - a) * two_thirds, b + (c - b) * two_thirds, b])
        }
        (Segment::Cubic([a, c1, c2, b]), RenderDegree::Quadratic) => {
            Segment::Quadratic([a, ((c1 + c2) * 3.0 - (a + b)) * 0.25, b])
        }
        (same, _) => same,
    }
}

/// Normalizes heterogeneous contours into uniform patch streams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchConverter {
    transform: DisplayTransform,
    colour: Vec3,
}

impl Default for PatchConverter {
    fn default() -> Self {
        Self::new(DisplayTransform::default())
    }
}

impl PatchConverter {
    /// Converter emitting white vertices through `transform`.
    pub fn new(transform: DisplayTransform) -> Self {
        Self {
            transform,
            colour: palette::WHITE,
        }
    }

    /// Display transform in use.
    pub fn transform(&self) -> DisplayTransform {
        self.transform
    }

    /// Convert one contour into a fresh stream.
    ///
    /// The result holds `contour.len() * degree.patch_size()` vertices; an
    /// empty contour yields an empty stream.
    pub fn convert(
        &self,
        contour: &Contour,
        degree: RenderDegree,
        horizontal_offset: f32,
    ) -> VertexStream {
        let mut out = VertexStream::with_capacity(contour.len() * degree.patch_size());
        self.convert_into(contour, degree, horizontal_offset, &mut out);
        out
    }

    /// Append the patches of one contour to `out`.
    pub fn convert_into(
        &self,
        contour: &Contour,
        degree: RenderDegree,
        horizontal_offset: f32,
        out: &mut VertexStream,
    ) {
        for segment in contour {
            let normalized = normalize_segment(segment, degree);
            for &p in normalized.points() {
                out.push(self.transform.apply(p, horizontal_offset), self.colour);
            }
        }
    }

    /// Append every contour of `glyph` to `out`.
    pub fn convert_glyph(
        &self,
        glyph: &Glyph,
        degree: RenderDegree,
        horizontal_offset: f32,
        out: &mut VertexStream,
    ) {
        for contour in &glyph.contours {
            self.convert_into(contour, degree, horizontal_offset, out);
        }
    }
}
