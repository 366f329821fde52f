// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Outline and vertex-stream data model.
//!
//! Outline types ([`Segment`], [`Contour`], [`Glyph`]) are produced by an
//! [`OutlineSource`](crate::OutlineSource) and never mutated afterwards.
//! [`VertexStream`] is the transient, per-frame unit handed to a renderer.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Uniform curve order applied to a whole draw batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderDegree {
    /// Three control points per patch.
    #[default]
    Quadratic,
    /// Four control points per patch.
    Cubic,
}

impl RenderDegree {
    /// Polynomial order of the curves in this batch (2 or 3).
    pub const fn order(self) -> u8 {
        match self {
            Self::Quadratic => 2,
            Self::Cubic => 3,
        }
    }

    /// Number of vertices in one patch (`order + 1`).
    pub const fn patch_size(self) -> usize {
        match self {
            Self::Quadratic => 3,
            Self::Cubic => 4,
        }
    }

    /// Short human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
        }
    }
}

/// Which dataset is rendered. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SceneMode {
    /// Hand-authored Bezier curves with their control polygons.
    #[default]
    ControlPointDemo,
    /// A fixed word drawn from the selected font.
    StaticText,
    /// A phrase scrolling leftwards with wraparound.
    ScrollingText,
}

impl SceneMode {
    /// Whether this mode draws glyph outlines (and so needs a font).
    pub const fn is_text(self) -> bool {
        matches!(self, Self::StaticText | Self::ScrollingText)
    }
}

/// One curve or line piece of a contour.
///
/// The variant fixes the degree, so a segment always carries exactly
/// `degree + 1` control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Straight line between two points.
    Line([Vec2; 2]),
    /// Quadratic Bezier (start, control, end).
    Quadratic([Vec2; 3]),
    /// Cubic Bezier (start, control, control, end).
    Cubic([Vec2; 4]),
}

impl Segment {
    /// Declared degree: 1 for lines, 2 for quadratics, 3 for cubics.
    pub const fn degree(&self) -> u8 {
        match self {
            Self::Line(_) => 1,
            Self::Quadratic(_) => 2,
            Self::Cubic(_) => 3,
        }
    }

    /// Control points in drawing order.
    pub fn points(&self) -> &[Vec2] {
        match self {
            Self::Line(p) => p,
            Self::Quadratic(p) => p,
            Self::Cubic(p) => p,
        }
    }

    /// First control point.
    pub fn start(&self) -> Vec2 {
        self.points()[0]
    }

    /// Last control point.
    pub fn end(&self) -> Vec2 {
        let pts = self.points();
        pts[pts.len() - 1]
    }

    /// Build a segment from 2, 3 or 4 points; any other count yields `None`.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        match *points {
            [a, b] => Some(Self::Line([a, b])),
            [a, b, c] => Some(Self::Quadratic([a, b, c])),
            [a, b, c, d] => Some(Self::Cubic([a, b, c, d])),
            _ => None,
        }
    }
}

/// Ordered run of segments; insertion order is drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    /// Segments in drawing order.
    pub segments: Vec<Segment>,
}

impl Contour {
    /// Empty contour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// True when the contour has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate segments in drawing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for Contour {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl<'a> IntoIterator for &'a Contour {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Outline of one character.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Character this outline was extracted for.
    pub character: char,
    /// Contours in drawing order.
    pub contours: Vec<Contour>,
}

impl Glyph {
    /// Glyph with no contours (e.g. a space).
    pub fn empty(character: char) -> Self {
        Self {
            character,
            contours: Vec::new(),
        }
    }

    /// True when no contour carries a segment.
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(Contour::is_empty)
    }

    /// Total segments across all contours.
    pub fn segment_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }
}

/// Colour constants used by the converters.
pub mod palette {
    use glam::Vec3;

    /// Glyph outline colour.
    pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    /// Curve endpoint colour in the demo.
    pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// Interior control colour and wireframe colour in the demo.
    pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    /// Interior control-point marker colour in the demo.
    pub const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
}

/// One fixed-size patch borrowed out of a [`VertexStream`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch<'a> {
    /// Exactly `degree + 1` positions.
    pub positions: &'a [Vec2],
    /// Colour per position.
    pub colours: &'a [Vec3],
}

/// Parallel position/colour sequences, one entry per emitted vertex.
///
/// Both sequences always have the same length; the only way to add data is
/// through methods that push to both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexStream {
    positions: Vec<Vec2>,
    colours: Vec<Vec3>,
}

impl VertexStream {
    /// Empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stream with room for `n` vertices.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            colours: Vec::with_capacity(n),
        }
    }

    /// Append one vertex.
    pub fn push(&mut self, position: Vec2, colour: Vec3) {
        self.positions.push(position);
        self.colours.push(colour);
    }

    /// Append every vertex of `other`.
    pub fn extend_from(&mut self, other: &Self) {
        self.positions.extend_from_slice(&other.positions);
        self.colours.extend_from_slice(&other.colours);
    }

    /// Drop all vertices, keeping the allocation.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colours.clear();
    }

    /// Vertex count.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no vertex has been emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in emission order.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Colours in emission order.
    pub fn colours(&self) -> &[Vec3] {
        &self.colours
    }

    /// Whether the stream splits evenly into patches of `degree`.
    pub fn is_patch_aligned(&self, degree: RenderDegree) -> bool {
        self.len() % degree.patch_size() == 0
    }

    /// Number of complete patches of `degree`.
    pub fn patch_count(&self, degree: RenderDegree) -> usize {
        self.len() / degree.patch_size()
    }

    /// Iterate complete patches of `degree` in emission order.
    pub fn patches(&self, degree: RenderDegree) -> impl Iterator<Item = Patch<'_>> + '_ {
        let n = degree.patch_size();
        self.positions
            .chunks_exact(n)
            .zip(self.colours.chunks_exact(n))
            .map(|(positions, colours)| Patch { positions, colours })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_degree_matches_point_count() {
        let a = Vec2::ZERO;
        let b = Vec2::X;
        for pts in [&[a, b][..], &[a, b, a][..], &[a, b, a, b][..]] {
            let seg = Segment::from_points(pts).unwrap();
            assert_eq!(usize::from(seg.degree()) + 1, seg.points().len());
        }
        assert!(Segment::from_points(&[a]).is_none());
        assert!(Segment::from_points(&[a; 5]).is_none());
    }

    #[test]
    fn stream_keeps_parallel_lengths() {
        let mut s = VertexStream::new();
        s.push(Vec2::ONE, palette::WHITE);
        let mut t = VertexStream::new();
        t.extend_from(&s);
        t.extend_from(&s);
        assert_eq!(t.positions().len(), t.colours().len());
        assert_eq!(t.len(), 2);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.colours().len(), 0);
    }

    #[test]
    fn patches_chunk_by_degree() {
        let mut s = VertexStream::new();
        for i in 0..12 {
            s.push(Vec2::splat(i as f32), palette::WHITE);
        }
        assert_eq!(s.patches(RenderDegree::Quadratic).count(), 4);
        assert_eq!(s.patches(RenderDegree::Cubic).count(), 3);
        let second = s.patches(RenderDegree::Cubic).nth(1).unwrap();
        assert_eq!(second.positions[0], Vec2::splat(4.0));
        assert!(s.is_patch_aligned(RenderDegree::Quadratic));
    }

    #[test]
    fn glyph_without_segments_is_empty() {
        let mut g = Glyph::empty(' ');
        assert!(g.is_empty());
        g.contours.push(Contour::new());
        assert!(g.is_empty());
        g.contours[0].push(Segment::Line([Vec2::ZERO, Vec2::ONE]));
        assert!(!g.is_empty());
        assert_eq!(g.segment_count(), 1);
    }
}
