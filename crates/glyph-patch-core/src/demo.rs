// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hand-authored Bezier curves for the control-point demonstration mode.

use glam::{Vec2, Vec3};

use crate::types::{palette, RenderDegree, VertexStream};

const QUADRATIC_FACTOR: f32 = 0.3;
const QUADRATIC_CURVES: [[(f32, f32); 3]; 4] = [
    [(1.0, 1.0), (2.0, -1.0), (0.0, -1.0)],
    [(0.0, -1.0), (-2.0, -1.0), (-1.0, 1.0)],
    [(-1.0, 1.0), (0.0, 1.0), (1.0, 1.0)],
    [(1.2, 0.5), (2.5, 1.0), (1.3, -0.4)],
];

const CUBIC_FACTOR: f32 = 0.12;
const CUBIC_SHIFT: Vec2 = Vec2::new(0.5, 0.2);
const CUBIC_CURVES: [[(f32, f32); 4]; 5] = [
    [(1.0, 1.0), (4.0, 0.0), (6.0, 2.0), (9.0, 1.0)],
    [(8.0, 2.0), (0.0, 8.0), (0.0, -2.0), (8.0, 4.0)],
    [(5.0, 3.0), (3.0, 2.0), (3.0, 3.0), (5.0, 2.0)],
    [(3.0, 2.2), (3.5, 2.7), (3.5, 3.3), (3.0, 3.8)],
    [(2.8, 3.5), (2.4, 3.8), (2.4, 3.2), (2.8, 3.5)],
];

const QUADRATIC_CURVE_COLOURS: [Vec3; 3] = [palette::RED, palette::BLUE, palette::RED];
const QUADRATIC_MARKER_COLOURS: [Vec3; 3] = [palette::WHITE, palette::GREEN, palette::WHITE];
const CUBIC_CURVE_COLOURS: [Vec3; 4] = [palette::RED, palette::BLUE, palette::RED, palette::RED];
const CUBIC_MARKER_COLOURS: [Vec3; 4] =
    [palette::WHITE, palette::GREEN, palette::GREEN, palette::WHITE];
const POLYGON_COLOUR: Vec3 = palette::BLUE;

/// Everything the demo mode draws for one degree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DemoGeometry {
    /// Degree the curves were authored for.
    pub degree: RenderDegree,
    /// Curve control points as patches, with curve colours.
    pub curves: VertexStream,
    /// The same control points with marker colours, drawn as points.
    pub markers: VertexStream,
    /// Closed control polygon of every curve as a line list.
    pub polygon: VertexStream,
}

impl DemoGeometry {
    /// Number of curves (patches) in the set.
    pub fn curve_count(&self) -> usize {
        self.curves.patch_count(self.degree)
    }
}

/// Produces the fixed demonstration curve set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPointDemoGenerator;

impl ControlPointDemoGenerator {
    /// Generate the curves for `degree`: 4 quadratics or 5 cubics.
    pub fn generate(&self, degree: RenderDegree) -> DemoGeometry {
        let mut geometry = DemoGeometry::default();
        self.generate_into(degree, &mut geometry);
        geometry
    }

    /// Regenerate into an existing buffer set, reusing its allocations.
    pub fn generate_into(&self, degree: RenderDegree, out: &mut DemoGeometry) {
        out.degree = degree;
        out.curves.clear();
        out.markers.clear();
        out.polygon.clear();
        match degree {
            RenderDegree::Quadratic => {
                let place = |(x, y): (f32, f32)| Vec2::new(x, y) * QUADRATIC_FACTOR;
                for curve in QUADRATIC_CURVES {
                    let pts = curve.map(place);
                    emit_curve(&pts, &QUADRATIC_CURVE_COLOURS, &QUADRATIC_MARKER_COLOURS, out);
                }
            }
            RenderDegree::Cubic => {
                let place = |(x, y): (f32, f32)| Vec2::new(x, y) * CUBIC_FACTOR - CUBIC_SHIFT;
                for curve in CUBIC_CURVES {
                    let pts = curve.map(place);
                    emit_curve(&pts, &CUBIC_CURVE_COLOURS, &CUBIC_MARKER_COLOURS, out);
                }
            }
        }
    }
}

fn emit_curve(points: &[Vec2], curve: &[Vec3], marker: &[Vec3], out: &mut DemoGeometry) {
    for ((&p, &c), &m) in points.iter().zip(curve).zip(marker) {
        out.curves.push(p, c);
        out.markers.push(p, m);
    }
    // Each polygon edge is its own two-point line, closing back to the start.
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        out.polygon.push(p, POLYGON_COLOUR);
        out.polygon.push(next, POLYGON_COLOUR);
    }
}
