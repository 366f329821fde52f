// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CPU-side packing of a controller frame into GPU-ready arrays.

use bytemuck::{Pod, Zeroable};
use glyph_patch_core::{Frame, RenderDegree, VertexStream};

/// One Bezier patch; quadratic patches leave the fourth slot zeroed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PatchInstance {
    pub points: [[f32; 2]; 4],
    pub colours: [[f32; 3]; 4],
}

/// Endpoint of a control-polygon edge.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 2],
    pub colour: [f32; 3],
}

/// Centre and colour of one control-point marker quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub centre: [f32; 2],
    pub colour: [f32; 3],
}

/// Arrays uploaded for one frame; allocations are reused between frames.
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub degree: RenderDegree,
    pub patches: Vec<PatchInstance>,
    pub lines: Vec<LineVertex>,
    pub markers: Vec<MarkerInstance>,
}

impl FrameGeometry {
    pub fn fill(&mut self, frame: &Frame<'_>) {
        self.degree = frame.degree;
        pack_patches(frame.patches, frame.degree, &mut self.patches);
        self.lines.clear();
        if let Some(polygon) = frame.polygon {
            self.lines.extend(
                polygon
                    .positions()
                    .iter()
                    .zip(polygon.colours())
                    .map(|(p, c)| LineVertex {
                        pos: p.to_array(),
                        colour: c.to_array(),
                    }),
            );
        }
        self.markers.clear();
        if let Some(markers) = frame.markers {
            self.markers.extend(
                markers
                    .positions()
                    .iter()
                    .zip(markers.colours())
                    .map(|(p, c)| MarkerInstance {
                        centre: p.to_array(),
                        colour: c.to_array(),
                    }),
            );
        }
    }
}

pub fn pack_patches(stream: &VertexStream, degree: RenderDegree, out: &mut Vec<PatchInstance>) {
    out.clear();
    out.extend(stream.patches(degree).map(|patch| {
        let mut inst = PatchInstance::default();
        for (i, (p, c)) in patch.positions.iter().zip(patch.colours).enumerate() {
            inst.points[i] = p.to_array();
            inst.colours[i] = c.to_array();
        }
        inst
    }));
}
