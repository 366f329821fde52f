// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! TtfOutlineSource against the filesystem.

mod common;

use std::path::{Path, PathBuf};

use glam::Vec2;
use glyph_patch_core::{
    implied_degree, FontLoadError, OutlineSource, PatchConverter, RenderDegree, Segment,
    VertexStream,
};
use glyph_patch_fonts::TtfOutlineSource;

#[test]
fn missing_file_is_not_found() {
    let mut src = TtfOutlineSource::new();
    let err = src
        .glyph(Path::new("definitely/not/here.ttf"), 'a')
        .unwrap_err();
    assert!(matches!(err, FontLoadError::NotFound { .. }));
    assert_eq!(src.cached_fonts(), 0);
}

#[test]
fn garbage_file_is_a_parse_error_and_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.otf");
    std::fs::write(&path, b"\0\x01\0\0garbage").unwrap();

    let mut src = TtfOutlineSource::new();
    let err = src.glyph(&path, 'a').unwrap_err();
    assert!(matches!(err, FontLoadError::Parse { .. }));
    assert!(err.to_string().contains("broken.otf"));
    assert_eq!(src.cached_fonts(), 0);
}

#[test]
fn directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut src = TtfOutlineSource::new();
    let err = src.glyph(dir.path(), 'a').unwrap_err();
    assert!(matches!(err, FontLoadError::Io { .. }));
}

fn write_font(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn truetype_outline_is_lines_and_quadratics() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(dir.path(), "fixture.ttf", &common::truetype_font());
    assert_eq!(implied_degree(&path), RenderDegree::Quadratic);

    let mut src = TtfOutlineSource::new();
    let glyph = src.glyph(&path, 'A').unwrap();
    assert_eq!(src.cached_fonts(), 1);
    assert_eq!(glyph.contours.len(), 1);

    let segs = &glyph.contours[0].segments;
    let degrees: Vec<u8> = segs.iter().map(Segment::degree).collect();
    assert_eq!(degrees, vec![1, 2, 1]);
    // Font units scale down by 1/1000.
    assert!(segs[0].start().abs_diff_eq(Vec2::new(0.1, 0.0), 1e-6));
    assert!(segs[1].points()[1].abs_diff_eq(Vec2::new(0.5, 0.5), 1e-6));
    assert_eq!(segs[2].end(), segs[0].start());

    let mut out = VertexStream::new();
    PatchConverter::default().convert_glyph(&glyph, RenderDegree::Quadratic, 0.0, &mut out);
    assert_eq!(out.len(), 3 * RenderDegree::Quadratic.patch_size());

    assert!(src.glyph(&path, ' ').unwrap().is_empty());
    assert!(src.glyph(&path, 'Z').unwrap().is_empty());
    assert_eq!(src.cached_fonts(), 1);
}

#[test]
fn cff_outline_keeps_its_cubic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_font(dir.path(), "fixture.otf", &common::cff_font());
    assert_eq!(implied_degree(&path), RenderDegree::Cubic);

    let mut src = TtfOutlineSource::new();
    let glyph = src.glyph(&path, 'A').unwrap();
    assert_eq!(glyph.contours.len(), 1);

    let segs = &glyph.contours[0].segments;
    assert!(segs.iter().any(|s| s.degree() == 3));
    let degrees: Vec<u8> = segs.iter().map(Segment::degree).collect();
    assert_eq!(degrees, vec![1, 3, 1]);
    let expected = [
        Vec2::new(0.5, 0.0),
        Vec2::new(0.5, 0.2),
        Vec2::new(0.4, 0.5),
        Vec2::new(0.1, 0.5),
    ];
    assert_eq!(segs[1].points().len(), expected.len());
    for (p, e) in segs[1].points().iter().zip(expected) {
        assert!(p.abs_diff_eq(e, 1e-6), "{p} != {e}");
    }
    // CFF contours close implicitly; the collector adds the last edge.
    assert_eq!(segs[2].end(), segs[0].start());

    let mut out = VertexStream::new();
    PatchConverter::default().convert_glyph(&glyph, RenderDegree::Cubic, 0.0, &mut out);
    assert_eq!(out.len(), 3 * RenderDegree::Cubic.patch_size());

    assert!(src.glyph(&path, ' ').unwrap().is_empty());
}

#[test]
fn both_formats_share_one_cache() {
    let dir = tempfile::tempdir().unwrap();
    let ttf = write_font(dir.path(), "a.ttf", &common::truetype_font());
    let otf = write_font(dir.path(), "b.otf", &common::cff_font());

    let mut src = TtfOutlineSource::new();
    let quad = src.glyph(&ttf, 'A').unwrap();
    let cubic = src.glyph(&otf, 'A').unwrap();
    assert_eq!(src.cached_fonts(), 2);
    assert_eq!(quad.segment_count(), cubic.segment_count());
    assert_eq!(quad.contours[0].segments[0], cubic.contours[0].segments[0]);
}
