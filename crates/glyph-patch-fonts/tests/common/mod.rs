// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal sfnt fonts assembled in memory.
//!
//! Both fonts map 'A' to glyph 1 and ' ' to the empty glyph 2 at 1000 units
//! per em. The 'A' outline is the same shape in each: a bottom edge from
//! (100, 0) to (500, 0), one curve up to (100, 500), then back down.

fn u16be(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn i16be(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn u32be(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

const UNITS_PER_EM: u16 = 1000;
const GLYPH_COUNT: u16 = 3;

fn sfnt(magic: u32, mut tables: Vec<([u8; 4], Vec<u8>)>) -> Vec<u8> {
    tables.sort_by(|a, b| a.0.cmp(&b.0));
    let count = u16::try_from(tables.len()).unwrap();
    let dir_len = 12 + 16 * tables.len();

    let mut out = Vec::new();
    u32be(&mut out, magic);
    u16be(&mut out, count);
    u16be(&mut out, 0);
    u16be(&mut out, 0);
    u16be(&mut out, 0);

    let mut body = Vec::new();
    for (tag, data) in &tables {
        out.extend_from_slice(tag);
        u32be(&mut out, 0);
        u32be(&mut out, u32::try_from(dir_len + body.len()).unwrap());
        u32be(&mut out, u32::try_from(data.len()).unwrap());
        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }
    out.extend_from_slice(&body);
    out
}

fn head(long_loca: bool) -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0001_0000);
    u32be(&mut t, 0x0001_0000);
    u32be(&mut t, 0);
    u32be(&mut t, 0x5F0F_3CF5);
    u16be(&mut t, 0);
    u16be(&mut t, UNITS_PER_EM);
    t.extend_from_slice(&[0; 16]);
    for v in [0, 0, 1000, 1000] {
        i16be(&mut t, v);
    }
    u16be(&mut t, 0);
    u16be(&mut t, 8);
    i16be(&mut t, 2);
    u16be(&mut t, u16::from(long_loca));
    u16be(&mut t, 0);
    assert_eq!(t.len(), 54);
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0001_0000);
    i16be(&mut t, 800);
    i16be(&mut t, -200);
    i16be(&mut t, 0);
    t.extend_from_slice(&[0; 24]);
    u16be(&mut t, GLYPH_COUNT);
    assert_eq!(t.len(), 36);
    t
}

fn maxp(truetype: bool) -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, if truetype { 0x0001_0000 } else { 0x0000_5000 });
    u16be(&mut t, GLYPH_COUNT);
    if truetype {
        t.extend_from_slice(&[0; 26]);
    }
    t
}

/// Unicode platform, format 12: ' ' -> 2, 'A' -> 1.
fn cmap() -> Vec<u8> {
    let groups: [(u32, u32, u32); 2] = [(0x20, 0x20, 2), (0x41, 0x41, 1)];
    let mut t = Vec::new();
    u16be(&mut t, 0);
    u16be(&mut t, 1);
    u16be(&mut t, 0);
    u16be(&mut t, 4);
    u32be(&mut t, 12);

    u16be(&mut t, 12);
    u16be(&mut t, 0);
    u32be(&mut t, 16 + 12 * groups.len() as u32);
    u32be(&mut t, 0);
    u32be(&mut t, groups.len() as u32);
    for (start, end, glyph) in groups {
        u32be(&mut t, start);
        u32be(&mut t, end);
        u32be(&mut t, glyph);
    }
    t
}

/// TrueType font whose 'A' is two lines and one quadratic.
pub fn truetype_font() -> Vec<u8> {
    let mut glyph = Vec::new();
    for v in [1, 100, 0, 500, 500] {
        i16be(&mut glyph, v);
    }
    u16be(&mut glyph, 3);
    u16be(&mut glyph, 0);
    // on, on, off, on
    glyph.extend_from_slice(&[0x01, 0x01, 0x00, 0x01]);
    for dx in [100, 400, 0, -400] {
        i16be(&mut glyph, dx);
    }
    for dy in [0, 0, 500, 0] {
        i16be(&mut glyph, dy);
    }
    while glyph.len() % 4 != 0 {
        glyph.push(0);
    }

    // .notdef and space are empty ranges around 'A'.
    let end = u32::try_from(glyph.len()).unwrap();
    let mut loca = Vec::new();
    for offset in [0, 0, end, end] {
        u32be(&mut loca, offset);
    }

    sfnt(
        0x0001_0000,
        vec![
            (*b"cmap", cmap()),
            (*b"glyf", glyph),
            (*b"head", head(true)),
            (*b"hhea", hhea()),
            (*b"loca", loca),
            (*b"maxp", maxp(true)),
        ],
    )
}

fn cff_number(out: &mut Vec<u8>, v: i16) {
    out.push(28);
    i16be(out, v);
}

/// CFF INDEX with one-byte offsets.
fn cff_index(items: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    u16be(&mut out, u16::try_from(items.len()).unwrap());
    if items.is_empty() {
        return out;
    }
    out.push(1);
    let mut offset = 1usize;
    out.push(1);
    for item in items {
        offset += item.len();
        out.push(u8::try_from(offset).unwrap());
    }
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// OpenType font with CFF outlines whose 'A' is two lines and one cubic.
pub fn cff_font() -> Vec<u8> {
    const RMOVETO: u8 = 21;
    const RLINETO: u8 = 5;
    const RRCURVETO: u8 = 8;
    const ENDCHAR: u8 = 14;
    const CHARSTRINGS_OP: u8 = 17;

    let mut glyph_a = Vec::new();
    for v in [100, 0] {
        cff_number(&mut glyph_a, v);
    }
    glyph_a.push(RMOVETO);
    for v in [400, 0] {
        cff_number(&mut glyph_a, v);
    }
    glyph_a.push(RLINETO);
    // (500,0) -> (500,200) (400,500) (100,500)
    for v in [0, 200, -100, 300, -300, 0] {
        cff_number(&mut glyph_a, v);
    }
    glyph_a.push(RRCURVETO);
    glyph_a.push(ENDCHAR);
    let char_strings = cff_index(&[&[ENDCHAR], &glyph_a, &[ENDCHAR]]);

    let name = cff_index(&[b"G"]);
    let strings = cff_index(&[]);
    let global_subrs = cff_index(&[]);
    // Top DICT is a fixed four bytes, so its INDEX length is known up front.
    let top_dict_index_len = 2 + 1 + 2 + 4;
    let char_strings_at = 4 + name.len() + top_dict_index_len + strings.len() + global_subrs.len();

    let mut top_dict = Vec::new();
    cff_number(&mut top_dict, i16::try_from(char_strings_at).unwrap());
    top_dict.push(CHARSTRINGS_OP);
    let top = cff_index(&[&top_dict]);
    assert_eq!(top.len(), top_dict_index_len);

    let mut cff = vec![1, 0, 4, 1];
    cff.extend_from_slice(&name);
    cff.extend_from_slice(&top);
    cff.extend_from_slice(&strings);
    cff.extend_from_slice(&global_subrs);
    assert_eq!(cff.len(), char_strings_at);
    cff.extend_from_slice(&char_strings);

    sfnt(
        u32::from_be_bytes(*b"OTTO"),
        vec![
            (*b"CFF ", cff),
            (*b"cmap", cmap()),
            (*b"head", head(false)),
            (*b"hhea", hhea()),
            (*b"maxp", maxp(false)),
        ],
    )
}
