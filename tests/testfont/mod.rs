// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Generator for a minimal TrueType font used by the end-to-end tests
//!
//! The font is "TestSans Regular": 1000 units per Em, ascender 800,
//! descender -200. Glyph 0 is the empty .notdef (advance 500); glyph 1 is
//! a filled rectangle from (50, 0) to (650, 700) with advance 600, mapped
//! from both 'A' and 'X'. Table checksums are computed properly; the
//! head table's checkSumAdjustment is left zero (parsers do not verify it).

fn u16be(v: &mut Vec<u8>, x: u16) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn i16be(v: &mut Vec<u8>, x: i16) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn u32be(v: &mut Vec<u8>, x: u32) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0001_0000); // version
    u32be(&mut t, 0x0001_0000); // fontRevision
    u32be(&mut t, 0); // checkSumAdjustment
    u32be(&mut t, 0x5F0F_3CF5); // magicNumber
    u16be(&mut t, 0); // flags
    u16be(&mut t, 1000); // unitsPerEm
    t.extend_from_slice(&[0; 8]); // created
    t.extend_from_slice(&[0; 8]); // modified
    i16be(&mut t, 50); // xMin
    i16be(&mut t, 0); // yMin
    i16be(&mut t, 650); // xMax
    i16be(&mut t, 700); // yMax
    u16be(&mut t, 0); // macStyle
    u16be(&mut t, 8); // lowestRecPPEM
    i16be(&mut t, 2); // fontDirectionHint
    i16be(&mut t, 0); // indexToLocFormat: short
    i16be(&mut t, 0); // glyphDataFormat
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0001_0000);
    i16be(&mut t, 800); // ascender
    i16be(&mut t, -200); // descender
    i16be(&mut t, 0); // lineGap
    u16be(&mut t, 600); // advanceWidthMax
    i16be(&mut t, 0); // minLeftSideBearing
    i16be(&mut t, 0); // minRightSideBearing
    i16be(&mut t, 650); // xMaxExtent
    i16be(&mut t, 1); // caretSlopeRise
    i16be(&mut t, 0); // caretSlopeRun
    i16be(&mut t, 0); // caretOffset
    for _ in 0..4 {
        i16be(&mut t, 0); // reserved
    }
    i16be(&mut t, 0); // metricDataFormat
    u16be(&mut t, 2); // numberOfHMetrics
    t
}

fn maxp() -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0001_0000);
    u16be(&mut t, 2); // numGlyphs
    u16be(&mut t, 4); // maxPoints
    u16be(&mut t, 1); // maxContours
    u16be(&mut t, 0); // maxCompositePoints
    u16be(&mut t, 0); // maxCompositeContours
    u16be(&mut t, 2); // maxZones
    u16be(&mut t, 0); // maxTwilightPoints
    u16be(&mut t, 0); // maxStorage
    u16be(&mut t, 0); // maxFunctionDefs
    u16be(&mut t, 0); // maxInstructionDefs
    u16be(&mut t, 0); // maxStackElements
    u16be(&mut t, 0); // maxSizeOfInstructions
    u16be(&mut t, 0); // maxComponentElements
    u16be(&mut t, 0); // maxComponentDepth
    t
}

fn hmtx() -> Vec<u8> {
    let mut t = Vec::new();
    u16be(&mut t, 500); // .notdef advance
    i16be(&mut t, 0);
    u16be(&mut t, 600); // rectangle advance
    i16be(&mut t, 50);
    t
}

/// Glyph 1: one rectangular contour, all points on-curve
fn glyf() -> Vec<u8> {
    let mut t = Vec::new();
    // Glyph 0 (.notdef) is empty: zero bytes.
    i16be(&mut t, 1); // numberOfContours
    i16be(&mut t, 50); // xMin
    i16be(&mut t, 0); // yMin
    i16be(&mut t, 650); // xMax
    i16be(&mut t, 700); // yMax
    u16be(&mut t, 3); // endPtsOfContours[0]
    u16be(&mut t, 0); // instructionLength
    t.extend_from_slice(&[0x01; 4]); // flags: on-curve, long vectors
    // x deltas: (50, 0) (650, 0) (650, 700) (50, 700)
    for dx in [50i16, 600, 0, -600] {
        i16be(&mut t, dx);
    }
    for dy in [0i16, 0, 700, 0] {
        i16be(&mut t, dy);
    }
    t
}

/// Short-format loca for [empty, 34-byte] glyph data
fn loca() -> Vec<u8> {
    let mut t = Vec::new();
    u16be(&mut t, 0);
    u16be(&mut t, 0);
    u16be(&mut t, 17); // 34 / 2
    t
}

/// Format 4 subtable mapping 'A' and 'X' to glyph 1
fn cmap() -> Vec<u8> {
    let mut t = Vec::new();
    u16be(&mut t, 0); // version
    u16be(&mut t, 1); // numTables
    u16be(&mut t, 3); // platformID: windows
    u16be(&mut t, 1); // encodingID: unicode BMP
    u32be(&mut t, 12); // subtable offset

    u16be(&mut t, 4); // format
    u16be(&mut t, 40); // length
    u16be(&mut t, 0); // language
    u16be(&mut t, 6); // segCountX2
    u16be(&mut t, 4); // searchRange
    u16be(&mut t, 1); // entrySelector
    u16be(&mut t, 2); // rangeShift
    for end in [0x41u16, 0x58, 0xFFFF] {
        u16be(&mut t, end);
    }
    u16be(&mut t, 0); // reservedPad
    for start in [0x41u16, 0x58, 0xFFFF] {
        u16be(&mut t, start);
    }
    for delta in [-64i16, -87, 1] {
        i16be(&mut t, delta);
    }
    for range_offset in [0u16, 0, 0] {
        u16be(&mut t, range_offset);
    }
    t
}

fn utf16be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
}

/// Windows Unicode records for family (1) and subfamily (2)
fn name() -> Vec<u8> {
    let family = utf16be("TestSans");
    let style = utf16be("Regular");

    let mut t = Vec::new();
    u16be(&mut t, 0); // format
    u16be(&mut t, 2); // count
    u16be(&mut t, 6 + 2 * 12); // stringOffset
    for (name_id, offset, len) in [
        (1u16, 0u16, family.len() as u16),
        (2, family.len() as u16, style.len() as u16),
    ] {
        u16be(&mut t, 3); // platformID
        u16be(&mut t, 1); // encodingID
        u16be(&mut t, 0x0409); // languageID: en-US
        u16be(&mut t, name_id);
        u16be(&mut t, len);
        u16be(&mut t, offset);
    }
    t.extend_from_slice(&family);
    t.extend_from_slice(&style);
    t
}

fn post() -> Vec<u8> {
    let mut t = Vec::new();
    u32be(&mut t, 0x0003_0000); // version: no glyph names
    u32be(&mut t, 0); // italicAngle
    i16be(&mut t, 0); // underlinePosition
    i16be(&mut t, 0); // underlineThickness
    u32be(&mut t, 0); // isFixedPitch
    for _ in 0..4 {
        u32be(&mut t, 0); // memory hints
    }
    t
}

fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// Assemble tables (already in tag order) into an sfnt blob
pub fn build() -> Vec<u8> {
    let tables: [([u8; 4], Vec<u8>); 9] = [
        (*b"cmap", cmap()),
        (*b"glyf", glyf()),
        (*b"head", head()),
        (*b"hhea", hhea()),
        (*b"hmtx", hmtx()),
        (*b"loca", loca()),
        (*b"maxp", maxp()),
        (*b"name", name()),
        (*b"post", post()),
    ];

    let num = tables.len() as u16;
    let mut pow = 1u16;
    while pow * 2 <= num {
        pow *= 2;
    }

    let mut font = Vec::new();
    u32be(&mut font, 0x0001_0000); // sfntVersion: TrueType outlines
    u16be(&mut font, num);
    u16be(&mut font, pow * 16); // searchRange
    u16be(&mut font, pow.trailing_zeros() as u16); // entrySelector
    u16be(&mut font, num * 16 - pow * 16); // rangeShift

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        font.extend_from_slice(tag);
        u32be(&mut font, checksum(data));
        u32be(&mut font, offset);
        u32be(&mut font, data.len() as u32);
        offset += (data.len() as u32).div_ceil(4) * 4;
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
        for _ in 0..(data.len().div_ceil(4) * 4 - data.len()) {
            font.push(0);
        }
    }
    font
}
