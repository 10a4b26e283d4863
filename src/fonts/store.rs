// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Outline engine backing a font face

use crate::{GlyphId, DPU};
use ab_glyph::Font;
use easy_cast::{CastFloat, Conv};
use std::sync::Arc;
use thiserror::Error;
use ttf_parser::Face;

/// Font loading errors
#[derive(Error, Debug)]
pub(crate) enum FontError {
    #[error("font load error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[error("font load error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
}

/// Typographic metrics of a face at its current pixel size
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FaceMetrics {
    /// Baseline-to-baseline distance, in pixels
    pub line_height: f32,
    /// Ascender above the baseline, in pixels
    pub ascender: f32,
    /// Descender below the baseline, in pixels (usually negative)
    pub descender: f32,
}

/// A rasterized glyph outline
///
/// Grayscale anti-aliased coverage, row major, one byte per pixel
/// (0 = background, 255 = full coverage), `width * height` bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coverage {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Left bearing: offset from the pen position to the bitmap's left edge
    pub left: i32,
    /// Top bearing: offset from the baseline up to the bitmap's top edge
    pub top: i32,
    /// Lowest point of the outline's bounding box, in pixels above baseline
    pub ymin: f32,
    /// Highest point of the outline's bounding box, in pixels above baseline
    pub ymax: f32,
    /// Coverage bytes
    pub data: Vec<u8>,
}

/// Interface to an outline-rendering engine
///
/// [`FontFace`] is written against this seam rather than a concrete
/// library: any backend able to size a face, report metrics and rasterize
/// a glyph outline to grayscale coverage will do. The production
/// implementation is [`FaceStore`]; tests substitute instrumented fakes.
///
/// [`FontFace`]: super::FontFace
pub trait OutlineSource: Send {
    /// Set the active pixel size (dots per Em)
    ///
    /// Returns false if the size is rejected (non-positive or non-finite).
    fn set_pixel_size(&mut self, dpem: f32) -> bool;

    /// Map a character to its glyph identifier, if the face covers it
    fn glyph_index(&self, c: char) -> Option<GlyphId>;

    /// Typographic metrics at the current pixel size
    fn metrics(&self) -> FaceMetrics;

    /// Advance width of a glyph in pixels
    ///
    /// `None` means the face has no such glyph.
    fn advance(&self, glyph: GlyphId) -> Option<f32>;

    /// Rasterize a glyph outline to a coverage bitmap
    ///
    /// `None` when there is nothing to draw (whitespace glyphs have no
    /// outline; an out-of-range index has no glyph at all — callers that
    /// need to distinguish the two should check [`Self::advance`] first).
    ///
    /// Hinting is never applied: metrics must not depend on the render size.
    fn rasterize(&self, glyph: GlyphId) -> Option<Coverage>;
}

/// A loaded, sized font resource
///
/// Owns the font data blob together with the parsed views into it:
/// `ttf-parser` for metrics and character mapping, `ab_glyph` for outline
/// rasterization (which does no hinting, keeping metrics stable across
/// sizes).
pub struct FaceStore {
    // Safety: `face` and `ab_glyph` borrow from `_blob`'s heap allocation,
    // which this struct keeps alive and never mutates. Neither view is
    // allowed to escape with the 'static lifetime.
    _blob: Arc<Vec<u8>>,
    face: Face<'static>,
    ab_glyph: ab_glyph::FontRef<'static>,
    dpem: f32,
}

impl FaceStore {
    /// Construct from a font data blob and a face index within it
    pub(crate) fn new(blob: Arc<Vec<u8>>, index: u32) -> Result<Self, FontError> {
        // Safety: see the field comment above. The blob's allocation does
        // not move while the Arc exists.
        let data = unsafe { extend_lifetime(blob.as_slice()) };
        let face = Face::parse(data, index)?;
        let ab_glyph = ab_glyph::FontRef::try_from_slice_and_index(data, index)?;
        Ok(FaceStore {
            _blob: blob,
            face,
            ab_glyph,
            dpem: 0.0,
        })
    }

    /// Pixels per font unit at the current size
    fn dpu(&self) -> DPU {
        DPU(self.dpem / f32::from(self.face.units_per_em()))
    }
}

impl OutlineSource for FaceStore {
    fn set_pixel_size(&mut self, dpem: f32) -> bool {
        if !(dpem.is_finite() && dpem > 0.0) {
            return false;
        }
        self.dpem = dpem;
        true
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c).map(|id| GlyphId(id.0))
    }

    fn metrics(&self) -> FaceMetrics {
        let dpu = self.dpu();
        FaceMetrics {
            line_height: dpu.i16_to_px(self.face.height()) + dpu.i16_to_px(self.face.line_gap()),
            ascender: dpu.i16_to_px(self.face.ascender()),
            descender: dpu.i16_to_px(self.face.descender()),
        }
    }

    fn advance(&self, glyph: GlyphId) -> Option<f32> {
        let advance = self.face.glyph_hor_advance(glyph.into())?;
        Some(self.dpu().u16_to_px(advance))
    }

    fn rasterize(&self, glyph: GlyphId) -> Option<Coverage> {
        let font = &self.ab_glyph;
        let scale = self.dpem * font.height_unscaled() / font.units_per_em()?;
        let glyph = ab_glyph::Glyph {
            id: ab_glyph::GlyphId(glyph.0),
            scale: scale.into(),
            position: ab_glyph::point(0.0, 0.0),
        };
        let outline = font.outline_glyph(glyph)?;

        let bounds = outline.px_bounds();
        let size = bounds.max - bounds.min;
        let size: (u32, u32) = (size.x.cast_trunc(), size.y.cast_trunc());
        if size.0 == 0 || size.1 == 0 {
            return None;
        }

        let mut data = vec![0; usize::conv(size.0 * size.1)];
        outline.draw(|x, y, c| {
            // Convert to u8 with saturating conversion, rounding down:
            data[usize::conv((y * size.0) + x)] = (c * 256.0) as u8;
        });

        Some(Coverage {
            width: size.0,
            height: size.1,
            left: bounds.min.x.cast_trunc(),
            // px_bounds has y growing downward from the baseline; bearings
            // and the bounding box are reported with y up.
            top: (-bounds.min.y).cast_trunc(),
            ymin: -bounds.max.y,
            ymax: -bounds.min.y,
            data,
        })
    }
}

pub(crate) unsafe fn extend_lifetime<'b, T: ?Sized>(r: &'b T) -> &'static T {
    std::mem::transmute::<&'b T, &'static T>(r)
}
