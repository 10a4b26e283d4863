// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face: per-glyph metrics and SDF bitmaps, memoized

use super::{GlyphCache, OutlineSource};
use crate::conv::to_usize;
use crate::sdf::render_sdf;
use crate::GlyphId;
use easy_cast::Cast;
use std::sync::Arc;

/// Padding margin in pixels added on every side of a rasterized glyph
///
/// The SDF falloff needs room around the coverage bitmap; a glyph's cached
/// bitmap measures `(width + 2 * GLYPH_MARGIN) × (height + 2 * GLYPH_MARGIN)`.
pub const GLYPH_MARGIN: u32 = 3;

/// Reference character for [`FontFace::get_char_height`]
const HEIGHT_REFERENCE: char = 'X';

/// Computed data for one glyph of one sized face
///
/// Metrics fields (`line_height`, `advance`, `ascender`, `descender`) are
/// valid only while the owning [`FontFace`] keeps the point size it had
/// when the glyph was cached: use one cache per rendering size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphInfo {
    /// The glyph's identifier within its face
    pub glyph: GlyphId,
    /// Lowest point of the outline's bounding box, in pixels above baseline
    pub ymin: f32,
    /// Highest point of the outline's bounding box, in pixels above baseline
    pub ymax: f32,
    /// Advance width in pixels
    pub advance: f32,
    /// Baseline-to-baseline distance in pixels
    pub line_height: f32,
    /// Ascender in pixels
    pub ascender: f32,
    /// Descender in pixels
    pub descender: f32,
    /// Coverage bitmap width in pixels, before padding (0 for empty glyphs)
    pub width: u32,
    /// Coverage bitmap height in pixels, before padding
    pub height: u32,
    /// Left bearing in pixels
    pub left: i32,
    /// Top bearing in pixels
    pub top: i32,
    /// SDF bytes, row major, `buffered_width() * buffered_height()` long
    ///
    /// Empty for glyphs with no outline (e.g. whitespace).
    pub bitmap: Vec<u8>,
}

impl GlyphInfo {
    /// Width of [`Self::bitmap`] (coverage width plus padding)
    pub fn buffered_width(&self) -> u32 {
        match self.width {
            0 => 0,
            w => w + 2 * GLYPH_MARGIN,
        }
    }

    /// Height of [`Self::bitmap`] (coverage height plus padding)
    pub fn buffered_height(&self) -> u32 {
        match self.height {
            0 => 0,
            h => h + 2 * GLYPH_MARGIN,
        }
    }
}

/// One font at a specific pixel size
///
/// Wraps an [`OutlineSource`] together with a shared [`GlyphCache`].
/// Glyph queries are memoized: the outline engine and the distance field
/// generator run at most once per glyph per cache.
///
/// Sizing state is not synchronized: a `FontFace` belongs to one consumer
/// (see [`FaceManager`]), while the [`GlyphCache`] underneath may be shared
/// between faces and threads.
///
/// [`FaceManager`]: super::FaceManager
pub struct FontFace {
    source: Box<dyn OutlineSource>,
    glyphs: Arc<GlyphCache>,
    char_height: f32,
}

impl FontFace {
    /// Construct from an outline source and a (possibly shared) glyph cache
    pub fn new(source: Box<dyn OutlineSource>, glyphs: Arc<GlyphCache>) -> Self {
        FontFace {
            source,
            glyphs,
            char_height: 0.0,
        }
    }

    /// The glyph cache backing this face
    pub fn glyph_cache(&self) -> &Arc<GlyphCache> {
        &self.glyphs
    }

    /// Map a character to its glyph identifier, if the face covers it
    pub fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.source.glyph_index(c)
    }

    /// Set the active pixel size
    ///
    /// Invalidates the cached character height. Returns false if the
    /// outline source rejects the size.
    pub fn set_character_sizes(&mut self, dpem: f32) -> bool {
        self.char_height = 0.0;
        self.source.set_pixel_size(dpem)
    }

    /// Representative character height in pixels
    ///
    /// Measures the rendered height of a reference glyph (capital 'X') and
    /// caches the result until the next size change. This is a heuristic,
    /// not a strict font metric: it requires the reference glyph to exist
    /// in the face, and yields 0.0 otherwise.
    pub fn get_char_height(&mut self) -> f32 {
        if self.char_height != 0.0 {
            return self.char_height;
        }
        if let Some(glyph) = self.source.glyph_index(HEIGHT_REFERENCE) {
            if let Some(info) = self.glyph_dimensions(glyph) {
                self.char_height = info.height.cast();
            }
        }
        self.char_height
    }

    /// Compute or look up metrics and SDF bitmap for a glyph
    ///
    /// On a cache hit the stored entry is returned without touching the
    /// outline engine; two calls with the same glyph on the same cache
    /// yield byte-identical results with no repeated rasterization.
    ///
    /// On a miss, the glyph's outline is loaded (unhinted), typographic
    /// metrics are derived from the current size, the outline is rasterized
    /// to grayscale coverage and — unless the glyph is empty — transformed
    /// into a padded SDF bitmap, then the whole record is cached.
    ///
    /// Returns `None` if the face has no glyph with this identifier;
    /// nothing is cached in that case.
    pub fn glyph_dimensions(&self, glyph: GlyphId) -> Option<Arc<GlyphInfo>> {
        if let Some(info) = self.glyphs.get(glyph) {
            return Some(info);
        }

        let advance = self.source.advance(glyph)?;
        let metrics = self.source.metrics();
        let mut info = GlyphInfo {
            glyph,
            advance,
            line_height: metrics.line_height,
            ascender: metrics.ascender,
            descender: metrics.descender,
            ..Default::default()
        };

        if let Some(cov) = self.source.rasterize(glyph) {
            info.ymin = cov.ymin;
            info.ymax = cov.ymax;
            info.width = cov.width;
            info.height = cov.height;
            info.left = cov.left;
            info.top = cov.top;
            if cov.width > 0 {
                info.bitmap = render_sdf(
                    &cov.data,
                    to_usize(cov.width),
                    to_usize(cov.height),
                    to_usize(GLYPH_MARGIN),
                );
            }
        }

        Some(self.glyphs.insert(glyph, info))
    }
}
