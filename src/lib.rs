// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! SDF glyph rastering and caching
//!
//! This library renders glyphs from font outlines into cached signed
//! distance field (SDF) bitmaps, suitable for scalable anti-aliased text
//! rendering (for example in a map-labelling pipeline).
//!
//! The main entry points are:
//!
//! -   [`fonts::FontRegistry`]: catalog of registered font files and
//!     in-memory fonts; factory for [`fonts::FontFace`] handles
//! -   [`fonts::FaceManager`]: per-consumer (usually per worker thread)
//!     cache of faces, with composition into ordered [`fonts::FaceSet`]
//!     fallback chains
//! -   [`fonts::FontFace::glyph_dimensions`]: the per-glyph query; computes
//!     metrics and an SDF bitmap at most once per glyph and serves repeat
//!     lookups from a shared, thread-safe [`fonts::GlyphCache`]
//! -   [`sdf::render_sdf`]: the pure coverage-bitmap → distance-field
//!     transformation

pub mod fonts;
pub mod sdf;

mod conv;
pub use conv::DPU;

/// An identifier for a glyph of a font face
///
/// This identifies a glyph within one font resource only; it is not a
/// Unicode code point and is not meaningful across different faces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(pub u16);

impl From<GlyphId> for ttf_parser::GlyphId {
    fn from(id: GlyphId) -> Self {
        ttf_parser::GlyphId(id.0)
    }
}
