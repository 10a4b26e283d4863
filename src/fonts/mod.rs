// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font registration, faces and glyph caching
//!
//! Fonts are registered with a [`FontRegistry`] (explicitly, file by file
//! or directory by directory — nothing is discovered implicitly), then
//! materialized as sized [`FontFace`] handles through a per-consumer
//! [`FaceManager`]. Per-glyph results are memoized in a thread-safe
//! [`GlyphCache`] which may be shared by several faces representing the
//! same physical font.
//!
//! ### Font sizes
//!
//! Sizes in this library are *dpem*, dots (pixels) per Em. Typical
//! conversions, with 1 point = 1/72 inch:
//!
//! -   `dpem = point_size × dpi / 72`
//! -   `dpem = point_size × scale_factor × (96 / 72)` on systems using a
//!     96 DPI baseline
//!
//! Font files define geometry in *font units*; see [`crate::DPU`] for the
//! pixels-per-font-unit scale.
//!
//! ### Ownership and threading
//!
//! The registry is shared (usually one per process, behind an `Arc`);
//! managers and faces belong to one consumer each, because sizing state is
//! unsynchronized; glyph caches are reference-counted and thread-safe, and
//! live as long as their longest-lived holder.

mod cache;
mod face;
mod manager;
mod registry;
mod set;
mod store;

pub use cache::{CachePolicy, GlyphCache};
pub use face::{FontFace, GlyphInfo, GLYPH_MARGIN};
pub use manager::{FaceHandle, FaceManager};
pub use registry::{CacheSharing, FontRegistry};
pub use set::{FaceSet, FontSet};
pub use store::{Coverage, FaceMetrics, FaceStore, OutlineSource};
