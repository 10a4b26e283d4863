// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Shared glyph cache

use super::GlyphInfo;
use crate::GlyphId;
use lru::LruCache;
use std::collections::hash_map::{Entry, HashMap};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};

/// Retention policy for a [`GlyphCache`]
///
/// The default is unbounded retention: glyphs are computed lazily and never
/// evicted. This is the right trade-off for a bounded font set (a map style
/// uses a handful of fonts at one size), but a bounded least-recently-used
/// policy is available where memory matters more than recomputation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Entries are never evicted
    #[default]
    Unbounded,
    /// At most this many entries, evicting the least recently used
    Lru(NonZeroUsize),
}

/// Thread-safe store of computed glyph data
///
/// Maps [`GlyphId`] to [`GlyphInfo`], computed at most once per key and
/// shared between all [`FontFace`] handles holding the same
/// `Arc<GlyphCache>` (see [`CacheSharing`]).
///
/// Concurrent lookups of a missing key may race to compute it; the first
/// insert survives and all racers observe that entry, so repeat lookups are
/// byte-identical regardless of interleaving.
///
/// [`FontFace`]: super::FontFace
/// [`CacheSharing`]: super::CacheSharing
pub struct GlyphCache {
    store: Store,
}

enum Store {
    Unbounded(RwLock<HashMap<GlyphId, Arc<GlyphInfo>>>),
    Bounded(Mutex<LruCache<GlyphId, Arc<GlyphInfo>>>),
}

impl Default for GlyphCache {
    fn default() -> Self {
        GlyphCache::new()
    }
}

impl GlyphCache {
    /// Construct with unbounded retention
    pub fn new() -> Self {
        GlyphCache::with_policy(CachePolicy::Unbounded)
    }

    /// Construct with the given retention policy
    pub fn with_policy(policy: CachePolicy) -> Self {
        let store = match policy {
            CachePolicy::Unbounded => Store::Unbounded(RwLock::new(HashMap::new())),
            CachePolicy::Lru(cap) => Store::Bounded(Mutex::new(LruCache::new(cap))),
        };
        GlyphCache { store }
    }

    /// Look up a glyph
    pub fn get(&self, glyph: GlyphId) -> Option<Arc<GlyphInfo>> {
        match &self.store {
            Store::Unbounded(map) => map.read().unwrap().get(&glyph).cloned(),
            Store::Bounded(lru) => lru.lock().unwrap().get(&glyph).cloned(),
        }
    }

    /// Insert a computed glyph, returning the surviving entry
    ///
    /// If another thread inserted `glyph` first, that entry wins and is
    /// returned; `info` is discarded.
    pub fn insert(&self, glyph: GlyphId, info: GlyphInfo) -> Arc<GlyphInfo> {
        match &self.store {
            Store::Unbounded(map) => match map.write().unwrap().entry(glyph) {
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => entry.insert(Arc::new(info)).clone(),
            },
            Store::Bounded(lru) => {
                let mut lru = lru.lock().unwrap();
                if let Some(existing) = lru.get(&glyph) {
                    return existing.clone();
                }
                let info = Arc::new(info);
                lru.put(glyph, info.clone());
                info
            }
        }
    }

    /// Number of cached glyphs
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Unbounded(map) => map.read().unwrap().len(),
            Store::Bounded(lru) => lru.lock().unwrap().len(),
        }
    }

    /// True if no glyph has been cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
