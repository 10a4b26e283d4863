// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font registry: catalog of known fonts, factory for faces

use super::store::FaceStore;
use super::{CachePolicy, FontFace, GlyphCache};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use ttf_parser::{name_id, Face};

/// Glyph-cache sharing granularity for faces created by one registry
///
/// Two faces should share a [`GlyphCache`] only when they would compute
/// identical entries for identical keys; glyph identifiers are private to a
/// font resource and metrics depend on the rendering size, so the safe
/// default shares per source with one rendering size per registry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheSharing {
    /// Faces loaded from the same file or blob share one cache
    #[default]
    PerSource,
    /// Faces share only when loaded from the same source *and* face index
    PerFace,
    /// Every created face gets a fresh cache
    Never,
}

/// Where a registered face's data comes from
#[derive(Clone)]
enum FontSource {
    File(PathBuf),
    Memory(Arc<Vec<u8>>),
}

impl FontSource {
    fn describe(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Memory(_) => "<memory>".to_string(),
        }
    }

    /// Key for glyph-cache sharing; distinct memory blobs stay distinct
    fn cache_key(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Memory(data) => format!("<memory:{:p}>", Arc::as_ptr(data)),
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    /// "<family> <style>" → (face index, source)
    name_map: BTreeMap<String, (u32, FontSource)>,
    glyph_caches: HashMap<(String, u32), Arc<GlyphCache>>,
}

/// Catalog of known fonts and factory for [`FontFace`] instances
///
/// One registry per process is the expected default, but this is a caller
/// choice, not an enforced singleton: construct one and share it (usually
/// via `Arc`) with every [`FaceManager`].
///
/// All mutable state sits behind a single mutex. Registration is expected
/// to be rare (typically at startup) relative to face creation and glyph
/// lookups, so the coarse lock is not a bottleneck; glyph rendering never
/// takes it.
///
/// [`FaceManager`]: super::FaceManager
pub struct FontRegistry {
    inner: Mutex<RegistryInner>,
    sharing: CacheSharing,
    policy: CachePolicy,
}

impl Default for FontRegistry {
    fn default() -> Self {
        FontRegistry::new()
    }
}

impl FontRegistry {
    /// Construct with default configuration
    ///
    /// Glyph caches are shared per source ([`CacheSharing::PerSource`]) and
    /// grow unbounded ([`CachePolicy::Unbounded`]).
    pub fn new() -> Self {
        FontRegistry::with_config(CacheSharing::default(), CachePolicy::default())
    }

    /// Construct with explicit cache sharing and retention configuration
    pub fn with_config(sharing: CacheSharing, policy: CachePolicy) -> Self {
        FontRegistry {
            inner: Mutex::new(RegistryInner::default()),
            sharing,
            policy,
        }
    }

    /// Whether a candidate file looks like a registrable font
    ///
    /// Inspects the file name only (no I/O, no side effects); actual
    /// parsing happens at registration.
    pub fn is_font_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                matches!(
                    ext.to_ascii_lowercase().as_str(),
                    "ttf" | "otf" | "ttc" | "otc"
                )
            })
            .unwrap_or(false)
    }

    /// Register every face found in a font file
    ///
    /// A file may embed several family/style combinations; each is recorded
    /// under the key `"<family> <style>"` (style defaulting to "Regular").
    /// Registering the same file again is idempotent.
    ///
    /// Returns true iff at least one face was registered.
    pub fn register_font(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("Failed to read font file {}: {err}", path.display());
                return false;
            }
        };
        self.register_source(Arc::new(data), FontSource::File(path.to_path_buf()))
    }

    /// Register every face found in an in-memory font blob
    ///
    /// Returns true iff at least one face was registered.
    pub fn register_font_data(&self, data: Vec<u8>) -> bool {
        let blob = Arc::new(data);
        self.register_source(blob.clone(), FontSource::Memory(blob))
    }

    /// Register all font files under a directory
    ///
    /// Candidates are filtered through [`Self::is_font_file`]; per-file and
    /// per-entry errors are logged and skipped. Returns true iff at least
    /// one font anywhere in the scanned tree registered successfully.
    pub fn register_fonts(&self, dir: &Path, recurse: bool) -> bool {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Failed to scan font directory {}: {err}", dir.display());
                return false;
            }
        };

        let mut registered = false;
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    log::warn!("Failed to read directory entry in {}: {err}", dir.display());
                    continue;
                }
            };
            if path.is_dir() {
                if recurse {
                    registered |= self.register_fonts(&path, true);
                }
            } else if Self::is_font_file(&path) {
                registered |= self.register_font(&path);
            }
        }
        registered
    }

    /// Snapshot of all registered family/style keys, sorted
    pub fn face_names(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.name_map.keys().cloned().collect()
    }

    /// Read-only view of the registry: name → (face index, source)
    ///
    /// Intended for diagnostics and tests.
    pub fn get_mapping(&self) -> BTreeMap<String, (u32, String)> {
        let inner = self.inner.lock().unwrap();
        inner
            .name_map
            .iter()
            .map(|(name, (index, source))| (name.clone(), (*index, source.describe())))
            .collect()
    }

    /// Create a sized face for a registered name
    ///
    /// Loads the backing resource (re-reading the file, or cloning the
    /// in-memory blob) and attaches a glyph cache per the configured
    /// [`CacheSharing`]. Returns `None` — with the cause logged — for
    /// unknown names and load failures; the registry is left unchanged in
    /// that case.
    pub fn create_face(&self, name: &str) -> Option<FontFace> {
        let (index, source) = {
            let inner = self.inner.lock().unwrap();
            inner.name_map.get(name).cloned()?
        };

        let blob = match &source {
            FontSource::File(path) => match fs::read(path) {
                Ok(data) => Arc::new(data),
                Err(err) => {
                    log::warn!("Failed to re-read font file {}: {err}", path.display());
                    return None;
                }
            },
            FontSource::Memory(data) => data.clone(),
        };

        let store = match FaceStore::new(blob, index) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Failed to load face '{name}': {err}");
                return None;
            }
        };

        let cache = self.glyph_cache_for(&source, index);
        Some(FontFace::new(Box::new(store), cache))
    }

    /// Enumerate and record the faces of one font resource
    fn register_source(&self, blob: Arc<Vec<u8>>, source: FontSource) -> bool {
        let count = ttf_parser::fonts_in_collection(&blob).unwrap_or(1);
        let mut registered = false;

        let mut inner = self.inner.lock().unwrap();
        for index in 0..count {
            let face = match Face::parse(&blob, index) {
                Ok(face) => face,
                Err(err) => {
                    log::warn!(
                        "Failed to parse face {index} of {}: {err}",
                        source.describe()
                    );
                    continue;
                }
            };
            let Some(family) = face_name(&face, name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY)
            else {
                log::warn!("Face {index} of {} has no family name", source.describe());
                continue;
            };
            let style = face_name(&face, name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY)
                .unwrap_or_else(|| "Regular".to_string());

            let name = format!("{family} {style}");
            log::debug!("Registered face '{name}' from {}", source.describe());
            inner.name_map.insert(name, (index, source.clone()));
            registered = true;
        }
        registered
    }

    fn glyph_cache_for(&self, source: &FontSource, index: u32) -> Arc<GlyphCache> {
        let key = match self.sharing {
            CacheSharing::Never => {
                return Arc::new(GlyphCache::with_policy(self.policy));
            }
            CacheSharing::PerSource => (source.cache_key(), 0),
            CacheSharing::PerFace => (source.cache_key(), index),
        };
        let mut inner = self.inner.lock().unwrap();
        inner
            .glyph_caches
            .entry(key)
            .or_insert_with(|| Arc::new(GlyphCache::with_policy(self.policy)))
            .clone()
    }
}

/// Look up an English/Unicode name-table entry, with fallback
fn face_name(face: &Face, primary: u16, fallback: u16) -> Option<String> {
    let get = |id: u16| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id && name.is_unicode())
            .find_map(|name| name.to_string())
    };
    get(primary).or_else(|| get(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_file_candidates() {
        assert!(FontRegistry::is_font_file(Path::new("/fonts/a.ttf")));
        assert!(FontRegistry::is_font_file(Path::new("b.OTF")));
        assert!(FontRegistry::is_font_file(Path::new("c.ttc")));
        assert!(FontRegistry::is_font_file(Path::new("d.otc")));
        assert!(!FontRegistry::is_font_file(Path::new("e.woff2")));
        assert!(!FontRegistry::is_font_file(Path::new("readme.txt")));
        assert!(!FontRegistry::is_font_file(Path::new("no_extension")));
    }

    #[test]
    fn unreadable_file_is_rejected() {
        let registry = FontRegistry::new();
        assert!(!registry.register_font("/nonexistent/font.ttf"));
        assert!(registry.face_names().is_empty());
    }

    #[test]
    fn garbage_data_is_rejected() {
        let registry = FontRegistry::new();
        assert!(!registry.register_font_data(b"not a font at all".to_vec()));
        assert!(registry.face_names().is_empty());
        assert!(registry.get_mapping().is_empty());
    }

    #[test]
    fn unknown_name_yields_no_face() {
        let registry = FontRegistry::new();
        assert!(registry.create_face("DoesNotExist").is_none());
        assert!(registry.face_names().is_empty());
    }

    #[test]
    fn missing_directory_is_rejected() {
        let registry = FontRegistry::new();
        assert!(!registry.register_fonts(Path::new("/nonexistent/dir"), true));
    }
}
