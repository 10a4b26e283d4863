// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Per-consumer face cache

use super::{FaceSet, FontFace, FontRegistry, FontSet};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Shared handle to a created [`FontFace`]
///
/// Handles are shared within one consumer only (a face's sizing state is
/// not synchronized), hence `Rc` rather than `Arc`; the glyph cache under
/// the face may still be shared across threads.
pub type FaceHandle = Rc<RefCell<FontFace>>;

/// Per-consumer cache of created faces
///
/// Each consumer (typically one per worker thread) owns a `FaceManager`;
/// the first request for a name asks the shared [`FontRegistry`] to create
/// the face, later requests reuse the handle. No face is ever evicted
/// during a manager's lifetime.
pub struct FaceManager {
    registry: Arc<FontRegistry>,
    faces: HashMap<String, FaceHandle>,
}

impl FaceManager {
    /// Construct over a shared registry
    pub fn new(registry: Arc<FontRegistry>) -> Self {
        FaceManager {
            registry,
            faces: HashMap::new(),
        }
    }

    /// The registry this manager creates faces from
    pub fn registry(&self) -> &Arc<FontRegistry> {
        &self.registry
    }

    /// Get or create the face for a registered font name
    ///
    /// `None` means the name is unknown to the registry or its resource
    /// failed to load; callers should fall back (e.g. to the next entry of
    /// a [`FaceSet`]) rather than treat this as fatal.
    pub fn get_face(&mut self, name: &str) -> Option<FaceHandle> {
        if let Some(face) = self.faces.get(name) {
            return Some(face.clone());
        }
        let face = self.registry.create_face(name)?;
        let handle: FaceHandle = Rc::new(RefCell::new(face));
        self.faces.insert(name.to_string(), handle.clone());
        Some(handle)
    }

    /// Resolve a single font name as a one-element fallback chain
    ///
    /// The result is empty if the name fails to resolve.
    pub fn face_set(&mut self, name: &str) -> FaceSet {
        let mut set = FaceSet::new();
        if let Some(face) = self.get_face(name) {
            set.add(face);
        }
        set
    }

    /// Resolve a [`FontSet`] configuration into an ordered fallback chain
    ///
    /// Names that fail to resolve are skipped and logged; order of the
    /// remaining faces follows the configuration.
    pub fn face_set_from(&mut self, fset: &FontSet) -> FaceSet {
        let mut set = FaceSet::new();
        for name in fset.face_names() {
            match self.get_face(name) {
                Some(face) => set.add(face),
                None => log::warn!(
                    "Font set '{}': failed to resolve face '{name}'",
                    fset.name()
                ),
            }
        }
        set
    }

    /// The empty fallback chain ("no font configured")
    pub fn empty_face_set(&self) -> FaceSet {
        FaceSet::new()
    }
}
