// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Named font sets and resolved face fallback chains

use super::FaceHandle;
use smallvec::SmallVec;

/// A named, ordered list of font names
///
/// Configuration-level description of a fallback chain for text spanning
/// multiple scripts; resolved into a [`FaceSet`] by a
/// [`FaceManager`](super::FaceManager).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontSet {
    name: String,
    face_names: Vec<String>,
}

impl FontSet {
    /// Construct an empty set with the given configuration name
    pub fn new(name: impl Into<String>) -> Self {
        FontSet {
            name: name.into(),
            face_names: Vec::new(),
        }
    }

    /// This set's configuration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a font name to the fallback order
    pub fn add_face_name(&mut self, name: impl Into<String>) {
        self.face_names.push(name.into());
    }

    /// The font names, in fallback order
    pub fn face_names(&self) -> &[String] {
        &self.face_names
    }

    /// Number of font names listed
    pub fn len(&self) -> usize {
        self.face_names.len()
    }

    /// True if no font name is listed
    pub fn is_empty(&self) -> bool {
        self.face_names.is_empty()
    }
}

/// An ordered fallback chain of resolved faces
///
/// Order is significant: when rendering, the first face able to supply a
/// glyph wins (that orchestration lives with the caller). An empty set is
/// the "no font configured" sentinel.
#[derive(Clone, Default)]
pub struct FaceSet {
    faces: SmallVec<[FaceHandle; 2]>,
}

impl FaceSet {
    /// Construct an empty set
    pub fn new() -> Self {
        FaceSet::default()
    }

    /// Append a face to the fallback order
    pub fn add(&mut self, face: FaceHandle) {
        self.faces.push(face);
    }

    /// The resolved faces, in fallback order
    pub fn faces(&self) -> &[FaceHandle] {
        &self.faces
    }

    /// Number of resolved faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if no face resolved
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Set the active pixel size on every face in the chain
    ///
    /// Returns true iff every face accepted the size.
    pub fn set_character_sizes(&self, dpem: f32) -> bool {
        let mut ok = true;
        for face in &self.faces {
            ok &= face.borrow_mut().set_character_sizes(dpem);
        }
        ok
    }
}
