use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::assets::descriptor::ClipDescriptor;
use crate::errors::{KinemaError, Result};

/// A named collection of clips, addressable by index or name.
///
/// Clips are shared (`Arc`) so bindings can hold on to them without copying
/// keyframe data.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: Vec<Arc<AnimationClip>>,
    index: FxHashMap<String, usize>,
}

impl ClipLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every descriptor; the first failure aborts the whole library.
    pub fn from_descriptors<'a>(
        descriptors: impl IntoIterator<Item = &'a ClipDescriptor>,
    ) -> Result<Self> {
        let mut library = Self::new();
        for desc in descriptors {
            library.insert(AnimationClip::from_descriptor(desc)?)?;
        }
        Ok(library)
    }

    /// Appends a clip and returns its index. Names must be unique.
    pub fn insert(&mut self, clip: AnimationClip) -> Result<usize> {
        if self.index.contains_key(clip.name()) {
            return Err(KinemaError::DuplicateClipName(clip.name().to_string()));
        }
        let idx = self.clips.len();
        self.index.insert(clip.name().to_string(), idx);
        self.clips.push(Arc::new(clip));
        Ok(idx)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<AnimationClip>> {
        self.clips.get(index)
    }

    #[inline]
    #[must_use]
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.find_index(name).and_then(|i| self.clips.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimationClip>> {
        self.clips.iter()
    }
}
