//! Typed node tags
//!
//! Tools and the renderer attach small typed records to scene nodes without
//! the scene crate knowing their layout. A tag set holds at most one value
//! per Rust type, keyed by `TypeId`.
//!
//! ## Example
//!
//! ```
//! use maquette_scene::{DepthComplexity, TagSet};
//!
//! let mut tags = TagSet::new();
//! tags.insert(DepthComplexity(3));
//! assert_eq!(tags.get::<DepthComplexity>(), Some(&DepthComplexity(3)));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Heterogeneous per-node annotations, at most one value per type.
#[derive(Default)]
pub struct TagSet {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a tag, replacing any previous value of the same type
    pub fn insert<T: Any + Send + Sync>(&mut self, tag: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(tag));
    }

    /// Look up a tag by type
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Whether a tag of this type is attached
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Detach and return a tag by type
    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Number of attached tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tags are attached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagSet")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Per-solid hint for how many surface layers the preview renderer
/// should peel when this solid participates in a boolean.
///
/// Defaults are fine for convex solids; concave ones like the torus need
/// more layers to resolve correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthComplexity(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pinned(bool);

    #[test]
    fn insert_get_remove() {
        let mut tags = TagSet::new();
        assert!(tags.is_empty());

        tags.insert(DepthComplexity(2));
        tags.insert(Pinned(true));
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get::<DepthComplexity>(), Some(&DepthComplexity(2)));
        assert!(tags.contains::<Pinned>());

        assert_eq!(tags.remove::<Pinned>(), Some(Pinned(true)));
        assert!(!tags.contains::<Pinned>());
        assert_eq!(tags.remove::<Pinned>(), None);
    }

    #[test]
    fn insert_replaces_same_type() {
        let mut tags = TagSet::new();
        tags.insert(DepthComplexity(1));
        tags.insert(DepthComplexity(5));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get::<DepthComplexity>(), Some(&DepthComplexity(5)));
    }
}
