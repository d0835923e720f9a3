//! Scene graph nodes
//!
//! The document model the editor mutates and the preview pipeline reads.
//! A node owns its children, a local [`Transform`], an optional shared
//! [`Material`], and a [`TagSet`] of typed annotations. Boolean structure
//! lives in [`GroupKind`]: a group is either a plain folder or one of the
//! three CSG operators.

use std::any::Any;
use std::sync::Arc;

use crate::material::Material;
use crate::solid::Solid;
use crate::tag::TagSet;
use crate::transform::Transform;

/// What a group combines its children with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Plain folder, no boolean meaning
    Plain,
    /// Set union of the children
    Union,
    /// Set intersection of the children
    Intersection,
    /// First child minus the remaining children
    Difference,
}

impl GroupKind {
    fn label(self) -> &'static str {
        match self {
            Self::Plain => "group",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        }
    }
}

/// The payload of a scene node.
#[derive(Debug)]
pub enum NodeKind {
    /// A primitive solid
    Solid(Solid),
    /// A grouping node, possibly a boolean operator
    Group(GroupKind),
    /// A light source; ignored by the boolean preview
    Light,
    /// A camera; ignored by the boolean preview
    Camera,
}

/// One node of the scene graph.
#[derive(Debug)]
pub struct SceneNode {
    /// Display name in the outliner
    pub name: String,
    /// What this node is
    pub kind: NodeKind,
    /// Placement relative to the parent
    pub transform: Transform,
    /// Surface appearance; `None` inherits from the nearest ancestor
    pub material: Option<Arc<Material>>,
    /// Hidden nodes are excluded from previews
    pub hidden: bool,
    /// Whether the node is in the current selection
    pub selected: bool,
    /// Typed annotations attached by tools and the renderer
    pub tags: TagSet,
    /// Child nodes, ordered
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            material: None,
            hidden: false,
            selected: false,
            tags: TagSet::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf node holding a primitive solid
    pub fn solid(name: impl Into<String>, solid: Solid) -> Self {
        Self::new(name, NodeKind::Solid(solid))
    }

    /// Create a group node, named after its kind
    pub fn group(kind: GroupKind, children: Vec<SceneNode>) -> Self {
        let mut node = Self::new(kind.label(), NodeKind::Group(kind));
        node.children = children;
        node
    }

    /// Create a light node
    pub fn light(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Light)
    }

    /// Create a camera node
    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Camera)
    }

    /// Builder: rename the node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder: set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: bind a shared material
    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder: attach a typed tag
    pub fn with_tag<T: Any + Send + Sync>(mut self, tag: T) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Builder: mark the node hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Builder: mark the node selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Whether this node is a boolean operator group
    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Group(GroupKind::Union)
                | NodeKind::Group(GroupKind::Intersection)
                | NodeKind::Group(GroupKind::Difference)
        )
    }

    /// Whether this node holds a primitive solid
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, NodeKind::Solid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn solid_node_defaults() {
        let n = SceneNode::solid("ball", Solid::sphere(1.0));
        assert!(n.is_solid());
        assert!(!n.is_operator());
        assert!(n.transform.is_identity());
        assert!(n.material.is_none());
        assert!(!n.hidden);
        assert!(n.children.is_empty());
    }

    #[test]
    fn group_kinds_classify_as_operators() {
        let plain = SceneNode::group(GroupKind::Plain, vec![]);
        let union = SceneNode::group(GroupKind::Union, vec![]);
        let inter = SceneNode::group(GroupKind::Intersection, vec![]);
        let diff = SceneNode::group(GroupKind::Difference, vec![]);

        assert!(!plain.is_operator());
        assert!(union.is_operator());
        assert!(inter.is_operator());
        assert!(diff.is_operator());
        assert_eq!(diff.name, "difference");
    }

    #[test]
    fn decoration_nodes_are_neither_solid_nor_operator() {
        let light = SceneNode::light("key");
        let camera = SceneNode::camera("main");
        assert!(!light.is_solid() && !light.is_operator());
        assert!(!camera.is_solid() && !camera.is_operator());
    }

    #[test]
    fn builders_compose() {
        let steel = Arc::new(Material::new("steel"));
        let n = SceneNode::solid("pin", Solid::cylinder(0.1, 1.0))
            .with_transform(Transform::from_translation(Vec3::new(0.0, 0.5, 0.0)))
            .with_material(Arc::clone(&steel))
            .with_tag(crate::DepthComplexity(2))
            .selected();

        assert_eq!(n.transform.translation.y, 0.5);
        assert!(n.material.is_some());
        assert!(n.selected);
        assert_eq!(n.tags.get::<crate::DepthComplexity>(), Some(&crate::DepthComplexity(2)));
    }
}
