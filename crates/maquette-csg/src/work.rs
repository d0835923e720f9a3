//! Per-frame working set
//!
//! The preview never mutates the scene graph. Each frame the builder copies
//! the boolean part of the scene into this arena, the rewrite passes mutate
//! the copy freely, and the whole arena is discarded when the frame ends.
//!
//! Nodes are addressed by index. Sharing a subtree or a delegated transform
//! between nodes is an index copy, and teardown is a single sweep of the
//! backing vectors, so nothing is ever freed twice or leaked no matter how
//! tangled the rewrites left the structure.

use std::sync::Arc;

use glam::Mat4;
use maquette_scene::{Material, SceneNode, Transform};

use crate::error::{Error, Result};

// ============================================================================
// Indices
// ============================================================================

/// Index of a node in the working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIx(u32);

impl NodeIx {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a delegated transform in the working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XformIx(u32);

impl XformIx {
    fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Node records
// ============================================================================

/// Boolean role of a working node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A leaf the renderer draws directly; also covers plain groups kept
    /// as one conventional chunk of geometry
    Primitive,
    /// Set union of the children
    Union,
    /// Set intersection of the children
    Intersection,
    /// First child minus the second
    Difference,
}

impl Role {
    /// Whether this role combines children as a boolean operator
    pub fn is_operator(self) -> bool {
        !matches!(self, Self::Primitive)
    }
}

/// Transform pushed down from ancestors, accumulated left to right.
///
/// Stored out of line so that shallow duplicates can share one entry by
/// index. Entries are written during the build and delegation passes and
/// only read after that, which is what makes the sharing sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelegatedXform {
    /// Product of the ancestor matrices delegated so far
    pub matrix: Mat4,
    /// Whether the ancestors fold in an odd number of mirroring scales
    pub flipped: bool,
}

impl Default for DelegatedXform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            flipped: false,
        }
    }
}

/// One node of the working set.
///
/// Operator nodes hold exactly two children once the builder has finished;
/// only plain-group chunks kept as [`Role::Primitive`] may hold more.
#[derive(Debug)]
pub struct WorkNode<'s> {
    /// Boolean role
    pub role: Role,
    /// Child indices into the same working set
    pub children: Vec<NodeIx>,
    /// Local transform copied from the scene
    pub transform: Transform,
    /// Delegated transform accumulated from ancestors, if any
    pub xform: Option<XformIx>,
    /// Surface material resolved so far
    pub material: Option<Arc<Material>>,
    /// Scene node this was copied from; `None` for synthesized wrappers
    pub source: Option<&'s SceneNode>,
    /// Surface layers the renderer peels when this node becomes a job
    pub depth_complexity: u32,
}

impl<'s> WorkNode<'s> {
    /// A synthesized two-child operator wrapper.
    ///
    /// Wrappers are transform-neutral and carry no scene source; they only
    /// give shape to the boolean structure.
    pub fn operator(role: Role, left: NodeIx, right: NodeIx) -> Self {
        Self {
            role,
            children: vec![left, right],
            transform: Transform::IDENTITY,
            xform: None,
            material: None,
            source: None,
            depth_complexity: 1,
        }
    }
}

// ============================================================================
// Working set
// ============================================================================

/// Arena of working nodes and delegated transforms for one preview frame.
///
/// Borrows the scene immutably for its whole lifetime, so the compiler
/// rules out scene edits while a frame is in flight. Allocation is bounded
/// by the node budget passed to [`WorkingSet::new`]; hitting the budget
/// aborts the frame with [`Error::CapacityExceeded`].
#[derive(Debug)]
pub struct WorkingSet<'s> {
    nodes: Vec<WorkNode<'s>>,
    xforms: Vec<DelegatedXform>,
    roots: Vec<NodeIx>,
    max_nodes: usize,
}

impl<'s> WorkingSet<'s> {
    /// Create an empty working set with the given node budget
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: Vec::new(),
            xforms: Vec::new(),
            roots: Vec::new(),
            max_nodes,
        }
    }

    /// Allocate a node, failing once the budget is reached
    pub fn alloc_node(&mut self, node: WorkNode<'s>) -> Result<NodeIx> {
        if self.nodes.len() >= self.max_nodes {
            return Err(Error::CapacityExceeded {
                nodes: self.nodes.len() + 1,
                limit: self.max_nodes,
            });
        }
        let ix = NodeIx(self.nodes.len() as u32);
        self.nodes.push(node);
        Ok(ix)
    }

    /// Duplicate a node into a new slot.
    ///
    /// The copy aliases the original's children and delegated transform by
    /// index and shares its material handle; nothing below it is copied.
    pub fn shallow_duplicate(&mut self, ix: NodeIx) -> Result<NodeIx> {
        let src = &self.nodes[ix.index()];
        let copy = WorkNode {
            role: src.role,
            children: src.children.clone(),
            transform: src.transform,
            xform: src.xform,
            material: src.material.clone(),
            source: src.source,
            depth_complexity: src.depth_complexity,
        };
        self.alloc_node(copy)
    }

    /// Allocate a delegated-transform entry.
    ///
    /// The store shares the node budget: delegation creates at most one
    /// entry per node, so one limit bounds the whole frame.
    pub fn alloc_xform(&mut self, xform: DelegatedXform) -> Result<XformIx> {
        if self.xforms.len() >= self.max_nodes {
            return Err(Error::CapacityExceeded {
                nodes: self.xforms.len() + 1,
                limit: self.max_nodes,
            });
        }
        let ix = XformIx(self.xforms.len() as u32);
        self.xforms.push(xform);
        Ok(ix)
    }

    /// Borrow a node
    pub fn node(&self, ix: NodeIx) -> &WorkNode<'s> {
        &self.nodes[ix.index()]
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, ix: NodeIx) -> &mut WorkNode<'s> {
        &mut self.nodes[ix.index()]
    }

    /// Borrow a delegated transform
    pub fn xform(&self, ix: XformIx) -> &DelegatedXform {
        &self.xforms[ix.index()]
    }

    /// Mutably borrow a delegated transform
    pub fn xform_mut(&mut self, ix: XformIx) -> &mut DelegatedXform {
        &mut self.xforms[ix.index()]
    }

    /// The top-level roots, in scene order
    pub fn roots(&self) -> &[NodeIx] {
        &self.roots
    }

    /// Append a top-level root
    pub fn push_root(&mut self, ix: NodeIx) {
        self.roots.push(ix);
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<NodeIx> {
        &mut self.roots
    }

    /// Full placement of a node: delegated ancestors times its own transform
    pub fn resolved_matrix(&self, ix: NodeIx) -> Mat4 {
        let node = &self.nodes[ix.index()];
        let local = node.transform.matrix();
        match node.xform {
            Some(x) => self.xforms[x.index()].matrix * local,
            None => local,
        }
    }

    /// Whether the node's full placement mirrors geometry.
    ///
    /// Parity of mirroring scales along the whole ancestor path, including
    /// the node's own local scale.
    pub fn winding_flipped(&self, ix: NodeIx) -> bool {
        let node = &self.nodes[ix.index()];
        let inherited = node.xform.is_some_and(|x| self.xforms[x.index()].flipped);
        inherited ^ node.transform.flips_orientation()
    }

    /// The scene node a working node was copied from
    pub fn source(&self, ix: NodeIx) -> Option<&'s SceneNode> {
        self.nodes[ix.index()].source
    }

    /// The material resolved for a node so far
    pub fn material(&self, ix: NodeIx) -> Option<&Arc<Material>> {
        self.nodes[ix.index()].material.as_ref()
    }

    /// Number of live nodes, including orphaned slots
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of delegated-transform entries
    pub fn xform_count(&self) -> usize {
        self.xforms.len()
    }

    /// Whether nothing has been built
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.roots.is_empty()
    }

    /// Discard everything from this frame.
    ///
    /// Safe on a partially built set and safe to call repeatedly; every
    /// node and delegated transform is released exactly once by the sweep.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.xforms.clear();
        self.roots.clear();
    }
}
