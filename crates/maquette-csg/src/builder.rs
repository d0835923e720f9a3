//! Working-set builder
//!
//! First pass of a frame: walk the scene, copy what the preview needs into
//! the working set, and leave the boolean structure strictly binary.
//!
//! The copy drops hidden branches and decoration nodes, collapses groups
//! left with a single visible child, and replaces every n-ary operator by a
//! right-leaning chain of two-child wrappers. Non-operator groups are kept
//! whole as one [`Role::Primitive`] chunk the renderer draws conventionally.

use maquette_scene::{DepthComplexity, GroupKind, NodeKind, SceneNode};

use crate::delegate::delegate;
use crate::error::{Error, Result};
use crate::prefs::PreviewPrefs;
use crate::work::{NodeIx, Role, WorkNode, WorkingSet};

/// Which parts of the scene a frame previews
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Keep only top-level nodes that are selected
    pub selection_only: bool,
    /// Copy hidden nodes as if they were visible
    pub include_hidden: bool,
}

/// Copy the previewable part of the scene into the working set.
///
/// `scene` is the ordered list of top-level siblings to preview. One root
/// is pushed per surviving sibling. Returns whether any boolean operator
/// was seen, so callers can skip the rewrite passes for pure scenery. The
/// flag is one answer for the whole scene, not one per root; a root that
/// still needs rewriting after stripping carries an operator role itself.
pub fn build<'s>(
    ws: &mut WorkingSet<'s>,
    scene: &'s [SceneNode],
    opts: &BuildOptions,
    prefs: &PreviewPrefs,
) -> Result<bool> {
    let mut found = false;
    for node in scene {
        if skip(node, opts, true) {
            continue;
        }
        if let Some(root) = copy_node(ws, node, opts, prefs, 1, &mut found)? {
            ws.push_root(root);
        }
    }
    tracing::debug!(
        nodes = ws.node_count(),
        roots = ws.roots().len(),
        operators = found,
        "working set built"
    );
    Ok(found)
}

fn skip(node: &SceneNode, opts: &BuildOptions, top_level: bool) -> bool {
    if node.hidden && !opts.include_hidden {
        return true;
    }
    if top_level && opts.selection_only && !node.selected {
        return true;
    }
    matches!(node.kind, NodeKind::Light | NodeKind::Camera)
}

fn classify(kind: GroupKind) -> Role {
    match kind {
        GroupKind::Plain => Role::Primitive,
        GroupKind::Union => Role::Union,
        GroupKind::Intersection => Role::Intersection,
        GroupKind::Difference => Role::Difference,
    }
}

fn depth_hint(node: &SceneNode, prefs: &PreviewPrefs) -> u32 {
    node.tags
        .get::<DepthComplexity>()
        .map_or(prefs.default_depth_complexity, |d| d.0)
}

fn copy_node<'s>(
    ws: &mut WorkingSet<'s>,
    node: &'s SceneNode,
    opts: &BuildOptions,
    prefs: &PreviewPrefs,
    depth: usize,
    found: &mut bool,
) -> Result<Option<NodeIx>> {
    if depth > prefs.max_depth {
        return Err(Error::DepthExceeded {
            depth,
            limit: prefs.max_depth,
        });
    }

    let kind = match node.kind {
        NodeKind::Solid(_) => {
            if !node.children.is_empty() {
                tracing::warn!(name = %node.name, "solid carries child nodes, dropping them");
            }
            let ix = ws.alloc_node(WorkNode {
                role: Role::Primitive,
                children: Vec::new(),
                transform: node.transform,
                xform: None,
                material: node.material.clone(),
                source: Some(node),
                depth_complexity: depth_hint(node, prefs),
            })?;
            return Ok(Some(ix));
        }
        NodeKind::Group(kind) => kind,
        NodeKind::Light | NodeKind::Camera => return Ok(None),
    };

    let role = classify(kind);
    if role.is_operator() {
        *found = true;
    }

    let mut kept = Vec::new();
    for child in &node.children {
        if skip(child, opts, false) {
            continue;
        }
        if let Some(ix) = copy_node(ws, child, opts, prefs, depth + 1, found)? {
            kept.push(ix);
        }
    }

    match kept.len() {
        0 => {
            if role.is_operator() {
                tracing::warn!(name = %node.name, "operator group has no visible children, dropping it");
            }
            Ok(None)
        }
        1 => {
            // A group of one means nothing boolean. Keep only the child,
            // after handing it the group's placement and material; the
            // group's slot is left orphaned for the end-of-frame sweep.
            let child = kept[0];
            let group = ws.alloc_node(WorkNode {
                role,
                children: kept,
                transform: node.transform,
                xform: None,
                material: node.material.clone(),
                source: Some(node),
                depth_complexity: depth_hint(node, prefs),
            })?;
            delegate(ws, group)?;
            Ok(Some(child))
        }
        _ => {
            let children = if role.is_operator() && kept.len() > 2 {
                binarify(ws, role, kept)?
            } else {
                kept
            };
            let ix = ws.alloc_node(WorkNode {
                role,
                children,
                transform: node.transform,
                xform: None,
                material: node.material.clone(),
                source: Some(node),
                depth_complexity: depth_hint(node, prefs),
            })?;
            Ok(Some(ix))
        }
    }
}

/// Reduce an n-ary operator's children to two by chaining wrappers.
///
/// Wrappers lean right and inherit the operator's role, except under a
/// Difference, where subtracting several solids means subtracting their
/// union, so the chain is Union-typed.
fn binarify(ws: &mut WorkingSet<'_>, role: Role, children: Vec<NodeIx>) -> Result<Vec<NodeIx>> {
    let wrapper_role = if role == Role::Difference {
        Role::Union
    } else {
        role
    };

    let mut tail = children[children.len() - 1];
    for i in (1..children.len() - 1).rev() {
        tail = ws.alloc_node(WorkNode::operator(wrapper_role, children[i], tail))?;
    }
    Ok(vec![children[0], tail])
}
