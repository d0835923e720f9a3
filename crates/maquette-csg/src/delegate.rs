//! Transform and material delegation
//!
//! Normalization rearranges operator nodes freely, so an operator's own
//! placement must not matter by the time rewriting starts. This pass pushes
//! each operator's accumulated transform down onto its children and lets
//! children without a material inherit the operator's, leaving the operator
//! itself neutral. Leaf placement is read back later through
//! [`WorkingSet::resolved_matrix`].

use std::sync::Arc;

use glam::Mat4;
use maquette_scene::Transform;

use crate::error::Result;
use crate::work::{DelegatedXform, NodeIx, WorkingSet};

/// Push one node's transform and material down onto its children.
///
/// The node's full placement, delegated ancestors times its local
/// transform, is composed into each child's annotation, creating one where
/// absent. The flip flag combines by parity. The node is then left
/// transform-neutral; its old annotation entry stays in the store because
/// other nodes may still reference it. Creating an annotation can overrun
/// the frame budget, which abandons the frame.
pub fn delegate(ws: &mut WorkingSet<'_>, ix: NodeIx) -> Result<()> {
    let node = ws.node(ix);
    if node.children.is_empty() {
        return Ok(());
    }

    let local = node.transform;
    let matrix = match node.xform {
        Some(x) => ws.xform(x).matrix * local.matrix(),
        None => local.matrix(),
    };
    let flipped =
        node.xform.is_some_and(|x| ws.xform(x).flipped) ^ local.flips_orientation();
    let material = node.material.clone();
    let children = node.children.clone();

    // Untransformed operators only need the material fallback
    let neutral = matrix == Mat4::IDENTITY && !flipped;

    for child in children {
        if !neutral {
            match ws.node(child).xform {
                Some(x) => {
                    // Sound while annotations are still unshared; sharing
                    // only starts once normalization begins duplicating.
                    let entry = ws.xform_mut(x);
                    entry.matrix = matrix * entry.matrix;
                    entry.flipped ^= flipped;
                }
                None => {
                    let x = ws.alloc_xform(DelegatedXform { matrix, flipped })?;
                    ws.node_mut(child).xform = Some(x);
                }
            }
        }
        if let Some(ref m) = material {
            let c = ws.node_mut(child);
            if c.material.is_none() {
                c.material = Some(Arc::clone(m));
            }
        }
    }

    let node = ws.node_mut(ix);
    node.transform = Transform::IDENTITY;
    node.xform = None;
    Ok(())
}

/// Delegate through every operator of a subtree, top-down.
///
/// Primitive nodes keep their placement: leaves are read at flatten time,
/// and plain-group chunks are drawn with their internal hierarchy intact.
pub fn delegate_all(ws: &mut WorkingSet<'_>, root: NodeIx) -> Result<()> {
    if !ws.node(root).role.is_operator() {
        return Ok(());
    }
    delegate(ws, root)?;
    let children = ws.node(root).children.clone();
    for child in children {
        delegate_all(ws, child)?;
    }
    Ok(())
}
