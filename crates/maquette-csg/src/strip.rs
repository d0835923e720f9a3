//! Top-level stripper
//!
//! After delegation, grouping structure at the top of each tree that adds
//! no boolean meaning is dissolved. Rooted unions explode into one root per
//! branch, since the root list itself already means "union of everything".
//! Wrappers whose subtree holds no operator at all are likewise replaced by
//! their children. Intersection and Difference roots stay: they are
//! complete boolean trees on their own.

use crate::delegate::delegate;
use crate::error::Result;
use crate::work::{NodeIx, Role, WorkingSet};

/// Dissolve meaningless grouping at the top of the root list.
///
/// Spliced-in children take the dissolved wrapper's position, so the
/// left-to-right order of the preview is preserved. Each freshly spliced
/// child is examined in turn, which unwinds whole wrapper chains.
pub fn strip(ws: &mut WorkingSet<'_>) -> Result<()> {
    let mut i = 0;
    while i < ws.roots().len() {
        let r = ws.roots()[i];
        let node = ws.node(r);
        let splice = !node.children.is_empty()
            && (node.role == Role::Union
                || (node.role == Role::Primitive && !contains_operator(ws, r)));
        if splice {
            // hand the wrapper's placement down before it disappears
            delegate(ws, r)?;
            let children = ws.node(r).children.clone();
            ws.roots_mut().splice(i..=i, children);
        } else {
            i += 1;
        }
    }
    tracing::debug!(roots = ws.roots().len(), "top level stripped");
    Ok(())
}

/// Whether any operator sits in the subtree, the node itself included.
///
/// Has to walk the whole subtree: plain-group chunks are Primitive-typed
/// but can still hold operators further down.
fn contains_operator(ws: &WorkingSet<'_>, ix: NodeIx) -> bool {
    let node = ws.node(ix);
    node.role.is_operator() || node.children.iter().any(|&c| contains_operator(ws, c))
}
