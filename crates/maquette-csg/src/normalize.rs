//! Tree normalization
//!
//! Rewrites a boolean tree, in place, into a union of products: unions end
//! up above the intersections and differences, never below them, so the
//! renderer can evaluate one product run at a time. Nine local rules carry
//! all the distributivity; a small driver applies them to a fixpoint.
//!
//! A rule mutates only the node it fires at. Operands move under freshly
//! allocated wrappers and displaced children are left orphaned in the
//! arena, so no rewrite ever changes what another live node denotes. That
//! is what lets the distributing rules duplicate a shared operand
//! shallowly, aliasing the original's children and delegated transform by
//! index.

use crate::error::Result;
use crate::work::{NodeIx, Role, WorkNode, WorkingSet};

/// The nine local rewrite shapes.
///
/// Each rule matches on a node's own role plus one child's role, and
/// rearranges just those two levels. Scanning happens in
/// [`Rule::SCAN_ORDER`] by default; the system reaches a normal form under
/// any order, which [`normalize_with`] exists to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `X − (Y ∪ Z) → (X − Y) − Z`
    DiffOfUnion,
    /// `X ∩ (Y ∪ Z) → (X ∩ Y) ∪ (X ∩ Z)`
    IntOfUnion,
    /// `X − (Y ∩ Z) → (X − Y) ∪ (X − Z)`
    DiffOfInt,
    /// `X ∩ (Y ∩ Z) → (X ∩ Y) ∩ Z`
    IntOfInt,
    /// `X − (Y − Z) → (X − Y) ∪ (X ∩ Z)`
    DiffOfDiff,
    /// `X ∩ (Y − Z) → (X ∩ Y) − Z`
    IntOfDiff,
    /// `(X − Y) ∩ Z → (X ∩ Z) − Y`
    DiffUnderInt,
    /// `(X ∪ Y) ∩ Z → (X ∩ Z) ∪ (Y ∩ Z)`
    UnionUnderInt,
    /// `(X ∪ Y) − Z → (X − Z) ∪ (Y − Z)`
    UnionUnderDiff,
}

impl Rule {
    /// Default scan order: right-child shapes first, then left-child ones
    pub const SCAN_ORDER: [Rule; 9] = [
        Rule::DiffOfUnion,
        Rule::IntOfUnion,
        Rule::DiffOfInt,
        Rule::IntOfInt,
        Rule::DiffOfDiff,
        Rule::IntOfDiff,
        Rule::DiffUnderInt,
        Rule::UnionUnderInt,
        Rule::UnionUnderDiff,
    ];
}

/// Rewrite the tree rooted at `root` into a union of products, in place.
///
/// Returns the number of rule applications; zero means the tree was
/// already in normal form. Fails only when a duplicating rule runs the
/// working set out of its node budget.
pub fn normalize(ws: &mut WorkingSet<'_>, root: NodeIx) -> Result<u64> {
    normalize_with(ws, root, &Rule::SCAN_ORDER)
}

/// Like [`normalize`], scanning the rules in the given order.
pub fn normalize_with(ws: &mut WorkingSet<'_>, root: NodeIx, order: &[Rule]) -> Result<u64> {
    let mut count = 0;
    normalize_node(ws, root, order, &mut count)?;
    tracing::debug!(applications = count, "tree normalized");
    Ok(count)
}

/// Whether a subtree is already a union of products.
///
/// Holds exactly when no rule matches anywhere: every Intersection and
/// Difference has a primitive right child, no union sits under either,
/// and a difference never sits under an intersection.
pub fn is_normal_form(ws: &WorkingSet<'_>, ix: NodeIx) -> bool {
    let node = ws.node(ix);
    match node.role {
        Role::Primitive => true,
        Role::Union => {
            is_normal_form(ws, node.children[0]) && is_normal_form(ws, node.children[1])
        }
        Role::Intersection => {
            let (a, b) = (node.children[0], node.children[1]);
            !ws.node(b).role.is_operator()
                && matches!(ws.node(a).role, Role::Primitive | Role::Intersection)
                && is_normal_form(ws, a)
        }
        Role::Difference => {
            let (a, b) = (node.children[0], node.children[1]);
            !ws.node(b).role.is_operator()
                && ws.node(a).role != Role::Union
                && is_normal_form(ws, a)
        }
    }
}

fn normalize_node(
    ws: &mut WorkingSet<'_>,
    v: NodeIx,
    order: &[Rule],
    count: &mut u64,
) -> Result<()> {
    if !ws.node(v).role.is_operator() {
        return Ok(());
    }
    loop {
        while let Some(rule) = rewrite_once(ws, v, order)? {
            *count += 1;
            tracing::trace!(rule = ?rule, "rewrite");
        }
        let first = ws.node(v).children[0];
        normalize_node(ws, first, order, count)?;

        // Settled when this node is a union, or when its right side is
        // primitive and normalizing the left surfaced nothing the
        // left-hand rules still have to move: a union must be lifted
        // here, and a difference under an intersection must be hoisted.
        let role = ws.node(v).role;
        if role == Role::Union {
            break;
        }
        let second = ws.node(v).children[1];
        let lifted = ws.node(first).role;
        if !ws.node(second).role.is_operator()
            && lifted != Role::Union
            && !(role == Role::Intersection && lifted == Role::Difference)
        {
            break;
        }
    }
    let second = ws.node(v).children[1];
    normalize_node(ws, second, order, count)
}

/// Apply the first matching rule at one node. `None` means the node is
/// locally stable under every rule in the order.
fn rewrite_once(ws: &mut WorkingSet<'_>, v: NodeIx, order: &[Rule]) -> Result<Option<Rule>> {
    for &rule in order {
        if try_rule(ws, v, rule)? {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}

fn child_pair(ws: &WorkingSet<'_>, ix: NodeIx) -> (NodeIx, NodeIx) {
    let c = &ws.node(ix).children;
    (c[0], c[1])
}

fn set_node(ws: &mut WorkingSet<'_>, ix: NodeIx, role: Role, left: NodeIx, right: NodeIx) {
    let n = ws.node_mut(ix);
    n.role = role;
    n.children[0] = left;
    n.children[1] = right;
}

/// Try one rule at one node; a non-match is the normal case, not an error.
///
/// A match mutates only `v` itself. Operands move under freshly allocated
/// wrappers and the displaced child is orphaned rather than repurposed, so
/// a subtree aliased by an earlier duplication never changes meaning
/// behind its other parent's back. Allocation happens before the mutation;
/// a failed allocation leaves the tree shape untouched, and the frame is
/// being abandoned at that point anyway.
fn try_rule(ws: &mut WorkingSet<'_>, v: NodeIx, rule: Rule) -> Result<bool> {
    let node = ws.node(v);
    if !node.role.is_operator() {
        return Ok(false);
    }
    let v_role = node.role;
    let a = node.children[0];
    let b = node.children[1];
    let a_role = ws.node(a).role;
    let b_role = ws.node(b).role;

    match rule {
        Rule::DiffOfUnion => {
            if v_role != Role::Difference || b_role != Role::Union {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let w = ws.alloc_node(WorkNode::operator(Role::Difference, a, y))?;
            set_node(ws, v, Role::Difference, w, z);
        }
        Rule::IntOfUnion => {
            if v_role != Role::Intersection || b_role != Role::Union {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let a2 = ws.shallow_duplicate(a)?;
            let l = ws.alloc_node(WorkNode::operator(Role::Intersection, a, y))?;
            let r = ws.alloc_node(WorkNode::operator(Role::Intersection, a2, z))?;
            set_node(ws, v, Role::Union, l, r);
        }
        Rule::DiffOfInt => {
            if v_role != Role::Difference || b_role != Role::Intersection {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let a2 = ws.shallow_duplicate(a)?;
            let l = ws.alloc_node(WorkNode::operator(Role::Difference, a, y))?;
            let r = ws.alloc_node(WorkNode::operator(Role::Difference, a2, z))?;
            set_node(ws, v, Role::Union, l, r);
        }
        Rule::IntOfInt => {
            if v_role != Role::Intersection || b_role != Role::Intersection {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let w = ws.alloc_node(WorkNode::operator(Role::Intersection, a, y))?;
            set_node(ws, v, Role::Intersection, w, z);
        }
        Rule::DiffOfDiff => {
            if v_role != Role::Difference || b_role != Role::Difference {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let a2 = ws.shallow_duplicate(a)?;
            let l = ws.alloc_node(WorkNode::operator(Role::Difference, a, y))?;
            let r = ws.alloc_node(WorkNode::operator(Role::Intersection, a2, z))?;
            set_node(ws, v, Role::Union, l, r);
        }
        Rule::IntOfDiff => {
            if v_role != Role::Intersection || b_role != Role::Difference {
                return Ok(false);
            }
            let (y, z) = child_pair(ws, b);
            let w = ws.alloc_node(WorkNode::operator(Role::Intersection, a, y))?;
            set_node(ws, v, Role::Difference, w, z);
        }
        Rule::DiffUnderInt => {
            if v_role != Role::Intersection || a_role != Role::Difference {
                return Ok(false);
            }
            let (x, y) = child_pair(ws, a);
            let w = ws.alloc_node(WorkNode::operator(Role::Intersection, x, b))?;
            set_node(ws, v, Role::Difference, w, y);
        }
        Rule::UnionUnderInt => {
            if v_role != Role::Intersection || a_role != Role::Union {
                return Ok(false);
            }
            let (x, y) = child_pair(ws, a);
            let z2 = ws.shallow_duplicate(b)?;
            let l = ws.alloc_node(WorkNode::operator(Role::Intersection, x, b))?;
            let r = ws.alloc_node(WorkNode::operator(Role::Intersection, y, z2))?;
            set_node(ws, v, Role::Union, l, r);
        }
        Rule::UnionUnderDiff => {
            if v_role != Role::Difference || a_role != Role::Union {
                return Ok(false);
            }
            let (x, y) = child_pair(ws, a);
            let z2 = ws.shallow_duplicate(b)?;
            let l = ws.alloc_node(WorkNode::operator(Role::Difference, x, b))?;
            let r = ws.alloc_node(WorkNode::operator(Role::Difference, y, z2))?;
            set_node(ws, v, Role::Union, l, r);
        }
    }
    Ok(true)
}
