//! Flattening normalized trees into the renderer's job list.
//!
//! After normalization every root is a union of products, where a product
//! intersects and subtracts plain solids. The image-space renderer does not
//! walk trees; it consumes a flat, ordered list of [`RenderJob`]s and
//! composites each finished product onto the frame. This module performs
//! that final projection.
//!
//! Ordering is load-bearing: jobs of one product stay contiguous, left
//! operands precede right operands, and the last job of each product is
//! tagged so the renderer knows when to composite and reset.

use crate::work::{NodeIx, Role, WorkingSet};

// ============================================================================
// Render jobs
// ============================================================================

/// How a single solid combines into the product being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobRole {
    /// Clip the running product against this solid.
    Intersect,
    /// Cut this solid out of the running product.
    Subtract,
}

/// One unit of renderer work: a single solid and its combination mode.
///
/// The job stores only the working-set index; placement, winding and
/// material are resolved through the [`WorkingSet`] the plan was built
/// from, which outlives the plan for the duration of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderJob {
    /// Node carrying geometry, resolved placement and material.
    pub node: NodeIx,
    /// Combination mode within the current product.
    pub role: JobRole,
    /// Surface layers the renderer peels for this solid.
    pub depth_complexity: u32,
    /// Set on the final job of a product. The renderer composites the
    /// accumulated product onto the frame when this job retires.
    pub last_in_product: bool,
}

/// Ordered render-job list for one preview frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    jobs: Vec<RenderJob>,
}

impl RenderPlan {
    /// All jobs in submission order.
    pub fn jobs(&self) -> &[RenderJob] {
        &self.jobs
    }

    /// The jobs grouped per product, in submission order.
    pub fn products(&self) -> impl Iterator<Item = &[RenderJob]> {
        self.jobs.split_inclusive(|job| job.last_in_product)
    }

    /// Total number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the plan contains no jobs at all.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

// ============================================================================
// Flattening
// ============================================================================

/// Projects every root of a normalized working set onto a [`RenderPlan`].
///
/// Union nodes at or near the roots fan out into separate products;
/// everything below becomes a contiguous run of intersect/subtract jobs.
/// [`Role::Primitive`] chunks emit a single job and are never entered,
/// whatever their internal hierarchy.
pub fn flatten(ws: &WorkingSet<'_>) -> RenderPlan {
    let mut jobs = Vec::new();
    for &root in ws.roots() {
        flatten_root(ws, root, &mut jobs);
    }
    tracing::debug!(jobs = jobs.len(), "flattened working set into render plan");
    RenderPlan { jobs }
}

fn flatten_root(ws: &WorkingSet<'_>, ix: NodeIx, jobs: &mut Vec<RenderJob>) {
    let node = ws.node(ix);
    if node.role == Role::Union {
        // Each arm of a union is its own product.
        for &child in &node.children {
            flatten_root(ws, child, jobs);
        }
        return;
    }

    emit(ws, ix, Role::Union, false, jobs);
    // Non-union roots emit at least one job; close the product.
    if let Some(job) = jobs.last_mut() {
        job.last_in_product = true;
    }
}

fn emit(
    ws: &WorkingSet<'_>,
    ix: NodeIx,
    parent: Role,
    has_following: bool,
    jobs: &mut Vec<RenderJob>,
) {
    let node = ws.node(ix);
    if node.role == Role::Primitive {
        // Only the right arm of a difference subtracts.
        let role = if !has_following && parent == Role::Difference {
            JobRole::Subtract
        } else {
            JobRole::Intersect
        };
        jobs.push(RenderJob {
            node: ix,
            role,
            depth_complexity: node.depth_complexity,
            last_in_product: false,
        });
        return;
    }

    let count = node.children.len();
    for (i, &child) in node.children.iter().enumerate() {
        emit(ws, child, node.role, i + 1 < count, jobs);
    }
}

// ============================================================================
// Tests
// ============================================================================
