//! The per-frame preview pipeline
//!
//! [`Pipeline`] strings the passes together: build, delegate, strip,
//! normalize, flatten. One [`Pipeline::frame`] call turns the live scene
//! into a [`Frame`] holding the working set and the render plan; dropping
//! the frame releases every per-frame allocation and ends the scene borrow.

use maquette_scene::SceneNode;

use crate::builder::{BuildOptions, build};
use crate::delegate::delegate_all;
use crate::error::Result;
use crate::flatten::{RenderPlan, flatten};
use crate::normalize::normalize;
use crate::prefs::PreviewPrefs;
use crate::strip::strip;
use crate::work::WorkingSet;

// ============================================================================
// Pipeline
// ============================================================================

/// The preview pipeline, configured once and reused across frames.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    prefs: PreviewPrefs,
}

impl Pipeline {
    /// A pipeline with default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline with explicit preferences.
    pub fn with_prefs(prefs: PreviewPrefs) -> Self {
        Self { prefs }
    }

    /// The active preferences.
    pub fn prefs(&self) -> &PreviewPrefs {
        &self.prefs
    }

    /// Run one preview frame over `scene`.
    ///
    /// Copies the previewable nodes, pushes placements to the leaves,
    /// dissolves meaningless grouping, rewrites boolean trees into sums of
    /// products, and flattens the result. Scenes without a single boolean
    /// operator skip the rewrite and flatten straight to one job per root.
    ///
    /// Fails with [`Error::CapacityExceeded`](crate::Error::CapacityExceeded)
    /// when the working set outgrows the node budget and with
    /// [`Error::DepthExceeded`](crate::Error::DepthExceeded) when the scene
    /// nests deeper than the preferences allow; nothing of the aborted frame
    /// survives either way.
    pub fn frame<'s>(&self, scene: &'s [SceneNode], opts: &BuildOptions) -> Result<Frame<'s>> {
        let mut ws = WorkingSet::new(self.prefs.max_nodes);
        let found = build(&mut ws, scene, opts, &self.prefs)?;

        for root in ws.roots().to_vec() {
            delegate_all(&mut ws, root)?;
        }
        strip(&mut ws)?;

        let mut applications = 0;
        if found {
            for root in ws.roots().to_vec() {
                applications += normalize(&mut ws, root)?;
            }
        }

        let plan = flatten(&ws);
        tracing::debug!(
            nodes = ws.node_count(),
            rewrites = applications,
            jobs = plan.len(),
            "frame ready"
        );
        Ok(Frame { working: ws, plan })
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Everything one preview frame produces.
///
/// The plan's node indices address into the frame's working set, which is
/// where placements, windings, materials and scene sources are resolved.
/// The frame borrows the scene immutably, so the compiler rules out scene
/// edits while the renderer is consuming it.
#[derive(Debug)]
pub struct Frame<'s> {
    working: WorkingSet<'s>,
    plan: RenderPlan,
}

impl<'s> Frame<'s> {
    /// The working set the plan addresses into.
    pub fn working(&self) -> &WorkingSet<'s> {
        &self.working
    }

    /// The ordered render jobs.
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::flatten::JobRole;
    use glam::Vec3;
    use maquette_scene::{GroupKind, Solid, Transform};

    fn plate_with_hole() -> Vec<SceneNode> {
        vec![SceneNode::group(
            GroupKind::Difference,
            vec![
                SceneNode::solid("plate", Solid::cuboid(2.0, 0.2, 2.0)),
                SceneNode::solid("hole", Solid::cylinder(0.3, 1.0)),
            ],
        )]
    }

    #[test]
    fn a_boolean_scene_produces_an_ordered_plan() {
        let scene = plate_with_hole();
        let frame = Pipeline::new()
            .frame(&scene, &BuildOptions::default())
            .unwrap();

        let jobs = frame.plan().jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].role, JobRole::Intersect);
        assert_eq!(jobs[1].role, JobRole::Subtract);
        assert!(jobs[1].last_in_product);
        assert_eq!(frame.plan().products().count(), 1);

        let first = frame.working().source(jobs[0].node).unwrap();
        assert_eq!(first.name, "plate");
    }

    #[test]
    fn a_union_group_fans_out_into_one_product_per_solid() {
        let scene = vec![SceneNode::group(
            GroupKind::Union,
            vec![
                SceneNode::solid("a", Solid::sphere(1.0)),
                SceneNode::solid("b", Solid::sphere(1.0)),
                SceneNode::solid("c", Solid::sphere(1.0)),
            ],
        )];
        let frame = Pipeline::new()
            .frame(&scene, &BuildOptions::default())
            .unwrap();

        assert_eq!(frame.plan().products().count(), 3);
        assert!(
            frame
                .plan()
                .jobs()
                .iter()
                .all(|j| j.role == JobRole::Intersect && j.last_in_product)
        );
    }

    #[test]
    fn pure_scenery_skips_rewriting_and_plans_conventional_jobs() {
        let scene = vec![
            SceneNode::solid("floor", Solid::cuboid(10.0, 0.1, 10.0)),
            SceneNode::group(
                GroupKind::Plain,
                vec![
                    SceneNode::solid("left", Solid::sphere(1.0)),
                    SceneNode::solid("right", Solid::sphere(1.0)),
                ],
            ),
        ];
        let frame = Pipeline::new()
            .frame(&scene, &BuildOptions::default())
            .unwrap();

        // Top-level plain grouping dissolves; every solid renders on its own.
        assert_eq!(frame.plan().len(), 3);
        assert_eq!(frame.plan().products().count(), 3);
        assert!(
            frame
                .plan()
                .jobs()
                .iter()
                .all(|j| j.role == JobRole::Intersect)
        );
    }

    #[test]
    fn an_empty_scene_yields_an_empty_frame() {
        let scene: Vec<SceneNode> = Vec::new();
        let frame = Pipeline::new()
            .frame(&scene, &BuildOptions::default())
            .unwrap();
        assert!(frame.plan().is_empty());
        assert!(frame.working().is_empty());
    }

    #[test]
    fn selection_only_forwards_to_the_builder() {
        let scene = vec![
            SceneNode::solid("picked", Solid::sphere(1.0)).selected(),
            SceneNode::solid("ignored", Solid::sphere(1.0)),
        ];
        let opts = BuildOptions {
            selection_only: true,
            ..BuildOptions::default()
        };
        let frame = Pipeline::new().frame(&scene, &opts).unwrap();

        assert_eq!(frame.plan().len(), 1);
        let source = frame.working().source(frame.plan().jobs()[0].node).unwrap();
        assert_eq!(source.name, "picked");
    }

    #[test]
    fn placements_survive_the_whole_pipeline() {
        let scene = vec![
            SceneNode::group(
                GroupKind::Difference,
                vec![
                    SceneNode::solid("plate", Solid::cuboid(2.0, 0.2, 2.0)),
                    SceneNode::solid("hole", Solid::cylinder(0.3, 1.0)),
                ],
            )
            .with_transform(Transform::from_translation(Vec3::new(5.0, 0.0, 0.0))),
        ];
        let frame = Pipeline::new()
            .frame(&scene, &BuildOptions::default())
            .unwrap();

        let plate = frame.plan().jobs()[0].node;
        let origin = frame
            .working()
            .resolved_matrix(plate)
            .transform_point3(Vec3::ZERO);
        assert!((origin.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn capacity_errors_abort_the_frame() {
        let scene = plate_with_hole();
        let pipeline = Pipeline::with_prefs(PreviewPrefs::default().with_max_nodes(2));
        let err = pipeline
            .frame(&scene, &BuildOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { limit: 2, .. }));
    }

    #[test]
    fn depth_errors_abort_the_frame() {
        let deep = vec![SceneNode::group(
            GroupKind::Plain,
            vec![SceneNode::group(
                GroupKind::Plain,
                vec![SceneNode::solid("buried", Solid::sphere(1.0))],
            )],
        )];
        let pipeline = Pipeline::with_prefs(PreviewPrefs::default().with_max_depth(2));
        let err = pipeline.frame(&deep, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { limit: 2, .. }));
    }
}
