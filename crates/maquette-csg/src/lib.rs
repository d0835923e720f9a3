//! # Maquette CSG
//!
//! Per-frame CSG normalization for Maquette's interactive boolean preview.
//!
//! The editor keeps booleans live: solids stay intact in the scene graph and
//! the composite shape only ever exists on screen. Each frame this crate
//! copies the boolean part of the scene into a throwaway working set,
//! rewrites it into a union of intersection/subtraction products, and
//! flattens the result into the ordered job list the image-space renderer
//! consumes.
//!
//! ## Pipeline
//!
//! A frame runs five passes over the working set:
//!
//! 1. [`builder`] copies the relevant scene nodes and binarizes operators
//! 2. [`delegate`] pushes transforms and materials down to the leaves
//! 3. [`strip`] removes grouping structure with no boolean meaning
//! 4. [`normalize`] rewrites each tree into a sum of products
//! 5. [`flatten`] emits the per-solid render jobs
//!
//! [`Pipeline::frame`](pipeline::Pipeline::frame) runs all five.
//!
//! ## Quick Start
//!
//! ```rust
//! use maquette_csg::prelude::*;
//!
//! let scene = vec![SceneNode::group(
//!     GroupKind::Difference,
//!     vec![
//!         SceneNode::solid("plate", Solid::cuboid(2.0, 0.2, 2.0)),
//!         SceneNode::solid("hole", Solid::cylinder(0.3, 1.0)),
//!     ],
//! )];
//!
//! let pipeline = Pipeline::new();
//! let frame = pipeline.frame(&scene, &BuildOptions::default())?;
//!
//! // One product: intersect the plate, subtract the hole
//! assert_eq!(frame.plan().len(), 2);
//! # Ok::<(), maquette_csg::Error>(())
//! ```
//!
//! ## Units and Conventions
//!
//! - **Coordinate system**: right-handed, Y-up, matching `maquette-scene`
//! - **Precision**: all geometry uses `f32`
//! - **Point sets**: solids are closed; boundaries count as inside

pub mod builder;
pub mod delegate;
pub mod flatten;
pub mod normalize;
pub mod pipeline;
pub mod prefs;
pub mod strip;
pub mod work;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Pipeline entry points
    pub use crate::builder::BuildOptions;
    pub use crate::pipeline::{Frame, Pipeline};
    pub use crate::prefs::PreviewPrefs;

    // Working set
    pub use crate::work::{NodeIx, Role, WorkingSet};

    // Render plan
    pub use crate::flatten::{JobRole, RenderJob, RenderPlan};

    // Scene model
    pub use maquette_scene::{
        DepthComplexity, GroupKind, Material, NodeKind, SceneNode, Solid, TagSet, Transform,
    };

    // Math (re-export glam)
    pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

    // Error handling
    pub use crate::{Error, Result};
}
