//! Maquette Scene - the live scene-graph data model
//!
//! This crate holds the editable object hierarchy the Maquette editor works
//! on: solids, grouping constructs with boolean sub-types, decoration
//! (lights, cameras), per-node TRS transforms, shared materials, and a
//! generic typed tag mechanism for extensible per-node annotations.
//!
//! The CSG preview core (`maquette-csg`) consumes this model read-only; it
//! never mutates a live node.
//!
//! ## Key Types
//!
//! - [`SceneNode`] - One node of the hierarchy (kind, transform, material,
//!   flags, children, tags)
//! - [`NodeKind`] / [`GroupKind`] - What a node is, and which boolean
//!   operation a grouping node denotes
//! - [`Solid`] - Primitive solid descriptions with exact point membership
//! - [`TagSet`] / [`DepthComplexity`] - Typed per-node annotations
//!
//! ## Example
//!
//! ```rust
//! use maquette_scene::{GroupKind, SceneNode, Solid};
//!
//! let part = SceneNode::group(
//!     GroupKind::Difference,
//!     vec![
//!         SceneNode::solid("plate", Solid::cuboid(2.0, 0.2, 2.0)),
//!         SceneNode::solid("hole", Solid::cylinder(0.3, 1.0)),
//!     ],
//! );
//! assert!(part.is_operator());
//! ```

mod material;
mod node;
mod solid;
mod tag;
mod transform;

pub use material::Material;
pub use node::{GroupKind, NodeKind, SceneNode};
pub use solid::Solid;
pub use tag::{DepthComplexity, TagSet};
pub use transform::Transform;
