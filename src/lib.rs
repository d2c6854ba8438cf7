//! Hierarchical block instancing with kinematic joints.
//!
//! [`block::BlockDefinition`]s hold shared geometry, [`block::BlockReference`]s place them in a
//! tree of local transforms, and [`joint`] turns joint parameters into those transforms.
//! World transforms are cached per node and refreshed on demand.

pub mod block;
pub mod formats;
pub mod geometry;
pub mod joint;
pub mod math;
pub mod scene;

pub use block::{BlockDefinition, BlockReference};
pub use scene::Scene;
