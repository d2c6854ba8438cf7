//! Geometry measured by the block hierarchy.
//!
//! Blocks only need one thing from their geometry: the tight axis aligned bounds of the
//! shape after an optional affine transform has been applied to it.

mod curve;
mod point_cloud;
mod sphere;

use std::fmt::Debug;

use glam::{DMat4, DVec3};

use crate::math::bbox::BoundingBox;

pub use curve::{LineCurve, PolylineCurve};
pub use point_cloud::PointCloud;
pub use sphere::Sphere;

pub trait Geometry: Debug + Send + Sync {
	/// Tight bounds of the shape with `xform` applied first, `None` if the shape has no extent to measure.
	fn tight_bounding_box(&self, xform: Option<&DMat4>) -> Option<BoundingBox>;

	/// Union the tight bounds into `bbox`. On failure `bbox` is left untouched and `false` is returned.
	fn grow_tight_bounding_box(&self, bbox: &mut BoundingBox, xform: Option<&DMat4>) -> bool {
		match self.tight_bounding_box(xform) {
			Some(bounds) => {
				bbox.union(&bounds);
				true
			}
			None => false,
		}
	}
}

/// Bounds of a point set, optionally transformed.
fn transformed_bounds<'a>(points: impl Iterator<Item = &'a DVec3>, xform: Option<&DMat4>) -> Option<BoundingBox> {
	match xform {
		Some(m) => BoundingBox::from_points(points.map(|p| m.transform_point3(*p))),
		None => BoundingBox::from_points(points.copied()),
	}
}
