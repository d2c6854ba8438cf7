use glam::{DMat4, DVec3};

use super::{transformed_bounds, Geometry};
use crate::math::bbox::BoundingBox;

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCurve {
	pub from: DVec3,
	pub to: DVec3,
}

impl LineCurve {
	pub fn new(from: DVec3, to: DVec3) -> Self {
		Self { from, to }
	}

	pub fn length(&self) -> f64 {
		self.from.distance(self.to)
	}
}

impl Geometry for LineCurve {
	fn tight_bounding_box(&self, xform: Option<&DMat4>) -> Option<BoundingBox> {
		// affine maps keep segments straight, so the endpoints bound the image
		transformed_bounds([self.from, self.to].iter(), xform)
	}
}

/// Chain of straight segments through `points`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolylineCurve {
	pub points: Vec<DVec3>,
}

impl PolylineCurve {
	pub fn new(points: Vec<DVec3>) -> Self {
		Self { points }
	}
}

impl Geometry for PolylineCurve {
	fn tight_bounding_box(&self, xform: Option<&DMat4>) -> Option<BoundingBox> {
		transformed_bounds(self.points.iter(), xform)
	}
}
