use glam::{DMat4, DVec3};

use super::{transformed_bounds, Geometry};
use crate::math::bbox::BoundingBox;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
	pub points: Vec<DVec3>,
}

impl PointCloud {
	pub fn new(points: Vec<DVec3>) -> Self {
		Self { points }
	}

	pub fn push(&mut self, p: DVec3) {
		self.points.push(p);
	}
}

impl Geometry for PointCloud {
	fn tight_bounding_box(&self, xform: Option<&DMat4>) -> Option<BoundingBox> {
		transformed_bounds(self.points.iter(), xform)
	}
}

#[cfg(test)]
mod tests {
	use glam::dvec3;

	use super::*;
	use crate::math::transform::translation;

	#[test]
	fn translated_cloud() {
		let mut cloud = PointCloud::default();
		assert_eq!(cloud.tight_bounding_box(None), None);

		cloud.push(dvec3(1.0, 2.0, 3.0));
		cloud.push(dvec3(-1.0, 0.0, 4.0));

		let shift = translation(dvec3(10.0, 0.0, 0.0));
		assert_eq!(
			cloud.tight_bounding_box(Some(&shift)),
			Some(BoundingBox::new(dvec3(9.0, 0.0, 3.0), dvec3(11.0, 2.0, 4.0)))
		);
	}
}
