use glam::{DMat4, DVec3};

use super::Geometry;
use crate::math::bbox::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
	pub center: DVec3,
	pub radius: f64,
}

impl Sphere {
	pub fn new(center: DVec3, radius: f64) -> Self {
		Self { center, radius }
	}
}

impl Geometry for Sphere {
	/// The image of a sphere under an affine map is an ellipsoid; its half extent on world axis `i`
	/// is the radius times the length of row `i` of the linear part.
	fn tight_bounding_box(&self, xform: Option<&DMat4>) -> Option<BoundingBox> {
		if !self.radius.is_finite() || self.radius < 0.0 {
			return None;
		}

		let (center, half) = match xform {
			Some(m) => {
				let rows = m.transpose();
				let half = DVec3::new(
					rows.x_axis.truncate().length(),
					rows.y_axis.truncate().length(),
					rows.z_axis.truncate().length(),
				) * self.radius;
				(m.transform_point3(self.center), half)
			}
			None => (self.center, DVec3::splat(self.radius)),
		};

		let bbox = BoundingBox::new(center - half, center + half);
		bbox.is_valid().then_some(bbox)
	}
}
