use glam::DVec3;

/// Axis aligned box. The default box is empty (invalid) and unions as a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
	pub min: DVec3,
	pub max: DVec3,
}

impl Default for BoundingBox {
	fn default() -> Self {
		Self::EMPTY
	}
}

impl BoundingBox {
	pub const EMPTY: Self = Self {
		min: DVec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
		max: DVec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
	};

	#[inline]
	pub fn new(min: DVec3, max: DVec3) -> Self {
		Self { min, max }
	}

	/// Smallest box covering every point, `None` for no points.
	pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
		let mut bbox = Self::EMPTY;
		points.into_iter().for_each(|p| bbox.include_point(p));
		bbox.is_valid().then_some(bbox)
	}

	/// Finite and `min <= max` on every axis.
	pub fn is_valid(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
	}

	/// Return to the empty state.
	pub fn reset(&mut self) {
		*self = Self::EMPTY;
	}

	pub fn include_point(&mut self, p: DVec3) {
		self.min = self.min.min(p);
		self.max = self.max.max(p);
	}

	/// Grow to cover `other`. Invalid boxes on either side are ignored.
	pub fn union(&mut self, other: &BoundingBox) {
		if !other.is_valid() {
			return;
		}
		if !self.is_valid() {
			*self = *other;
			return;
		}
		self.min = self.min.min(other.min);
		self.max = self.max.max(other.max);
	}

	pub fn diagonal(&self) -> DVec3 {
		self.max - self.min
	}

	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}

	pub fn contains_point(&self, p: DVec3) -> bool {
		self.min.cmple(p).all() && p.cmple(self.max).all()
	}

	/// Whether `other` fits inside, widened by `tolerance` on every side.
	pub fn contains_box(&self, other: &BoundingBox, tolerance: f64) -> bool {
		let slack = DVec3::splat(tolerance);
		(self.min - slack).cmple(other.min).all() && other.max.cmple(self.max + slack).all()
	}

	pub fn abs_diff_eq(&self, other: &BoundingBox, max_abs_diff: f64) -> bool {
		self.min.abs_diff_eq(other.min, max_abs_diff) && self.max.abs_diff_eq(other.max, max_abs_diff)
	}
}

#[cfg(test)]
mod tests {
	use glam::dvec3;

	use super::*;

	#[test]
	fn empty_is_invalid() {
		assert!(!BoundingBox::default().is_valid());
		assert_eq!(BoundingBox::from_points([]), None);
	}

	#[test]
	fn from_points() {
		let bbox = BoundingBox::from_points([dvec3(0.0, 1.0, 2.0), dvec3(1.0, 0.0, -2.0), dvec3(-1.0, -1.0, 0.0)]);
		assert_eq!(bbox, Some(BoundingBox::new(dvec3(-1.0, -1.0, -2.0), dvec3(1.0, 1.0, 2.0))));
	}

	#[test]
	fn union_skips_invalid() {
		let unit = BoundingBox::new(DVec3::ZERO, DVec3::ONE);

		let mut bbox = BoundingBox::EMPTY;
		bbox.union(&BoundingBox::EMPTY);
		assert!(!bbox.is_valid());

		bbox.union(&unit);
		assert_eq!(bbox, unit);

		bbox.union(&BoundingBox::EMPTY);
		assert_eq!(bbox, unit);

		bbox.union(&BoundingBox::new(dvec3(-1.0, 0.5, 0.5), dvec3(0.0, 3.0, 0.5)));
		assert_eq!(bbox, BoundingBox::new(dvec3(-1.0, 0.0, 0.0), dvec3(1.0, 3.0, 1.0)));
	}

	#[test]
	fn degenerate_box_is_valid() {
		let p = dvec3(3.0, 4.0, 5.0);
		let bbox = BoundingBox::new(p, p);
		assert!(bbox.is_valid());
		assert!(bbox.contains_point(p));
		assert_eq!(bbox.diagonal(), DVec3::ZERO);
	}

	#[test]
	fn containment() {
		let outer = BoundingBox::new(DVec3::ZERO, DVec3::splat(10.0));
		let inner = BoundingBox::new(DVec3::ONE, DVec3::splat(2.0));

		assert!(outer.contains_box(&inner, 0.0));
		assert!(!inner.contains_box(&outer, 0.0));
		assert!(outer.contains_box(&BoundingBox::new(DVec3::splat(-1e-10), DVec3::ONE), 1e-9));
		assert_eq!(outer.center(), DVec3::splat(5.0));
	}
}
