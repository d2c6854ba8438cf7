//! Affine transform helpers over `glam::DMat4`.
//!
//! Matrices use glam's column-vector convention: a point `p` maps to `m * p` and the
//! translation lives in the last column. Composition is written with [`then`], where
//! `then(a, b)` applies `a` first and `b` afterwards.

use glam::{DMat4, DVec3};

/// Build a transform from row-major entries, `rows[i][j]` being row `i`, column `j`.
#[inline]
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
	// glam stores columns, so the row-major array read as columns is the transpose.
	DMat4::from_cols_array_2d(&rows).transpose()
}

/// Row `i`, column `j` of a transform.
#[inline]
pub fn entry(m: &DMat4, i: usize, j: usize) -> f64 {
	m.col(j)[i]
}

#[inline]
pub fn translation(v: DVec3) -> DMat4 {
	DMat4::from_translation(v)
}

/// Rotation by `radians` about the line through `center` with direction `axis`.
///
/// `axis` must be unit length; it is not checked.
pub fn rotation_about_point(radians: f64, axis: DVec3, center: DVec3) -> DMat4 {
	DMat4::from_translation(center) * DMat4::from_axis_angle(axis, radians) * DMat4::from_translation(-center)
}

/// `first` followed by `second`.
#[inline]
pub fn then(first: &DMat4, second: &DMat4) -> DMat4 {
	*second * *first
}

#[cfg(test)]
mod tests {
	use std::f64::consts::FRAC_PI_2;

	use glam::{dvec3, DVec4};

	use super::*;

	#[test]
	fn rows_land_in_rows() {
		let m = from_rows([
			[1.0, 2.0, 3.0, 4.0],
			[5.0, 6.0, 7.0, 8.0],
			[9.0, 10.0, 11.0, 12.0],
			[0.0, 0.0, 0.0, 1.0],
		]);

		assert_eq!(entry(&m, 0, 3), 4.0);
		assert_eq!(entry(&m, 2, 1), 10.0);
		assert_eq!(m.w_axis, DVec4::new(4.0, 8.0, 12.0, 1.0));
		assert_eq!(m.transform_point3(DVec3::ZERO), dvec3(4.0, 8.0, 12.0));
	}

	#[test]
	fn rotation_keeps_center_fixed() {
		let center = dvec3(1.0, 2.0, 3.0);
		let r = rotation_about_point(FRAC_PI_2, DVec3::Z, center);

		assert!(r.transform_point3(center).abs_diff_eq(center, 1e-12));
		assert!(r
			.transform_point3(center + DVec3::X)
			.abs_diff_eq(center + DVec3::Y, 1e-12));
	}

	#[test]
	fn then_applies_left_first() {
		let t = translation(dvec3(10.0, 0.0, 0.0));
		let r = rotation_about_point(FRAC_PI_2, DVec3::Z, DVec3::ZERO);

		// translate to (10,0,0), then rotate onto the y axis
		let p = then(&t, &r).transform_point3(DVec3::ZERO);
		assert!(p.abs_diff_eq(dvec3(0.0, 10.0, 0.0), 1e-12));

		// rotating the origin does nothing, then translate
		let p = then(&r, &t).transform_point3(DVec3::ZERO);
		assert!(p.abs_diff_eq(dvec3(10.0, 0.0, 0.0), 1e-12));
	}
}
