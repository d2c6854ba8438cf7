//! Closed-form joint transforms.
//!
//! Every function is pure. Formulas are written row-major, `m[i][j]` being row `i` and column `j`,
//! with the rotation terms in the upper-left 3x3 block and the translation in the last column.

use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::math::transform::from_rows;

/// Squared norms below this are treated as a degenerate orientation vector.
pub const QUATERNION_EPSILON: f64 = 1e-6;

const IDENTITY_QUATERNION: DVec4 = DVec4::new(1.0, 0.0, 0.0, 0.0);

/// Scale `q` so that its squared norm is 2, the scaling the quaternion rotation block expects.
///
/// On a degenerate or non-finite input `q` becomes `(1, 0, 0, 0)` and `false` is returned.
pub fn normalize_quaternion(q: &mut DVec4) -> bool {
	let len = q.length_squared();
	if !len.is_finite() || len < QUATERNION_EPSILON {
		tracing::warn!("Degenerate orientation vector {q}, substituting the identity quaternion");
		*q = IDENTITY_QUATERNION;
		return false;
	}

	let scaled = *q * (2.0 / len).sqrt();
	if !scaled.is_finite() {
		tracing::warn!("Orientation vector {q} could not be normalized, substituting the identity quaternion");
		*q = IDENTITY_QUATERNION;
		return false;
	}

	*q = scaled;
	true
}

/// Rotation rows built from raw quaternion terms.
fn quaternion_rows(q: DVec4) -> [[f64; 3]; 3] {
	let [q0, q1, q2, q3] = q.to_array();
	[
		[q0 * q0 + q1 * q1 - 1.0, q1 * q2 - q0 * q3, q1 * q3 + q0 * q2],
		[q1 * q2 + q0 * q3, q0 * q0 + q2 * q2 - 1.0, q2 * q3 - q0 * q1],
		[q1 * q3 - q0 * q2, q2 * q3 + q0 * q1, q0 * q0 + q3 * q3 - 1.0],
	]
}

/// Bryant angles: rotations about x, y, then z.
fn bryant_rows(q: DVec3) -> [[f64; 3]; 3] {
	let (s0, c0) = q.x.sin_cos();
	let (s1, c1) = q.y.sin_cos();
	let (s2, c2) = q.z.sin_cos();
	[
		[c1 * c2, -c1 * s2, s1],
		[c0 * s2 + s0 * s1 * c2, c0 * c2 - s0 * s1 * s2, -s0 * c1],
		[s0 * s2 - c0 * s1 * c2, s0 * c2 + c0 * s1 * s2, c0 * c1],
	]
}

fn euler_rows(q: DVec3) -> [[f64; 3]; 3] {
	let (s0, c0) = q.x.sin_cos();
	let (s1, c1) = q.y.sin_cos();
	let (s2, c2) = q.z.sin_cos();
	[
		[c1, s1 * s2, s1 * c2],
		[s0 * s1, c0 * c2 - s0 * c1 * s2, -c0 * s2 - s0 * c1 * c2],
		[-c0 * s1, s0 * c2 + c0 * c1 * s2, -s0 * s2 + c0 * c1 * c2],
	]
}

fn rot_x_rows(angle: f64) -> [[f64; 3]; 3] {
	let (s, c) = angle.sin_cos();
	[[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

fn rot_y_rows(angle: f64) -> [[f64; 3]; 3] {
	let (s, c) = angle.sin_cos();
	[[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Assemble a transform from a rotation block and a translation column.
fn assemble(r: [[f64; 3]; 3], t: DVec3) -> DMat4 {
	from_rows([
		[r[0][0], r[0][1], r[0][2], t.x],
		[r[1][0], r[1][1], r[1][2], t.y],
		[r[2][0], r[2][1], r[2][2], t.z],
		[0.0, 0.0, 0.0, 1.0],
	])
}

fn rotate(r: &[[f64; 3]; 3], t: DVec3) -> DVec3 {
	DVec3::new(
		r[0][0] * t.x + r[0][1] * t.y + r[0][2] * t.z,
		r[1][0] * t.x + r[1][1] * t.y + r[1][2] * t.z,
		r[2][0] * t.x + r[2][1] * t.y + r[2][2] * t.z,
	)
}

/// Free joint from a raw orientation vector. `q` is used as given, callers normalize if needed.
pub fn free(q: DVec4, t: DVec3) -> DMat4 {
	assemble(quaternion_rows(q), t)
}

/// Free joint that normalizes `q` first and expresses `t` in the rotated (body) frame.
pub fn free_quaternion(mut q: DVec4, t: DVec3) -> DMat4 {
	normalize_quaternion(&mut q);
	let r = quaternion_rows(q);
	assemble(r, rotate(&r, t))
}

pub fn free_bryant(q: DVec3, t: DVec3) -> DMat4 {
	assemble(bryant_rows(q), t)
}

pub fn free_euler(q: DVec3, t: DVec3) -> DMat4 {
	assemble(euler_rows(q), t)
}

/// Rotation about the x axis.
pub fn revolute(angle: f64) -> DMat4 {
	assemble(rot_x_rows(angle), DVec3::ZERO)
}

/// Same rotation block as [`free`], without translation.
pub fn spherical(q: DVec4) -> DMat4 {
	assemble(quaternion_rows(q), DVec3::ZERO)
}

pub fn spherical_euler(q: DVec3) -> DMat4 {
	assemble(euler_rows(q), DVec3::ZERO)
}

pub fn spherical_bryant(q: DVec3) -> DMat4 {
	assemble(bryant_rows(q), DVec3::ZERO)
}

/// Rotation about x by `q.x`, then about the new y axis by `q.y`.
pub fn universal(q: DVec2) -> DMat4 {
	let (s0, c0) = q.x.sin_cos();
	let (s1, c1) = q.y.sin_cos();
	assemble(
		[
			[c1, 0.0, s1],
			[s0 * s1, c0, -s0 * c1],
			[-c0 * s1, s0, c0 * c1],
		],
		DVec3::ZERO,
	)
}

/// Translation along x.
pub fn prismatic(distance: f64) -> DMat4 {
	assemble(rot_x_rows(0.0), DVec3::new(distance, 0.0, 0.0))
}

/// Rotation about x plus translation along x.
pub fn cylindrical(angle: f64, distance: f64) -> DMat4 {
	assemble(rot_x_rows(angle), DVec3::new(distance, 0.0, 0.0))
}

/// Rotation about x plus translation in the y-z plane.
pub fn planar(angle: f64, t: DVec2) -> DMat4 {
	assemble(rot_x_rows(angle), DVec3::new(0.0, t.x, t.y))
}

/// Translation along x, kept axis aligned, with rotations about y by `q.x` and z by `q.y`.
pub fn trans_universal(q: DVec2, distance: f64) -> DMat4 {
	let (s0, c0) = q.x.sin_cos();
	let (s1, c1) = q.y.sin_cos();
	assemble(
		[
			[c0 * c1, -c0 * s1, s0],
			[s1, c1, 0.0],
			[-s0 * c1, s0 * s1, c0],
		],
		DVec3::new(distance, 0.0, 0.0),
	)
}

/// Rotations about y by `q.x` and z by `q.y`, with the x translation carried into the rotated frame.
pub fn universal_trans(q: DVec2, distance: f64) -> DMat4 {
	let (s0, c0) = q.x.sin_cos();
	let (s1, c1) = q.y.sin_cos();
	assemble(
		[
			[c0 * c1, -s1, s0 * c1],
			[c0 * s1, c1, s0 * s1],
			[-s0, 0.0, c0],
		],
		DVec3::new(distance * c0 * c1, distance * c0 * s1, -distance * s0),
	)
}

/// Rotation about y, translation along the fixed x axis.
pub fn trans_revolute(angle: f64, distance: f64) -> DMat4 {
	assemble(rot_y_rows(angle), DVec3::new(distance, 0.0, 0.0))
}

/// Rotation about y, translation along the rotated x axis.
pub fn revolute_trans(angle: f64, distance: f64) -> DMat4 {
	let (s, c) = angle.sin_cos();
	assemble(rot_y_rows(angle), DVec3::new(distance * c, 0.0, -distance * s))
}
