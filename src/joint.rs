//! Mechanical joints and the local transforms they produce.

pub mod kinematics;

use std::fmt::Display;
use std::str::FromStr;

use glam::{DMat4, DVec2, DVec3, DVec4};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JointError {
	#[error("Unknown joint type {0:?}")]
	UnknownKind(String),
	#[error("{kind} joint takes {expected} {what} parameters, got {actual}")]
	ParamCount {
		kind: JointKind,
		what: &'static str,
		expected: usize,
		actual: usize,
	},
}

/// Joint topology, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
	Free,
	FreeQuaternion,
	FreeBryant,
	FreeEuler,
	Revolute,
	Spherical,
	SphericalEuler,
	SphericalBryant,
	Universal,
	Prismatic,
	Cylindrical,
	Planar,
	TransUniversal,
	UniversalTrans,
	TransRevolute,
	RevoluteTrans,
}

impl JointKind {
	pub const ALL: [JointKind; 16] = [
		JointKind::Free,
		JointKind::FreeQuaternion,
		JointKind::FreeBryant,
		JointKind::FreeEuler,
		JointKind::Revolute,
		JointKind::Spherical,
		JointKind::SphericalEuler,
		JointKind::SphericalBryant,
		JointKind::Universal,
		JointKind::Prismatic,
		JointKind::Cylindrical,
		JointKind::Planar,
		JointKind::TransUniversal,
		JointKind::UniversalTrans,
		JointKind::TransRevolute,
		JointKind::RevoluteTrans,
	];

	pub fn name(self) -> &'static str {
		match self {
			JointKind::Free => "Free",
			JointKind::FreeQuaternion => "FreeQuaternion",
			JointKind::FreeBryant => "FreeBryant",
			JointKind::FreeEuler => "FreeEuler",
			JointKind::Revolute => "Revolute",
			JointKind::Spherical => "Spherical",
			JointKind::SphericalEuler => "SphericalEuler",
			JointKind::SphericalBryant => "SphericalBryant",
			JointKind::Universal => "Universal",
			JointKind::Prismatic => "Prismatic",
			JointKind::Cylindrical => "Cylindrical",
			JointKind::Planar => "Planar",
			JointKind::TransUniversal => "TransUniversal",
			JointKind::UniversalTrans => "UniversalTrans",
			JointKind::TransRevolute => "TransRevolute",
			JointKind::RevoluteTrans => "RevoluteTrans",
		}
	}

	/// Number of angle (or orientation vector) parameters.
	pub fn rotation_arity(self) -> usize {
		match self {
			JointKind::Free | JointKind::FreeQuaternion | JointKind::Spherical => 4,
			JointKind::FreeBryant | JointKind::FreeEuler | JointKind::SphericalEuler | JointKind::SphericalBryant => 3,
			JointKind::Universal | JointKind::TransUniversal | JointKind::UniversalTrans => 2,
			JointKind::Revolute
			| JointKind::Cylindrical
			| JointKind::Planar
			| JointKind::TransRevolute
			| JointKind::RevoluteTrans => 1,
			JointKind::Prismatic => 0,
		}
	}

	/// Number of translation parameters.
	pub fn translation_arity(self) -> usize {
		match self {
			JointKind::Free | JointKind::FreeQuaternion | JointKind::FreeBryant | JointKind::FreeEuler => 3,
			JointKind::Planar => 2,
			JointKind::Prismatic
			| JointKind::Cylindrical
			| JointKind::TransUniversal
			| JointKind::UniversalTrans
			| JointKind::TransRevolute
			| JointKind::RevoluteTrans => 1,
			JointKind::Revolute
			| JointKind::Spherical
			| JointKind::SphericalEuler
			| JointKind::SphericalBryant
			| JointKind::Universal => 0,
		}
	}
}

impl Display for JointKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for JointKind {
	type Err = JointError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		JointKind::ALL
			.into_iter()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| JointError::UnknownKind(s.to_owned()))
	}
}

/// A joint with its current parameters.
///
/// Angles are in radians. Quaternion-like orientation vectors are ordered `(q0, q1, q2, q3)`
/// with `q0` the scalar part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Joint {
	/// Raw orientation vector, not normalized.
	Free { rotation: DVec4, translation: DVec3 },
	/// Orientation vector normalized on evaluation, translation in the body frame.
	FreeQuaternion { rotation: DVec4, translation: DVec3 },
	FreeBryant { angles: DVec3, translation: DVec3 },
	FreeEuler { angles: DVec3, translation: DVec3 },
	Revolute { angle: f64 },
	Spherical { rotation: DVec4 },
	SphericalEuler { angles: DVec3 },
	SphericalBryant { angles: DVec3 },
	Universal { angles: DVec2 },
	Prismatic { distance: f64 },
	Cylindrical { angle: f64, distance: f64 },
	Planar { angle: f64, translation: DVec2 },
	TransUniversal { angles: DVec2, distance: f64 },
	UniversalTrans { angles: DVec2, distance: f64 },
	TransRevolute { angle: f64, distance: f64 },
	RevoluteTrans { angle: f64, distance: f64 },
}

fn check_arity(kind: JointKind, what: &'static str, expected: usize, params: &[f64]) -> Result<(), JointError> {
	if params.len() != expected {
		return Err(JointError::ParamCount {
			kind,
			what,
			expected,
			actual: params.len(),
		});
	}
	Ok(())
}

impl Joint {
	/// Build a joint from flat parameter lists, checking their lengths against the kind.
	pub fn from_params(kind: JointKind, rotation: &[f64], translation: &[f64]) -> Result<Self, JointError> {
		check_arity(kind, "rotation", kind.rotation_arity(), rotation)?;
		check_arity(kind, "translation", kind.translation_arity(), translation)?;

		let q = rotation;
		let t = translation;
		Ok(match kind {
			JointKind::Free => Joint::Free {
				rotation: DVec4::from_slice(q),
				translation: DVec3::from_slice(t),
			},
			JointKind::FreeQuaternion => Joint::FreeQuaternion {
				rotation: DVec4::from_slice(q),
				translation: DVec3::from_slice(t),
			},
			JointKind::FreeBryant => Joint::FreeBryant {
				angles: DVec3::from_slice(q),
				translation: DVec3::from_slice(t),
			},
			JointKind::FreeEuler => Joint::FreeEuler {
				angles: DVec3::from_slice(q),
				translation: DVec3::from_slice(t),
			},
			JointKind::Revolute => Joint::Revolute { angle: q[0] },
			JointKind::Spherical => Joint::Spherical {
				rotation: DVec4::from_slice(q),
			},
			JointKind::SphericalEuler => Joint::SphericalEuler {
				angles: DVec3::from_slice(q),
			},
			JointKind::SphericalBryant => Joint::SphericalBryant {
				angles: DVec3::from_slice(q),
			},
			JointKind::Universal => Joint::Universal {
				angles: DVec2::from_slice(q),
			},
			JointKind::Prismatic => Joint::Prismatic { distance: t[0] },
			JointKind::Cylindrical => Joint::Cylindrical {
				angle: q[0],
				distance: t[0],
			},
			JointKind::Planar => Joint::Planar {
				angle: q[0],
				translation: DVec2::from_slice(t),
			},
			JointKind::TransUniversal => Joint::TransUniversal {
				angles: DVec2::from_slice(q),
				distance: t[0],
			},
			JointKind::UniversalTrans => Joint::UniversalTrans {
				angles: DVec2::from_slice(q),
				distance: t[0],
			},
			JointKind::TransRevolute => Joint::TransRevolute {
				angle: q[0],
				distance: t[0],
			},
			JointKind::RevoluteTrans => Joint::RevoluteTrans {
				angle: q[0],
				distance: t[0],
			},
		})
	}

	pub fn kind(&self) -> JointKind {
		match self {
			Joint::Free { .. } => JointKind::Free,
			Joint::FreeQuaternion { .. } => JointKind::FreeQuaternion,
			Joint::FreeBryant { .. } => JointKind::FreeBryant,
			Joint::FreeEuler { .. } => JointKind::FreeEuler,
			Joint::Revolute { .. } => JointKind::Revolute,
			Joint::Spherical { .. } => JointKind::Spherical,
			Joint::SphericalEuler { .. } => JointKind::SphericalEuler,
			Joint::SphericalBryant { .. } => JointKind::SphericalBryant,
			Joint::Universal { .. } => JointKind::Universal,
			Joint::Prismatic { .. } => JointKind::Prismatic,
			Joint::Cylindrical { .. } => JointKind::Cylindrical,
			Joint::Planar { .. } => JointKind::Planar,
			Joint::TransUniversal { .. } => JointKind::TransUniversal,
			Joint::UniversalTrans { .. } => JointKind::UniversalTrans,
			Joint::TransRevolute { .. } => JointKind::TransRevolute,
			Joint::RevoluteTrans { .. } => JointKind::RevoluteTrans,
		}
	}

	/// Local transform of the joint at its current parameters.
	pub fn transform(&self) -> DMat4 {
		use kinematics::*;

		match *self {
			Joint::Free { rotation, translation } => free(rotation, translation),
			Joint::FreeQuaternion { rotation, translation } => free_quaternion(rotation, translation),
			Joint::FreeBryant { angles, translation } => free_bryant(angles, translation),
			Joint::FreeEuler { angles, translation } => free_euler(angles, translation),
			Joint::Revolute { angle } => revolute(angle),
			Joint::Spherical { rotation } => spherical(rotation),
			Joint::SphericalEuler { angles } => spherical_euler(angles),
			Joint::SphericalBryant { angles } => spherical_bryant(angles),
			Joint::Universal { angles } => universal(angles),
			Joint::Prismatic { distance } => prismatic(distance),
			Joint::Cylindrical { angle, distance } => cylindrical(angle, distance),
			Joint::Planar { angle, translation } => planar(angle, translation),
			Joint::TransUniversal { angles, distance } => trans_universal(angles, distance),
			Joint::UniversalTrans { angles, distance } => universal_trans(angles, distance),
			Joint::TransRevolute { angle, distance } => trans_revolute(angle, distance),
			Joint::RevoluteTrans { angle, distance } => revolute_trans(angle, distance),
		}
	}
}
