use std::fmt::Display;
use std::sync::Arc;

use crate::block::{BlockDefinition, BlockReference};
use crate::math::bbox::BoundingBox;

/// Block definitions together with the reference tree that instances them.
#[derive(Debug, Clone)]
pub struct Scene {
	pub definitions: Vec<Arc<BlockDefinition>>,
	pub root: BlockReference,
}

impl Scene {
	pub fn new(definitions: Vec<Arc<BlockDefinition>>, root: BlockReference) -> Self {
		Self { definitions, root }
	}

	pub fn definition(&self, name: &str) -> Option<&Arc<BlockDefinition>> {
		self.definitions.iter().find(|def| def.name() == name)
	}

	/// Refresh every world transform from the root down.
	pub fn update(&mut self) {
		self.root.update_matrices_from_root();
	}

	pub fn tight_bounding_box(&mut self) -> Option<BoundingBox> {
		self.root.tight_bounding_box()
	}
}

impl Display for Scene {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "{} block definitions", self.definitions.len())?;
		write!(f, "{}", self.root)
	}
}

#[cfg(test)]
mod tests {
	use glam::{dvec3, DVec3};

	use super::*;

	const ROBOT_ARM: &str = include_str!("../demos/robot_arm.json");

	#[test]
	fn robot_arm_scene() {
		let mut scene = Scene::from_json_str(ROBOT_ARM).unwrap();
		assert_eq!(scene.definitions.len(), 7);
		assert!(scene.definition("E3").is_some());
		assert!(scene.definition("E7").is_none());

		scene.update();
		assert!(!scene.root.is_dirty());

		let bbox = scene.tight_bounding_box().unwrap();
		assert!(bbox.abs_diff_eq(&BoundingBox::new(DVec3::ZERO, dvec3(770.0, 0.0, 0.0)), 1e-9));
	}

	#[test]
	fn robot_arm_display() {
		let scene = Scene::from_json_str(ROBOT_ARM).unwrap();
		let text = scene.to_string();
		assert!(text.starts_with("7 block definitions"));
		assert_eq!(text.lines().count(), 8);
	}
}
