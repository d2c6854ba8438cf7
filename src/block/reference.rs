use std::fmt::Display;
use std::sync::Arc;

use glam::{DMat4, DVec3};

use super::BlockDefinition;
use crate::joint::Joint;
use crate::math::bbox::BoundingBox;
use crate::math::transform::{rotation_about_point, then, translation};

/// Positioned instance of a [`BlockDefinition`] and a node of the instance tree.
///
/// A reference owns its children, so the tree can neither share nodes nor form cycles.
/// Its world transform is a cache: mutating the local transform only marks the node dirty, and
/// [`update_matrices`](Self::update_matrices) brings it and its subtree back in sync.
#[derive(Debug, Clone)]
pub struct BlockReference {
	definition: Arc<BlockDefinition>,
	local: DMat4,
	/// In the node's own local frame.
	pivot: DVec3,

	// derived, refreshed by update_matrices
	world: DMat4,
	parent: DMat4,
	dirty: bool,
	/// Children were handed out mutably since the last propagation through this node.
	stale_children: bool,

	children: Vec<BlockReference>,
}

impl BlockReference {
	pub fn new(definition: Arc<BlockDefinition>) -> Self {
		Self {
			definition,
			local: DMat4::IDENTITY,
			pivot: DVec3::ZERO,
			world: DMat4::IDENTITY,
			parent: DMat4::IDENTITY,
			dirty: true,
			stale_children: false,
			children: Vec::new(),
		}
	}

	pub fn definition(&self) -> &Arc<BlockDefinition> {
		&self.definition
	}

	// tree

	/// Append a child. `None` is ignored. The child's own cache state is kept as is.
	pub fn add_child(&mut self, child: impl Into<Option<BlockReference>>) {
		if let Some(child) = child.into() {
			self.children.push(child);
		}
	}

	pub fn with_child(mut self, child: BlockReference) -> Self {
		self.add_child(child);
		self
	}

	pub fn children(&self) -> &[BlockReference] {
		&self.children
	}

	pub fn child(&self, index: usize) -> Option<&BlockReference> {
		self.children.get(index)
	}

	pub fn children_mut(&mut self) -> &mut [BlockReference] {
		self.stale_children = true;
		&mut self.children
	}

	pub fn child_mut(&mut self, index: usize) -> Option<&mut BlockReference> {
		self.stale_children = true;
		self.children.get_mut(index)
	}

	// local state

	/// Does not mark the node dirty, the pivot only affects later rotations.
	pub fn set_pivot(&mut self, pivot: DVec3) {
		self.pivot = pivot;
	}

	pub fn pivot(&self) -> DVec3 {
		self.pivot
	}

	pub fn set_local_xform(&mut self, xform: DMat4) {
		self.local = xform;
		self.dirty = true;
	}

	pub fn local_xform(&self) -> DMat4 {
		self.local
	}

	/// Replace the local transform with the transform of `joint`.
	pub fn set_joint(&mut self, joint: &Joint) {
		self.set_local_xform(joint.transform());
	}

	/// Compose a translation onto the local transform, the translation being applied first.
	pub fn translate_local(&mut self, dx: f64, dy: f64, dz: f64) {
		self.local = then(&translation(DVec3::new(dx, dy, dz)), &self.local);
		self.dirty = true;
	}

	/// Compose a rotation about the line through the pivot along `axis_unit` onto the local transform,
	/// the rotation being applied first. `axis_unit` must be unit length; it is not checked.
	pub fn rotate_about_pivot(&mut self, radians: f64, axis_unit: DVec3) {
		let rotation = rotation_about_point(radians, axis_unit, self.pivot);
		self.local = then(&rotation, &self.local);
		self.dirty = true;
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	// world state

	/// Recompute `world = local ∘ parent_world` (local applied first) and push it down the subtree.
	///
	/// Nothing is recomputed when the node is clean and `parent_world` is the transform it was last
	/// propagated with. Otherwise every child is refreshed, dirty or not, since their world
	/// transforms all depend on this one.
	pub fn update_matrices(&mut self, parent_world: &DMat4) {
		if !self.dirty && self.parent == *parent_world {
			if self.stale_children {
				self.stale_children = false;
				for child in &mut self.children {
					child.update_matrices(&self.world);
				}
			}
			return;
		}

		self.world = then(&self.local, parent_world);
		self.parent = *parent_world;
		self.dirty = false;
		self.stale_children = false;
		tracing::trace!("Refreshed world transform of {:?} reference", self.definition.name());

		for child in &mut self.children {
			child.update_matrices(&self.world);
		}
	}

	/// [`update_matrices`](Self::update_matrices) with this node as the scene root.
	pub fn update_matrices_from_root(&mut self) {
		self.update_matrices(&DMat4::IDENTITY);
	}

	/// The cached world transform, as of the last propagation. Identity if never propagated.
	pub fn world_xform(&self) -> DMat4 {
		self.world
	}

	/// Parent transform used by the last propagation.
	pub fn parent_xform(&self) -> DMat4 {
		self.parent
	}

	// bounds

	/// Tight bounds of this subtree, measured with this node as the root of the accumulation.
	///
	/// May refresh the cache: a dirty node is first propagated with the parent transform it was last
	/// propagated with, which is stale if an ancestor changed since. Propagate from the actual root
	/// before querying a non-root node. `None` if nothing in the subtree has measurable extent.
	pub fn tight_bounding_box(&mut self) -> Option<BoundingBox> {
		self.bounds_from(None)
	}

	/// Like [`tight_bounding_box`](Self::tight_bounding_box), but accumulated in the frame of the
	/// cached parent transform, i.e. in world space when the tree was propagated from its root.
	pub fn world_tight_bounding_box(&mut self) -> Option<BoundingBox> {
		let parent = self.parent;
		self.bounds_from(Some(parent))
	}

	fn bounds_from(&mut self, root: Option<DMat4>) -> Option<BoundingBox> {
		let mut bbox = BoundingBox::EMPTY;

		if self.dirty {
			let parent = self.parent;
			self.update_matrices(&parent);
		}

		let root = root.unwrap_or(DMat4::IDENTITY);
		self.accumulate_bounds(&mut bbox, &root).then_some(bbox)
	}

	/// Union the bounds of this subtree, placed under `parent_world`, into `out`.
	///
	/// World transforms are recomputed on the way down; the cache is neither read nor written.
	/// Returns whether anything contributed.
	pub fn accumulate_bounds(&self, out: &mut BoundingBox, parent_world: &DMat4) -> bool {
		let this_world = then(&self.local, parent_world);
		let mut found = false;

		for geometry in self.definition.geometries() {
			if let Some(bounds) = geometry.tight_bounding_box(Some(&this_world)) {
				out.union(&bounds);
				found = true;
			}
		}

		for child in &self.children {
			let mut child_bounds = BoundingBox::EMPTY;
			if child.accumulate_bounds(&mut child_bounds, &this_world) {
				out.union(&child_bounds);
				found = true;
			}
		}

		found
	}
}

fn rec_fmt(indent: usize, f: &mut std::fmt::Formatter<'_>, node: &BlockReference) -> std::fmt::Result {
	let name = node.definition.name();
	#[cfg(feature = "owo")]
	let name = {
		use owo_colors::OwoColorize;
		name.magenta()
	};

	let origin = node.local.transform_point3(DVec3::ZERO);
	write!(f, "{}- [{}] at {}", "  ".repeat(indent), name, origin)?;
	if node.dirty {
		write!(f, " (dirty)")?;
	}
	writeln!(f)?;

	for child in &node.children {
		rec_fmt(indent + 1, f, child)?;
	}

	Ok(())
}

impl Display for BlockReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		rec_fmt(0, f, self)
	}
}
