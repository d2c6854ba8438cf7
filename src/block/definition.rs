use std::sync::Arc;

use glam::DVec3;

use crate::geometry::Geometry;

/// Named, reusable collection of geometry anchored at a base point.
///
/// Geometry is appended while the definition is being built and never removed. Once wrapped in an
/// `Arc` and handed to [`BlockReference`](super::BlockReference)s it is read only.
#[derive(Debug, Clone, Default)]
pub struct BlockDefinition {
	name: String,
	base_point: DVec3,
	geometries: Vec<Arc<dyn Geometry>>,
}

impl BlockDefinition {
	pub fn new(name: impl Into<String>, base_point: DVec3) -> Self {
		Self {
			name: name.into(),
			base_point,
			geometries: Vec::new(),
		}
	}

	pub fn add_geometry(&mut self, geometry: Arc<dyn Geometry>) {
		self.geometries.push(geometry);
	}

	pub fn with_geometry(mut self, geometry: impl Geometry + 'static) -> Self {
		self.add_geometry(Arc::new(geometry));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn base_point(&self) -> DVec3 {
		self.base_point
	}

	/// Geometry in insertion order.
	pub fn geometries(&self) -> &[Arc<dyn Geometry>] {
		&self.geometries
	}
}
