use std::sync::Arc;

use glam::{DMat4, DVec3};
use json::JsonValue;

use crate::block::{BlockDefinition, BlockReference};
use crate::geometry::{Geometry, LineCurve, PointCloud, PolylineCurve, Sphere};
use crate::joint::{Joint, JointError, JointKind};
use crate::scene::Scene;

use super::json::{as_dvec3s, JsonError, JsonObject, JsonResult, SerialExtend};

pub type SceneParseResult<T> = Result<T, SceneParseError>;

#[derive(Debug, thiserror::Error)]
pub enum SceneParseError {
	#[error("Could not parse scene file\n  - {0}")]
	JsonParse(#[from] json::Error),
	#[error(transparent)]
	JsonError(#[from] JsonError),
	#[error(transparent)]
	Joint(#[from] JointError),
	#[error("Unknown definition {0:?}")]
	UnknownDefinition(String),
	#[error("Definition {0:?} is declared more than once")]
	DuplicateDefinition(String),
	#[error("Unknown geometry type {0:?}")]
	UnknownGeometryType(String),
	#[error("Rotation axis has no direction")]
	ZeroRotationAxis,
}

// json structure helpers

impl SceneParseError {
	pub fn nested(self, key: &str) -> Self {
		match self {
			SceneParseError::JsonError(err) => SceneParseError::JsonError(err.nested(key)),
			_ => self,
		}
	}
}

fn vals<T>(key: &str, res: SceneParseResult<T>) -> SceneParseResult<T> {
	res.map_err(|e| e.nested(key))
}

fn as_object<'file>(msg: &str, val: &'file JsonValue) -> SceneParseResult<JsonObject<'file>> {
	if let Some(obj) = val.as_object() {
		Ok(JsonObject(obj))
	} else {
		Err(SceneParseError::JsonError(JsonError::ValueIsNotObject(msg.to_owned())))
	}
}

/// Absent and `null` keys are `None`, present keys must hold the right type.
fn optional<'file, T>(
	obj: &JsonObject<'file>,
	key: &str,
	get: impl FnOnce(&JsonObject<'file>, &str) -> JsonResult<T>,
) -> SceneParseResult<Option<T>> {
	if obj.contains(key) {
		Ok(Some(get(obj, key)?))
	} else {
		Ok(None)
	}
}

// definitions

fn deserialize_geometry(obj: JsonObject) -> SceneParseResult<Arc<dyn Geometry>> {
	let geometry: Arc<dyn Geometry> = match obj.get_str("type")? {
		"Line" => Arc::new(LineCurve::new(obj.get_dvec3("from")?, obj.get_dvec3("to")?)),
		"Polyline" => Arc::new(PolylineCurve::new(as_dvec3s("points", obj.get_list("points")?)?)),
		"PointCloud" => Arc::new(PointCloud::new(as_dvec3s("points", obj.get_list("points")?)?)),
		"Sphere" => Arc::new(Sphere::new(obj.get_dvec3("center")?, obj.get_f64("radius")?)),
		unknown => return Err(SceneParseError::UnknownGeometryType(unknown.to_owned())),
	};
	Ok(geometry)
}

fn deserialize_definition(obj: JsonObject) -> SceneParseResult<BlockDefinition> {
	let name = obj.get_str("name")?;
	let base = optional(&obj, "base", JsonObject::get_dvec3)?.unwrap_or_default();
	let mut definition = BlockDefinition::new(name, base);

	let entries = optional(&obj, "geometry", JsonObject::get_list)?.unwrap_or_default();
	for (i, entry) in entries.iter().enumerate() {
		let Some(geometry) = entry.as_object() else {
			tracing::error!("Skipping geometry[{}] of definition {:?}: not an object", i, name);
			continue;
		};

		let geometry = deserialize_geometry(JsonObject(geometry)).map_err(|e| e.nested(&format!("geometry[{}]", i)))?;
		definition.add_geometry(geometry);
	}

	Ok(definition)
}

fn deserialize_definitions(vals: &[JsonValue]) -> SceneParseResult<Vec<Arc<BlockDefinition>>> {
	let mut definitions: Vec<Arc<BlockDefinition>> = Vec::with_capacity(vals.len());

	for (i, val) in vals.iter().enumerate() {
		let msg = &format!("definitions[{}]", i);

		let obj = as_object("definition", val).map_err(|e| e.nested(msg))?;
		let definition = deserialize_definition(obj).map_err(|e| e.nested(msg))?;
		if definitions.iter().any(|def| def.name() == definition.name()) {
			return Err(SceneParseError::DuplicateDefinition(definition.name().to_owned()));
		}
		definitions.push(Arc::new(definition));
	}

	Ok(definitions)
}

// references

fn deserialize_joint(obj: JsonObject) -> SceneParseResult<Joint> {
	let kind: JointKind = obj.get_str("type")?.parse()?;
	let rotation = optional(&obj, "rotation", JsonObject::get_f64s)?.unwrap_or_default();
	let translation = optional(&obj, "translation", JsonObject::get_f64s)?.unwrap_or_default();

	Ok(Joint::from_params(kind, &rotation, &translation)?)
}

/// Angle and unit axis.
fn deserialize_rotation(obj: JsonObject) -> SceneParseResult<(f64, DVec3)> {
	let radians = obj.get_f64("radians")?;
	let axis = obj.get_dvec3("axis")?;
	let axis = axis.try_normalize().ok_or(SceneParseError::ZeroRotationAxis)?;
	Ok((radians, axis))
}

/// Build the local transform in order: explicit transform, joint, translation, pivot rotation.
/// Each later step is applied first to points in the node frame.
fn deserialize_node(obj: JsonObject, definitions: &[Arc<BlockDefinition>]) -> SceneParseResult<BlockReference> {
	let name = obj.get_str("definition")?;
	let definition = definitions
		.iter()
		.find(|def| def.name() == name)
		.cloned()
		.ok_or_else(|| SceneParseError::UnknownDefinition(name.to_owned()))?;

	let mut node = BlockReference::new(definition);

	if let Some(pivot) = optional(&obj, "pivot", JsonObject::get_dvec3)? {
		node.set_pivot(pivot);
	}

	let mut local = match optional(&obj, "transform", JsonObject::get_f64_array::<16>)? {
		// row-major in the file
		Some(entries) => DMat4::from_cols_array(&entries).transpose(),
		None => DMat4::IDENTITY,
	};
	if let Some(joint) = optional(&obj, "joint", JsonObject::get_object)? {
		let joint = vals("joint", deserialize_joint(joint))?;
		local *= joint.transform();
	}
	node.set_local_xform(local);

	if let Some([dx, dy, dz]) = optional(&obj, "translate", JsonObject::get_f64_array::<3>)? {
		node.translate_local(dx, dy, dz);
	}

	if let Some(rotate) = optional(&obj, "rotate", JsonObject::get_object)? {
		let (radians, axis) = vals("rotate", deserialize_rotation(rotate))?;
		node.rotate_about_pivot(radians, axis);
	}

	let children = optional(&obj, "children", JsonObject::get_list)?.unwrap_or_default();
	for (i, child) in children.iter().enumerate() {
		let msg = &format!("children[{}]", i);

		let child = as_object("child", child).map_err(|e| e.nested(msg))?;
		let child = deserialize_node(child, definitions).map_err(|e| e.nested(msg))?;
		node.add_child(child);
	}

	Ok(node)
}

// scene

impl Scene {
	pub fn from_json_str(src: &str) -> SceneParseResult<Self> {
		let payload = json::parse(src)?;
		Self::from_json(&payload)
	}

	pub fn from_json(payload: &JsonValue) -> SceneParseResult<Self> {
		let obj = as_object("(scene)", payload)?;

		let definitions = vals("definitions", deserialize_definitions(obj.get_list("definitions")?))?;
		let root = vals("root", deserialize_node(obj.get_object("root")?, &definitions))?;
		tracing::debug!("Loaded scene with {} block definitions", definitions.len());

		Ok(Scene::new(definitions, root))
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::FRAC_PI_2;

	use glam::dvec3;

	use super::*;
	use crate::math::bbox::BoundingBox;
	use crate::math::transform::{rotation_about_point, translation};

	const DEFINITIONS: &str = r#"[
		{ "name": "Rod", "geometry": [ { "type": "Line", "from": [0, 0, 0], "to": [0, 0, 10] } ] },
		{ "name": "Empty", "base": [1, 2, 3] }
	]"#;

	fn scene_with_root(root: &str) -> SceneParseResult<Scene> {
		Scene::from_json_str(&format!(r#"{{ "definitions": {DEFINITIONS}, "root": {root} }}"#))
	}

	#[test]
	fn minimal_scene() {
		let scene = scene_with_root(r#"{ "definition": "Rod" }"#).unwrap();

		assert_eq!(scene.definitions.len(), 2);
		assert_eq!(scene.root.local_xform(), DMat4::IDENTITY);
		assert_eq!(scene.root.pivot(), DVec3::ZERO);
		assert!(scene.root.children().is_empty());
		assert_eq!(scene.definition("Empty").unwrap().base_point(), dvec3(1.0, 2.0, 3.0));
		assert!(Arc::ptr_eq(scene.root.definition(), scene.definition("Rod").unwrap()));
	}

	#[test]
	fn every_geometry_type() {
		let mut scene = Scene::from_json_str(
			r#"{
				"definitions": [ { "name": "All", "geometry": [
					{ "type": "Line", "from": [0, 0, 0], "to": [1, 0, 0] },
					{ "type": "Polyline", "points": [[0, 0, 0], [0, 2, 0], [0, 2, 2]] },
					{ "type": "PointCloud", "points": [[-1, -1, -1]] },
					{ "type": "Sphere", "center": [5, 0, 0], "radius": 0.5 }
				] } ],
				"root": { "definition": "All" }
			}"#,
		)
		.unwrap();

		assert_eq!(scene.definition("All").unwrap().geometries().len(), 4);
		let bbox = scene.tight_bounding_box().unwrap();
		assert!(bbox.abs_diff_eq(&BoundingBox::new(dvec3(-1.0, -1.0, -1.0), dvec3(5.5, 2.0, 2.0)), 1e-12));
	}

	#[test]
	fn non_object_geometry_is_skipped() {
		let scene = Scene::from_json_str(
			r#"{
				"definitions": [ { "name": "A", "geometry": [ 42, { "type": "Line", "from": [0, 0, 0], "to": [1, 1, 1] }, null ] } ],
				"root": { "definition": "A" }
			}"#,
		)
		.unwrap();

		assert_eq!(scene.definition("A").unwrap().geometries().len(), 1);
	}

	#[test]
	fn local_transform_assembly_order() {
		let scene = scene_with_root(
			r#"{
				"definition": "Rod",
				"pivot": [0, 0, 10],
				"transform": [1, 0, 0, 5,  0, 1, 0, 0,  0, 0, 1, 0,  0, 0, 0, 1],
				"joint": { "type": "Revolute", "rotation": [1.5707963267948966] },
				"translate": [0, 0, 3],
				"rotate": { "radians": 1.5707963267948966, "axis": [0, 2, 0] }
			}"#,
		)
		.unwrap();

		let expected = translation(dvec3(5.0, 0.0, 0.0))
			* Joint::Revolute { angle: FRAC_PI_2 }.transform()
			* translation(dvec3(0.0, 0.0, 3.0))
			* rotation_about_point(FRAC_PI_2, DVec3::Y, dvec3(0.0, 0.0, 10.0));
		assert!(scene.root.local_xform().abs_diff_eq(expected, 1e-12));
	}

	#[test]
	fn nested_children() {
		let mut scene = scene_with_root(
			r#"{
				"definition": "Empty",
				"children": [
					{ "definition": "Rod", "translate": [0, 0, 10], "children": [ { "definition": "Rod", "translate": [0, 0, 10] } ] },
					{ "definition": "Empty" }
				]
			}"#,
		)
		.unwrap();

		assert_eq!(scene.root.children().len(), 2);
		assert_eq!(scene.root.children()[0].children().len(), 1);

		scene.update();
		let bbox = scene.tight_bounding_box().unwrap();
		assert!(bbox.abs_diff_eq(&BoundingBox::new(dvec3(0.0, 0.0, 10.0), dvec3(0.0, 0.0, 30.0)), 1e-12));
	}

	#[test]
	fn unknown_names_are_errors() {
		let err = scene_with_root(r#"{ "definition": "Nope" }"#).unwrap_err();
		assert!(matches!(err, SceneParseError::UnknownDefinition(name) if name == "Nope"));

		let err = scene_with_root(r#"{ "definition": "Rod", "joint": { "type": "Hinge" } }"#).unwrap_err();
		assert!(matches!(err, SceneParseError::Joint(JointError::UnknownKind(_))));

		let err = Scene::from_json_str(
			r#"{ "definitions": [ { "name": "A", "geometry": [ { "type": "Torus" } ] } ], "root": { "definition": "A" } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, SceneParseError::UnknownGeometryType(ty) if ty == "Torus"));
	}

	#[test]
	fn joint_arity_is_checked() {
		let err = scene_with_root(r#"{ "definition": "Rod", "joint": { "type": "Universal", "rotation": [0.1] } }"#)
			.unwrap_err();
		assert!(matches!(
			err,
			SceneParseError::Joint(JointError::ParamCount {
				expected: 2,
				actual: 1,
				..
			})
		));
	}

	#[test]
	fn structural_errors() {
		assert!(matches!(
			Scene::from_json_str("{ not json"),
			Err(SceneParseError::JsonParse(_))
		));

		let err = scene_with_root(r#"{ "definition": "Rod", "transform": [1, 0, 0] }"#).unwrap_err();
		assert!(matches!(err, SceneParseError::JsonError(JsonError::ErrorInObject { ref key, .. }) if key == "root"));

		let err = scene_with_root(r#"{ "definition": "Rod", "children": [ 7 ] }"#).unwrap_err();
		assert!(err.to_string().contains("children[0]"));

		let err = scene_with_root(r#"{ "definition": "Rod", "rotate": { "radians": 1, "axis": [0, 0, 0] } }"#)
			.unwrap_err();
		assert!(matches!(err, SceneParseError::ZeroRotationAxis));

		let err = Scene::from_json_str(
			r#"{ "definitions": [ { "name": "A" }, { "name": "A" } ], "root": { "definition": "A" } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, SceneParseError::DuplicateDefinition(name) if name == "A"));
	}
}
