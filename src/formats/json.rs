//! Thin typed accessors over `json::JsonValue` objects.

use glam::DVec3;
use json::JsonValue;

pub(super) trait SerialExtend {
	fn as_object(&self) -> Option<&json::object::Object>;
}

impl SerialExtend for json::JsonValue {
	fn as_object(&self) -> Option<&json::object::Object> {
		if let json::JsonValue::Object(obj) = self {
			Some(obj)
		} else {
			None
		}
	}
}

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonError {
	#[error("Key {0:?} does not exist")]
	KeyDoesNotExist(String),
	#[error("Value at {0:?} is not an object")]
	ValueIsNotObject(String),
	#[error("Value at {0:?} is not a list")]
	ValueIsNotList(String),
	#[error("Value at {0:?} is not a string")]
	ValueIsNotString(String),
	#[error("Value at {0:?} is not a number")]
	ValueIsNotNumber(String),
	#[error("Error while parsing list of numbers at {key:?}\n  - {msg}")]
	ParseNumbersError { key: String, msg: String },
	#[error("Error in list at index {index}\n  - {inner}")]
	ErrorInList { index: usize, inner: Box<JsonError> },
	#[error("Error in object at {key:?}\n  - {inner}")]
	ErrorInObject { key: String, inner: Box<JsonError> },
}

impl JsonError {
	pub fn nested(self, key: &str) -> Self {
		Self::ErrorInObject {
			key: key.to_owned(),
			inner: Box::new(self),
		}
	}

	pub fn in_list(self, index: usize) -> Self {
		Self::ErrorInList {
			index,
			inner: Box::new(self),
		}
	}
}

#[derive(Clone, Copy)]
pub struct JsonObject<'a>(pub &'a json::object::Object);

impl<'a> JsonObject<'a> {
	fn get(&self, key: &str) -> JsonResult<&'a json::JsonValue> {
		match self.0.get(key) {
			Some(value) => Ok(value),
			None => Err(JsonError::KeyDoesNotExist(key.to_owned())),
		}
	}

	pub fn contains(&self, key: &str) -> bool {
		self.0.get(key).is_some_and(|val| !val.is_null())
	}

	pub fn get_object(&self, key: &str) -> JsonResult<JsonObject<'a>> {
		match self.get(key)?.as_object() {
			Some(obj) => Ok(JsonObject(obj)),
			None => Err(JsonError::ValueIsNotObject(key.to_owned())),
		}
	}

	pub fn get_list(&self, key: &str) -> JsonResult<&'a [JsonValue]> {
		match self.get(key)? {
			json::JsonValue::Array(arr) => Ok(arr),
			_ => Err(JsonError::ValueIsNotList(key.to_owned())),
		}
	}

	pub fn get_str(&self, key: &str) -> JsonResult<&'a str> {
		match self.get(key)?.as_str() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotString(key.to_owned())),
		}
	}

	pub fn get_f64(&self, key: &str) -> JsonResult<f64> {
		match self.get(key)?.as_f64() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotNumber(key.to_owned())),
		}
	}

	/// A list of numbers of any length.
	pub fn get_f64s(&self, key: &str) -> JsonResult<Vec<f64>> {
		self.get_list(key)?
			.iter()
			.enumerate()
			.map(|(i, val)| {
				val.as_f64().ok_or_else(|| JsonError::ParseNumbersError {
					key: key.to_owned(),
					msg: format!("expected float at index {i}, but did not get a number"),
				})
			})
			.collect()
	}

	/// A list of exactly `N` numbers.
	pub fn get_f64_array<const N: usize>(&self, key: &str) -> JsonResult<[f64; N]> {
		let floats = self.get_f64s(key)?;
		floats.try_into().map_err(|floats: Vec<f64>| JsonError::ParseNumbersError {
			key: key.to_owned(),
			msg: format!("expected list of length {N}, but has length {}", floats.len()),
		})
	}

	pub fn get_dvec3(&self, key: &str) -> JsonResult<DVec3> {
		Ok(DVec3::from_array(self.get_f64_array::<3>(key)?))
	}
}

/// Points given as a list of `[x, y, z]` triples.
pub(super) fn as_dvec3s(key: &str, vals: &[JsonValue]) -> JsonResult<Vec<DVec3>> {
	vals.iter()
		.enumerate()
		.map(|(i, val)| match val {
			json::JsonValue::Array(coords) if coords.len() == 3 => {
				let mut point = [0.0; 3];
				for (slot, coord) in point.iter_mut().zip(coords) {
					*slot = coord.as_f64().ok_or_else(|| JsonError::ValueIsNotNumber(key.to_owned()).in_list(i))?;
				}
				Ok(DVec3::from_array(point))
			}
			_ => Err(JsonError::ParseNumbersError {
				key: key.to_owned(),
				msg: "expected a point of 3 numbers".to_owned(),
			}
			.in_list(i)),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use glam::dvec3;

	use super::*;

	fn parsed(src: &str) -> JsonValue {
		json::parse(src).unwrap()
	}

	#[test]
	fn typed_getters() {
		let value = parsed(r#"{"name": "E0", "len": 2.5, "base": [1, 2, 3], "sub": {}, "nothing": null}"#);
		let obj = JsonObject(value.as_object().unwrap());

		assert_eq!(obj.get_str("name"), Ok("E0"));
		assert_eq!(obj.get_f64("len"), Ok(2.5));
		assert_eq!(obj.get_dvec3("base"), Ok(dvec3(1.0, 2.0, 3.0)));
		assert!(obj.get_object("sub").is_ok());
		assert!(obj.contains("sub"));
		assert!(!obj.contains("nothing"));
		assert!(!obj.contains("missing"));
	}

	#[test]
	fn getter_errors() {
		let value = parsed(r#"{"name": 3, "base": [1, 2], "pts": [1, "x"]}"#);
		let obj = JsonObject(value.as_object().unwrap());

		assert_eq!(obj.get_str("name"), Err(JsonError::ValueIsNotString("name".to_owned())));
		assert_eq!(obj.get_f64("missing"), Err(JsonError::KeyDoesNotExist("missing".to_owned())));
		assert!(matches!(obj.get_dvec3("base"), Err(JsonError::ParseNumbersError { .. })));
		assert!(matches!(obj.get_f64s("pts"), Err(JsonError::ParseNumbersError { .. })));
		assert_eq!(obj.get_list("name"), Err(JsonError::ValueIsNotList("name".to_owned())));
	}

	#[test]
	fn point_lists() {
		let value = parsed(r#"[[0, 0, 0], [1.5, -2, 3]]"#);
		let JsonValue::Array(vals) = &value else { unreachable!() };
		assert_eq!(as_dvec3s("points", vals), Ok(vec![DVec3::ZERO, dvec3(1.5, -2.0, 3.0)]));

		let value = parsed(r#"[[0, 0, 0], [1, 2]]"#);
		let JsonValue::Array(vals) = &value else { unreachable!() };
		assert!(matches!(
			as_dvec3s("points", vals),
			Err(JsonError::ErrorInList { index: 1, .. })
		));
	}

	#[test]
	fn nested_errors_read_outside_in() {
		let err = JsonError::KeyDoesNotExist("radius".to_owned()).in_list(2).nested("geometry");
		let msg = err.to_string();
		assert!(msg.starts_with("Error in object at \"geometry\""));
		assert!(msg.contains("index 2"));
		assert!(msg.ends_with("Key \"radius\" does not exist"));
	}
}
