pub mod bbox;
pub mod transform;
