mod json;
mod scene;

pub use json::JsonError;
pub use scene::{SceneParseError, SceneParseResult};
