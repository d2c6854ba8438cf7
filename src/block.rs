//! Block definitions and the tree of references that places them.

mod definition;
mod reference;

pub use definition::BlockDefinition;
pub use reference::BlockReference;
