mod field;
mod recordable;

pub use field::TrackedField;
pub use recordable::{FieldDescriptor, Recordable};
