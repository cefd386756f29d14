pub mod descriptor;
pub mod field;
pub mod snapshot;
pub mod version;

pub use descriptor::TypeDescriptor;
pub use field::FieldNode;
pub use snapshot::Snapshot;
pub use version::{Release, ReleaseKind, Version};
