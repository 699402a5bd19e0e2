pub mod generate;
pub mod registry;
pub mod slug;

pub use generate::{Snapshot, SnapshotGenerator};
pub use registry::{RegistryFile, RegistryItem};
pub use slug::{component_name_for, slug_for, slugify};
