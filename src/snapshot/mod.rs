pub mod error;
pub mod loader;
pub mod versioning;
pub mod writer;

pub use error::SnapshotError;
pub use loader::load_snapshot;
pub use versioning::{SnapshotConfig, SnapshotManifest, StoreSnapshot};
pub use writer::SnapshotWriter;
