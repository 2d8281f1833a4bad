pub mod identifiers;

pub use identifiers::{ContentHash, DocumentId, Identity, Timestamp};
