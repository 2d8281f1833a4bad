pub mod document;
pub mod signature;

pub use crate::types::identifiers::{ContentHash, DocumentId, Identity, Timestamp};
pub use document::Document;
pub use signature::Signature;
