use std::path::PathBuf;

use thiserror::Error;

use crate::types::identifiers::DocumentId;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Snapshot digest mismatch: manifest says {expected}, content hashes to {actual}")]
    DigestMismatch { expected: String, actual: String },
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedVersion(String),
    #[error("Id counter {next_id} is not ahead of document {max_id}")]
    CounterBehindDocuments { next_id: u64, max_id: DocumentId },
    #[error("Id counter {next_id} does not match {document_count} documents")]
    IdsNotContiguous { next_id: u64, document_count: usize },
    #[error("Invalid document {id}: {reason}")]
    InvalidDocument { id: DocumentId, reason: &'static str },
    #[error("Duplicate document ID: {0}")]
    DuplicateDocumentId(DocumentId),
    #[error("Manifest lists {manifest} documents, found {actual}")]
    CountMismatch { manifest: usize, actual: usize },
}
