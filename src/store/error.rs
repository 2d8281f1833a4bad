use thiserror::Error;

use crate::types::identifiers::{DocumentId, Identity};

/// Rejections from [`DocumentStore`](super::DocumentStore). Store state is
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(DocumentId),
    #[error("Document already completed: {0}")]
    AlreadyCompleted(DocumentId),
    #[error("Signer {signer} is not authorized to sign document {document_id}")]
    Unauthorized {
        document_id: DocumentId,
        signer: Identity,
    },
}

/// Field-free discriminant, for mapping to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    NotFound,
    AlreadyCompleted,
    Unauthorized,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::AlreadyCompleted(_) => StoreErrorKind::AlreadyCompleted,
            StoreError::Unauthorized { .. } => StoreErrorKind::Unauthorized,
        }
    }
}
