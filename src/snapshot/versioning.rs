use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::document::Document;
use super::error::SnapshotError;

/// Snapshot format parameters. Part of the digest, so changing either
/// field changes every snapshot version.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotConfig {
    pub version: String,
    pub hash_algorithm: String,
}

impl SnapshotConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            hash_algorithm: "sha256".into(),
        }
    }

    pub(crate) fn ensure_supported(&self) -> Result<(), SnapshotError> {
        let supported = Self::v0();
        if self.version != supported.version || self.hash_algorithm != supported.hash_algorithm {
            return Err(SnapshotError::UnsupportedVersion(format!(
                "{}/{}",
                self.version, self.hash_algorithm
            )));
        }
        Ok(())
    }
}

/// Full ledger state at a point in time. Documents are kept in id order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreSnapshot {
    pub next_id: u64,
    pub documents: Vec<Document>,
}

impl StoreSnapshot {
    /// Reject snapshots the store could never have produced.
    ///
    /// Ids must be exactly `0..next_id`, and every document must satisfy the
    /// signing invariants `sign` maintains.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = BTreeSet::new();
        for doc in &self.documents {
            if !seen.insert(doc.id) {
                return Err(SnapshotError::DuplicateDocumentId(doc.id));
            }
            validate_document(doc)?;
        }

        if let Some(max_id) = seen.last() {
            if max_id.value() >= self.next_id {
                return Err(SnapshotError::CounterBehindDocuments {
                    next_id: self.next_id,
                    max_id: *max_id,
                });
            }
        }

        // Unique ids all below next_id, so equal counts means no gaps.
        if seen.len() as u64 != self.next_id {
            return Err(SnapshotError::IdsNotContiguous {
                next_id: self.next_id,
                document_count: seen.len(),
            });
        }

        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.is_completed).count()
    }
}

fn validate_document(doc: &Document) -> Result<(), SnapshotError> {
    let invalid = |reason: &'static str| SnapshotError::InvalidDocument { id: doc.id, reason };

    if doc.signatures.len() > doc.signers.len() {
        return Err(invalid("more signatures than required signers"));
    }

    let complete = !doc.signers.is_empty() && doc.signatures.len() == doc.signers.len();
    if doc.is_completed != complete {
        return Err(invalid("completion flag disagrees with signature count"));
    }

    if doc.signatures.iter().any(|sig| !doc.is_required_signer(&sig.signer)) {
        return Err(invalid("signature from an unlisted identity"));
    }

    Ok(())
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_version: String,
    pub build_config: SnapshotConfig,
    pub created_at: DateTime<Utc>, // informational only
    pub next_id: u64,
    pub document_count: usize,
    pub completed_count: usize,
}

/// `sha256:<hex>` over the config, the counter and every document in id order.
pub(crate) fn snapshot_digest(
    config: &SnapshotConfig,
    snapshot: &StoreSnapshot,
) -> Result<String, SnapshotError> {
    let mut hasher = Sha256::new();

    hasher.update(serde_json::to_vec(config)?);
    hasher.update(format!("next_id:{}\n", snapshot.next_id).as_bytes());

    let mut ordered: Vec<&Document> = snapshot.documents.iter().collect();
    ordered.sort_by_key(|doc| doc.id);

    for doc in ordered {
        hasher.update(serde_json::to_vec(doc)?);
        hasher.update(b"\n");
    }

    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}
