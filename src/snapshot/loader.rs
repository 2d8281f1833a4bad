use std::fs;
use std::path::Path;

use tracing::info;

use crate::document::Document;
use super::error::SnapshotError;
use super::versioning::{snapshot_digest, SnapshotManifest, StoreSnapshot};
use super::writer::{DOCUMENTS_FILE, MANIFEST_FILE};

/// Load and verify a snapshot directory written by
/// [`SnapshotWriter`](super::SnapshotWriter).
///
/// Nothing is returned until the format, the ids and the digest have all
/// been checked against the manifest.
pub fn load_snapshot(dir: &Path) -> Result<(SnapshotManifest, StoreSnapshot), SnapshotError> {
    let f_man = fs::File::open(dir.join(MANIFEST_FILE))?;
    let manifest: SnapshotManifest = serde_json::from_reader(f_man)?;

    manifest.build_config.ensure_supported()?;

    let f_docs = fs::File::open(dir.join(DOCUMENTS_FILE))?;
    let documents: Vec<Document> = serde_json::from_reader(f_docs)?;

    if documents.len() != manifest.document_count {
        return Err(SnapshotError::CountMismatch {
            manifest: manifest.document_count,
            actual: documents.len(),
        });
    }

    let snapshot = StoreSnapshot {
        next_id: manifest.next_id,
        documents,
    };
    snapshot.validate()?;

    let actual = snapshot_digest(&manifest.build_config, &snapshot)?;
    if actual != manifest.snapshot_version {
        return Err(SnapshotError::DigestMismatch {
            expected: manifest.snapshot_version.clone(),
            actual,
        });
    }

    info!(
        path = %dir.display(),
        documents = manifest.document_count,
        next_id = manifest.next_id,
        "snapshot loaded"
    );

    Ok((manifest, snapshot))
}
