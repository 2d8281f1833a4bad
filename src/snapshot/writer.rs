use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use super::error::SnapshotError;
use super::versioning::{snapshot_digest, SnapshotConfig, SnapshotManifest, StoreSnapshot};

pub const DOCUMENTS_FILE: &str = "documents.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// SnapshotWriter is single-threaded and non-reentrant by design.
pub struct SnapshotWriter {
    config: SnapshotConfig,
}

impl SnapshotWriter {
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Write `snapshot` into a fresh directory at `output_dir`.
    ///
    /// Files land in a sibling temp directory first and are moved into place
    /// with a single rename, so a crash never leaves a half-written snapshot.
    pub fn write(
        &self,
        snapshot: &StoreSnapshot,
        output_dir: &Path,
    ) -> Result<SnapshotManifest, SnapshotError> {
        if output_dir.exists() {
            return Err(SnapshotError::OutputExists(output_dir.to_path_buf()));
        }

        snapshot.validate()?;

        let mut ordered = snapshot.clone();
        ordered.documents.sort_by_key(|doc| doc.id);

        let snapshot_version = snapshot_digest(&self.config, &ordered)?;

        let manifest = SnapshotManifest {
            snapshot_version: snapshot_version.clone(),
            build_config: self.config.clone(),
            created_at: Utc::now(),
            next_id: ordered.next_id,
            document_count: ordered.documents.len(),
            completed_count: ordered.completed_count(),
        };

        // Temp dir keyed by digest so concurrent writers of different
        // snapshots into the same parent don't collide.
        let fragment = snapshot_version
            .strip_prefix("sha256:")
            .and_then(|digest| digest.get(..12))
            .unwrap_or("pending");
        let temp_dir = output_dir.with_extension(format!("tmp.{fragment}"));

        // Leftover from a crashed run of this exact snapshot.
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }
        fs::create_dir_all(&temp_dir)?;

        let f_docs = fs::File::create(temp_dir.join(DOCUMENTS_FILE))?;
        serde_json::to_writer(&f_docs, &ordered.documents)?;
        f_docs.sync_all()?;

        let f_man = fs::File::create(temp_dir.join(MANIFEST_FILE))?;
        serde_json::to_writer_pretty(&f_man, &manifest)?;
        f_man.sync_all()?;

        fs::rename(&temp_dir, output_dir)?;

        info!(
            path = %output_dir.display(),
            documents = manifest.document_count,
            next_id = manifest.next_id,
            version = %manifest.snapshot_version,
            "snapshot written"
        );

        Ok(manifest)
    }
}
