use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::document::{Document, Signature};
use crate::events::{EventSink, NoopSink};
use crate::snapshot::{SnapshotError, StoreSnapshot};
use crate::types::identifiers::{ContentHash, DocumentId, Identity};
use super::error::StoreError;

#[derive(Debug, Default)]
struct StoreState {
    documents: BTreeMap<DocumentId, Document>,
    next_id: u64,
}

/// Authoritative document ledger.
///
/// Every operation runs under one `RwLock`: mutations hold the write lock
/// for their whole check-then-act sequence, reads hold the read lock and
/// return owned copies.
#[derive(Debug)]
pub struct DocumentStore<E, C = SystemClock> {
    state: RwLock<StoreState>,
    sink: E,
    clock: C,
}

impl Default for DocumentStore<NoopSink> {
    fn default() -> Self {
        Self::new(NoopSink)
    }
}

impl<E: EventSink> DocumentStore<E> {
    pub fn new(sink: E) -> Self {
        Self::with_clock(sink, SystemClock::new())
    }
}

impl<E, C> DocumentStore<E, C>
where
    E: EventSink,
    C: Clock,
{
    pub fn with_clock(sink: E, clock: C) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            sink,
            clock,
        }
    }

    /// Rebuild a store from a previously exported snapshot.
    ///
    /// No events are emitted; the id counter resumes where it left off.
    pub fn restore(snapshot: StoreSnapshot, sink: E, clock: C) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let StoreSnapshot { next_id, documents } = snapshot;
        let documents: BTreeMap<DocumentId, Document> =
            documents.into_iter().map(|doc| (doc.id, doc)).collect();

        info!(
            documents = documents.len(),
            next_id, "restored document store from snapshot"
        );

        Ok(Self {
            state: RwLock::new(StoreState { documents, next_id }),
            sink,
            clock,
        })
    }

    /// Register a new document. Never fails.
    ///
    /// A document with no signers is accepted but can never complete: nobody
    /// is authorized to sign it.
    ///
    /// # Panics
    ///
    /// If the id counter is exhausted.
    pub fn create(
        &self,
        creator: Identity,
        content_hash: ContentHash,
        signers: Vec<Identity>,
    ) -> DocumentId {
        let mut state = self.state.write();

        // Checked before anything is inserted. Restored counters always equal
        // the document count, so only 2^64 creates can reach this.
        assert!(state.next_id < u64::MAX, "document id space exhausted");

        let id = DocumentId::new(state.next_id);
        let required = signers.len();
        let document = Document::new(id, creator.clone(), content_hash, signers);
        state.documents.insert(id, document);
        state.next_id += 1;

        debug!(document_id = id.value(), creator = creator.as_str(), required, "document created");
        self.sink.record_creation(id, &creator);

        id
    }

    /// Record a signature from `signer`.
    ///
    /// Checks, in order: the document exists, it is not completed, and
    /// `signer` is listed. A signer who already signed may sign again while
    /// the document is open; completion compares counts only.
    pub fn sign(&self, signer: &Identity, document_id: DocumentId) -> Result<(), StoreError> {
        let mut state = self.state.write();

        let document = match state.documents.get_mut(&document_id) {
            Some(doc) => doc,
            None => return Err(self.reject(StoreError::NotFound(document_id))),
        };

        if document.is_completed {
            return Err(self.reject(StoreError::AlreadyCompleted(document_id)));
        }

        if !document.is_required_signer(signer) {
            return Err(self.reject(StoreError::Unauthorized {
                document_id,
                signer: signer.clone(),
            }));
        }

        let timestamp = self.clock.now();
        document.signatures.push(Signature {
            signer: signer.clone(),
            timestamp,
        });

        debug!(
            document_id = document_id.value(),
            signer = signer.as_str(),
            collected = document.signatures.len(),
            required = document.signers.len(),
            "signature recorded"
        );
        self.sink.record_signing(document_id, signer);

        if document.signatures.len() == document.signers.len() {
            document.is_completed = true;
            info!(
                document_id = document_id.value(),
                signatures = document.signatures.len(),
                "document completed"
            );
        }

        Ok(())
    }

    fn reject(&self, err: StoreError) -> StoreError {
        debug!(kind = ?err.kind(), "sign rejected: {err}");
        err
    }

    pub fn get(&self, document_id: DocumentId) -> Result<Document, StoreError> {
        self.state
            .read()
            .documents
            .get(&document_id)
            .cloned()
            .ok_or(StoreError::NotFound(document_id))
    }

    /// All documents, ascending by id.
    pub fn get_all(&self) -> Vec<Document> {
        self.state.read().documents.values().cloned().collect()
    }

    /// Known documents among `ids`, in request order. Unknown ids are skipped.
    pub fn get_many(&self, ids: &[DocumentId]) -> Vec<Document> {
        let state = self.state.read();
        ids.iter()
            .filter_map(|id| state.documents.get(id).cloned())
            .collect()
    }

    /// Total documents ever created (the id counter), not completed ones.
    pub fn count(&self) -> u64 {
        self.state.read().next_id
    }

    pub fn completed_count(&self) -> usize {
        self.state
            .read()
            .documents
            .values()
            .filter(|doc| doc.is_completed)
            .count()
    }

    pub fn documents_by_creator(&self, creator: &Identity) -> Vec<Document> {
        self.state
            .read()
            .documents
            .values()
            .filter(|doc| &doc.creator == creator)
            .cloned()
            .collect()
    }

    /// Open documents on which `signer` still owes a signature.
    pub fn documents_awaiting(&self, signer: &Identity) -> Vec<Document> {
        self.state
            .read()
            .documents
            .values()
            .filter(|doc| !doc.is_completed && doc.pending_signers().contains(signer))
            .cloned()
            .collect()
    }

    /// Consistent copy of the whole ledger, taken under a single read lock.
    pub fn export(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            next_id: state.next_id,
            documents: state.documents.values().cloned().collect(),
        }
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
