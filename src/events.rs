//! Event notification port.
//!
//! The store reports every successful creation and signature to an
//! [`EventSink`]. How events are stored or transported is the sink's concern.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{DocumentId, Identity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    Created {
        document_id: DocumentId,
        creator: Identity,
    },
    Signed {
        document_id: DocumentId,
        signer: Identity,
    },
}

/// Called synchronously on the success path, while the store's write lock
/// is held. Implementations must not call back into the same store.
pub trait EventSink: Send + Sync {
    fn record_creation(&self, document_id: DocumentId, creator: &Identity);

    fn record_signing(&self, document_id: DocumentId, signer: &Identity);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn record_creation(&self, document_id: DocumentId, creator: &Identity) {
        (**self).record_creation(document_id, creator)
    }

    fn record_signing(&self, document_id: DocumentId, signer: &Identity) {
        (**self).record_signing(document_id, signer)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record_creation(&self, _document_id: DocumentId, _creator: &Identity) {}

    fn record_signing(&self, _document_id: DocumentId, _signer: &Identity) {}
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record_creation(&self, document_id: DocumentId, creator: &Identity) {
        tracing::info!(
            target: "signing_ledger::events",
            event = "created",
            document_id = document_id.value(),
            creator = creator.as_str(),
            "document created"
        );
    }

    fn record_signing(&self, document_id: DocumentId, signer: &Identity) {
        tracing::info!(
            target: "signing_ledger::events",
            event = "signed",
            document_id = document_id.value(),
            signer = signer.as_str(),
            "document signed"
        );
    }
}

/// Append-only in-memory log. Mostly useful as a test double.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LedgerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn record_creation(&self, document_id: DocumentId, creator: &Identity) {
        self.events.lock().push(LedgerEvent::Created {
            document_id,
            creator: creator.clone(),
        });
    }

    fn record_signing(&self, document_id: DocumentId, signer: &Identity) {
        self.events.lock().push(LedgerEvent::Signed {
            document_id,
            signer: signer.clone(),
        });
    }
}
