//! Multi-party document signing ledger.
//!
//! `signing-ledger` keeps documents identified by a content hash together
//! with a fixed list of required signers. Each listed signer records a
//! signature (an attestation of identity and time, not a cryptographic
//! proof) and a document completes once the number of signatures matches
//! the number of required signers.
//!
//! The [`store::DocumentStore`] is the single consistency boundary. Creation
//! and signing are reported to an injected [`events::EventSink`], and the
//! whole ledger can be exported to and restored from an on-disk
//! [`snapshot`].

pub mod clock;
pub mod document;
pub mod events;
pub mod snapshot;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{Document, Signature};
pub use events::{EventSink, LedgerEvent, NoopSink, RecordingSink, TracingSink};
pub use store::{DocumentStore, StoreError, StoreErrorKind};
pub use types::{ContentHash, DocumentId, Identity, Timestamp};
