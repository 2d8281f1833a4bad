use serde::{Deserialize, Serialize};

use crate::types::identifiers::{ContentHash, DocumentId, Identity, Timestamp};
use super::signature::Signature;

/// A document awaiting (or holding) signatures from a fixed signer list.
///
/// Values handed out by the store are owned copies; mutating them has no
/// effect on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub content_hash: ContentHash,
    pub creator: Identity,
    pub signers: Vec<Identity>,
    pub signatures: Vec<Signature>,
    pub is_completed: bool,
}

impl Document {
    /// Only the store creates documents; it owns id assignment.
    pub(crate) fn new(
        id: DocumentId,
        creator: Identity,
        content_hash: ContentHash,
        signers: Vec<Identity>,
    ) -> Self {
        Document {
            id,
            content_hash,
            creator,
            signers,
            signatures: Vec::new(),
            is_completed: false,
        }
    }

    pub fn required_signatures(&self) -> usize {
        self.signers.len()
    }

    pub fn is_required_signer(&self, identity: &Identity) -> bool {
        self.signers.iter().any(|s| s == identity)
    }

    pub fn has_signed(&self, identity: &Identity) -> bool {
        self.signatures.iter().any(|sig| &sig.signer == identity)
    }

    /// Required signers not yet matched by a recorded signature.
    ///
    /// Multiset difference: a signer listed twice stays pending until they
    /// have signed twice. Order follows `signers`.
    pub fn pending_signers(&self) -> Vec<Identity> {
        let mut unmatched: Vec<&Identity> = self.signatures.iter().map(|s| &s.signer).collect();
        let mut pending = Vec::new();

        for signer in &self.signers {
            if let Some(pos) = unmatched.iter().position(|s| *s == signer) {
                unmatched.swap_remove(pos);
            } else {
                pending.push(signer.clone());
            }
        }

        pending
    }

    /// Timestamp of the signature that completed the document.
    pub fn completed_at(&self) -> Option<Timestamp> {
        if !self.is_completed {
            return None;
        }
        // No signature is accepted after completion, so the last one closed it.
        self.signatures.last().map(|sig| sig.timestamp)
    }
}
