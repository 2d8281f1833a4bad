use serde::{Deserialize, Serialize};

use crate::types::identifiers::{Identity, Timestamp};

/// A recorded attestation: who signed and when. Not a cryptographic proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub signer: Identity,
    pub timestamp: Timestamp,
}
