use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorRole};
use crate::hash::ContentHash;
use crate::id::{BlockId, EventId};
use crate::temporal::Timestamp;

/// Free-form event metadata: string keys to string values.
///
/// A `BTreeMap` keeps the serialized representation stable, which matters
/// because the canonical event payload feeds the integrity hash.
pub type EventMetadata = BTreeMap<String, String>;

/// Classification of ledger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Initial upload; creates the document in DRAFT.
    Upload,
    /// A party viewed the document. No status effect.
    View,
    /// An approving party signed off.
    Approval,
    /// A signing ceremony completed.
    Signature,
    /// A notary acknowledged the signature.
    Notarization,
    /// The county recorded the document. Terminal.
    Recorded,
    /// An amended version was attached. No status effect.
    Revision,
}

impl EventKind {
    /// Returns `true` for events that establish the document's current
    /// content (the `current_hash` invariant follows these).
    pub fn carries_content(&self) -> bool {
        matches!(self, Self::Upload | Self::Revision)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Upload => "UPLOAD",
            Self::View => "VIEW",
            Self::Approval => "APPROVAL",
            Self::Signature => "SIGNATURE",
            Self::Notarization => "NOTARIZATION",
            Self::Recorded => "RECORDED",
            Self::Revision => "REVISION",
        };
        write!(f, "{s}")
    }
}

/// One immutable ledger entry, owned by exactly one document.
///
/// Once appended an event is never mutated or removed; it is the unit of
/// tamper-evidence. `doc_hash` records what the document's content was
/// believed to be at the time of the event. `prev_hash` links each event
/// to its predecessor and `event_hash` is the digest of the event's
/// canonical payload plus that link, so in-place edits and reorderings
/// are detectable by recomputing the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainEvent {
    /// Unique event identifier (UUID v7, time-ordered).
    pub id: EventId,
    /// Position in the owning document's sequence (1-based, dense).
    pub seq: u64,
    /// When the event was appended. Non-decreasing within a document.
    pub timestamp: Timestamp,
    /// What happened.
    pub kind: EventKind,
    /// Who did it (email-shaped).
    pub actor: ActorId,
    /// In what capacity.
    pub role: ActorRole,
    /// Document content hash asserted at the time of the event.
    pub doc_hash: ContentHash,
    /// Optional free-form annotations.
    pub metadata: EventMetadata,
    /// Opaque block identifier minted at append time.
    pub block_id: BlockId,
    /// Hash of the previous event in this document (None for the first).
    pub prev_hash: Option<[u8; 32]>,
    /// Digest of this event's canonical payload chained with `prev_hash`.
    pub event_hash: [u8; 32],
}

impl BlockchainEvent {
    /// Canonical payload bytes for integrity hashing.
    ///
    /// Covers every field except the chain fields themselves
    /// (`prev_hash` enters the hash as the chain link, `event_hash` is
    /// the output). Serialization of these plain fields cannot fail;
    /// an empty payload would surface immediately as a chain mismatch.
    pub fn payload_bytes(&self) -> Vec<u8> {
        #[derive(Serialize)]
        struct Payload<'a> {
            id: &'a EventId,
            seq: u64,
            timestamp: Timestamp,
            kind: EventKind,
            actor: &'a ActorId,
            role: ActorRole,
            doc_hash: &'a ContentHash,
            metadata: &'a EventMetadata,
            block_id: &'a BlockId,
        }
        serde_json::to_vec(&Payload {
            id: &self.id,
            seq: self.seq,
            timestamp: self.timestamp,
            kind: self.kind,
            actor: &self.actor,
            role: self.role,
            doc_hash: &self.doc_hash,
            metadata: &self.metadata,
            block_id: &self.block_id,
        })
        .unwrap_or_default()
    }

    /// Short hex of the event hash, for logs and display.
    pub fn short_event_hash(&self) -> String {
        hex::encode(&self.event_hash[..4])
    }
}
