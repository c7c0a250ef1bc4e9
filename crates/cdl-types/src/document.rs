use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::BlockchainEvent;
use crate::hash::ContentHash;
use crate::id::DocumentId;
use crate::temporal::Timestamp;

/// Lifecycle status of a document asset.
///
/// Monotone and forward-only: DRAFT → APPROVED → SIGNED → RECORDED, with
/// RECORDED terminal. The transition rules live in the ledger's state
/// machine; this type only names the states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Draft,
    Approved,
    Signed,
    Recorded,
}

impl DocumentStatus {
    /// Returns `true` for the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
            Self::Signed => "SIGNED",
            Self::Recorded => "RECORDED",
        };
        write!(f, "{s}")
    }
}

/// One versioned file tracked on the ledger, exclusively owned by its
/// parent transaction.
///
/// Mutated only by appending events; never deleted. `current_hash` always
/// equals the doc hash of the most recently appended content-bearing
/// (UPLOAD/REVISION) event, and `status` is always derivable by replaying
/// `events` through the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAsset {
    pub id: DocumentId,
    /// Display name, e.g. `"Promissory Note"`.
    pub name: String,
    /// Free-text type label, e.g. `"promissory_note"`.
    pub doc_type: String,
    /// Starts at 1; monotonically increasing if re-upload is ever modeled
    /// as a version bump instead of a new document.
    pub version: u32,
    pub current_hash: ContentHash,
    pub status: DocumentStatus,
    /// Append-only; insertion order is chronological order.
    pub events: Vec<BlockchainEvent>,
}

impl DocumentAsset {
    /// The most recently appended event, if any.
    pub fn latest_event(&self) -> Option<&BlockchainEvent> {
        self.events.last()
    }

    /// Number of events appended so far.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// When the document was created (timestamp of its first event,
    /// falling back to the id's embedded millis).
    pub fn created_at(&self) -> Timestamp {
        self.events
            .first()
            .map(|e| e.timestamp)
            .unwrap_or_else(|| Timestamp::from_millis(self.id.created_at_millis()))
    }

    /// The most recent content-bearing (UPLOAD/REVISION) event.
    pub fn latest_content_event(&self) -> Option<&BlockchainEvent> {
        self.events.iter().rev().find(|e| e.kind.carries_content())
    }
}
