use std::fmt;

use serde::{Deserialize, Serialize};

use cdl_types::{ActorId, ActorRole, ContentHash, DocumentId, EventKind, Timestamp, TransactionId};

/// Notification emitted after each successful ledger mutation.
///
/// Carries only what a compliance sink needs to correlate and export:
/// the hash is truncated to a prefix, never the full digest, so audit
/// logs cannot be replayed as verification oracles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub kind: EventKind,
    pub transaction_id: TransactionId,
    pub document_id: DocumentId,
    pub actor: ActorId,
    pub role: ActorRole,
    /// First 8 hex characters of the event's document hash.
    pub hash_prefix: String,
    pub timestamp: Timestamp,
}

impl AuditEvent {
    /// Build a notification from the parts of a recorded ledger event.
    pub fn new(
        kind: EventKind,
        transaction_id: TransactionId,
        document_id: DocumentId,
        actor: ActorId,
        role: ActorRole,
        doc_hash: &ContentHash,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind,
            transaction_id,
            document_id,
            actor,
            role,
            hash_prefix: doc_hash.short_hex(),
            timestamp,
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} by {} ({}) [{}]",
            self.transaction_id, self.kind, self.document_id, self.actor, self.role, self.hash_prefix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audit_event() -> AuditEvent {
        AuditEvent::new(
            EventKind::Upload,
            TransactionId::new(2024, 1),
            DocumentId::mint(Timestamp::from_millis(1_700_000_000_000)),
            ActorId::parse("attorney@closings.example.com").unwrap(),
            ActorRole::Attorney,
            &ContentHash::from_hash([0xab; 32]),
            Timestamp::from_millis(1_700_000_000_001),
        )
    }

    #[test]
    fn hash_prefix_is_truncated() {
        let event = audit_event();
        assert_eq!(event.hash_prefix, "abababab");
        assert_eq!(event.hash_prefix.len(), 8);
    }

    #[test]
    fn display_includes_actor_and_kind() {
        let rendered = audit_event().to_string();
        assert!(rendered.contains("UPLOAD"));
        assert!(rendered.contains("attorney@closings.example.com"));
        assert!(rendered.contains("ATTORNEY"));
    }

    #[test]
    fn serde_roundtrip() {
        let event = audit_event();
        let json = serde_json::to_string(&event).unwrap();
        let parsed: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
