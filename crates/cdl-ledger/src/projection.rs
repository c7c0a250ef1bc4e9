use cdl_types::{
    ActorId, ActorRole, DocumentAsset, DocumentId, EventId, EventKind, Timestamp, TransactionId,
};

/// Row in the audit trail for compliance display and export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditTrailEntry {
    pub seq: u64,
    pub event_id: EventId,
    pub kind: EventKind,
    pub actor: ActorId,
    pub role: ActorRole,
    pub timestamp: Timestamp,
    pub hash_prefix: String,
    pub summary: String,
}

/// Immutable sequence of event summaries for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditTrailProjection {
    pub transaction_id: TransactionId,
    pub document_id: DocumentId,
    pub entries: Vec<AuditTrailEntry>,
}

/// Deterministic projection builders over the event log.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// Project a document's full event sequence into display rows,
    /// preserving append order.
    pub fn audit_trail(
        transaction_id: &TransactionId,
        document: &DocumentAsset,
    ) -> AuditTrailProjection {
        let entries = document
            .events
            .iter()
            .map(|event| AuditTrailEntry {
                seq: event.seq,
                event_id: event.id,
                kind: event.kind,
                actor: event.actor.clone(),
                role: event.role,
                timestamp: event.timestamp,
                hash_prefix: event.doc_hash.short_hex(),
                summary: summarize(&document.name, event.kind, &event.actor, event.role),
            })
            .collect();

        AuditTrailProjection {
            transaction_id: transaction_id.clone(),
            document_id: document.id.clone(),
            entries,
        }
    }
}

fn summarize(name: &str, kind: EventKind, actor: &ActorId, role: ActorRole) -> String {
    let action = match kind {
        EventKind::Upload => "uploaded",
        EventKind::View => "viewed",
        EventKind::Approval => "approved",
        EventKind::Signature => "signed",
        EventKind::Notarization => "notarized",
        EventKind::Recorded => "recorded",
        EventKind::Revision => "revised",
    };
    format!("{name} {action} by {actor} ({role})")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cdl_audit::AuditPublisher;
    use cdl_store::InMemoryLedgerStore;
    use cdl_types::{EventMetadata, LoanAmount, NewTransaction};

    use crate::ledger::DocumentLedger;

    use super::*;

    #[test]
    fn audit_trail_covers_every_event_in_order() {
        let ledger = DocumentLedger::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(AuditPublisher::default()),
        );
        let tx = ledger
            .create_transaction(NewTransaction {
                id: TransactionId::new(2024, 1),
                property_address: "114 Maple Ave, Springfield".into(),
                loan_amount: LoanAmount::parse("325000.00").unwrap(),
                lender: "First Example Bank".into(),
                borrower: "Ada Cooper".into(),
            })
            .unwrap();
        let doc = ledger
            .create_document(
                &tx.id,
                b"NOTE-V1",
                "Promissory Note",
                "promissory_note",
                ActorId::parse("attorney@closings.example.com").unwrap(),
                ActorRole::Attorney,
            )
            .unwrap();
        let doc = ledger
            .add_event(
                &doc.id,
                EventKind::Approval,
                ActorId::parse("underwriting@bank.example.com").unwrap(),
                ActorRole::Lender,
                doc.current_hash,
                EventMetadata::new(),
            )
            .unwrap();

        let trail = ProjectionBuilder::audit_trail(&tx.id, &doc);
        assert_eq!(trail.transaction_id, tx.id);
        assert_eq!(trail.document_id, doc.id);
        assert_eq!(trail.entries.len(), 2);

        assert_eq!(trail.entries[0].seq, 1);
        assert_eq!(trail.entries[0].kind, EventKind::Upload);
        assert_eq!(
            trail.entries[0].summary,
            "Promissory Note uploaded by attorney@closings.example.com (ATTORNEY)"
        );

        assert_eq!(trail.entries[1].seq, 2);
        assert_eq!(trail.entries[1].kind, EventKind::Approval);
        assert_eq!(trail.entries[1].hash_prefix.len(), 8);
    }

    #[test]
    fn projection_is_deterministic() {
        let ledger = DocumentLedger::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(AuditPublisher::default()),
        );
        let tx = ledger
            .create_transaction(NewTransaction {
                id: TransactionId::new(2024, 2),
                property_address: "9 Birch Ct, Riverton".into(),
                loan_amount: LoanAmount::parse("410000.00").unwrap(),
                lender: "First Example Bank".into(),
                borrower: "Noah Reyes".into(),
            })
            .unwrap();
        let doc = ledger
            .create_document(
                &tx.id,
                b"DEED-V1",
                "Deed of Trust",
                "deed_of_trust",
                ActorId::parse("attorney@closings.example.com").unwrap(),
                ActorRole::Attorney,
            )
            .unwrap();

        let first = ProjectionBuilder::audit_trail(&tx.id, &doc);
        let second = ProjectionBuilder::audit_trail(&tx.id, &doc);
        assert_eq!(first, second);
    }
}
