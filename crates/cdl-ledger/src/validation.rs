use cdl_crypto::{ChainError, ChainVerifier};
use cdl_types::{DocumentAsset, DocumentId};

use crate::machine::replay_status;

/// Result of validating one document's event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub document_id: DocumentId,
    pub event_count: u64,
    pub hash_chain_valid: bool,
    pub sequence_dense: bool,
    pub timestamps_monotonic: bool,
    pub status_consistent: bool,
    pub current_hash_consistent: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub seq: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    HashChainBreak,
    HashMismatch,
    TimestampRegression,
    StatusMismatch,
    CurrentHashMismatch,
    EmptyStream,
}

/// Event stream integrity validator.
///
/// Collects violations instead of failing on the first one, so an audit
/// surface can show everything that is wrong with a tampered document at
/// once.
pub struct StreamValidator;

impl StreamValidator {
    /// Validate a document's event stream for all invariants.
    pub fn validate(document: &DocumentAsset) -> ValidationReport {
        let events = &document.events;
        let mut violations = Vec::new();
        let mut hash_chain_valid = true;
        let mut sequence_dense = true;
        let mut timestamps_monotonic = true;

        if events.is_empty() {
            violations.push(Violation {
                seq: 0,
                kind: ViolationKind::EmptyStream,
                description: "document has no events; creation appends an upload".into(),
            });
        }

        for (index, event) in events.iter().enumerate() {
            let expected_seq = (index + 1) as u64;
            if event.seq != expected_seq {
                sequence_dense = false;
                violations.push(Violation {
                    seq: event.seq,
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected seq {expected_seq}, got {}", event.seq),
                });
            }

            if index > 0 && event.timestamp < events[index - 1].timestamp {
                timestamps_monotonic = false;
                violations.push(Violation {
                    seq: event.seq,
                    kind: ViolationKind::TimestampRegression,
                    description: format!(
                        "timestamp {} precedes predecessor {}",
                        event.timestamp,
                        events[index - 1].timestamp
                    ),
                });
            }
        }

        match ChainVerifier::verify_chain(events) {
            Ok(()) => {}
            Err(error) => {
                hash_chain_valid = false;
                let (seq, kind) = match &error {
                    ChainError::GenesisHasPrevHash => (1, ViolationKind::HashChainBreak),
                    ChainError::BrokenLink { index } | ChainError::MissingPrevHash { index } => {
                        ((index + 1) as u64, ViolationKind::HashChainBreak)
                    }
                    ChainError::HashMismatch { index } => {
                        ((index + 1) as u64, ViolationKind::HashMismatch)
                    }
                };
                violations.push(Violation {
                    seq,
                    kind,
                    description: error.to_string(),
                });
            }
        }

        let replayed = replay_status(events);
        let status_consistent = replayed == document.status;
        if !status_consistent {
            violations.push(Violation {
                seq: events.len() as u64,
                kind: ViolationKind::StatusMismatch,
                description: format!(
                    "stored status {} but replay yields {replayed}",
                    document.status
                ),
            });
        }

        let current_hash_consistent = match document.latest_content_event() {
            Some(event) => event.doc_hash == document.current_hash,
            None => events.is_empty(),
        };
        if !current_hash_consistent {
            violations.push(Violation {
                seq: events.len() as u64,
                kind: ViolationKind::CurrentHashMismatch,
                description: "current hash does not match the latest content-bearing event".into(),
            });
        }

        ValidationReport {
            document_id: document.id.clone(),
            event_count: events.len() as u64,
            hash_chain_valid,
            sequence_dense,
            timestamps_monotonic,
            status_consistent,
            current_hash_consistent,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cdl_audit::AuditPublisher;
    use cdl_store::InMemoryLedgerStore;
    use cdl_types::{
        ActorId, ActorRole, DocumentStatus, EventKind, EventMetadata, LoanAmount, NewTransaction,
        Timestamp, TransactionId,
    };

    use crate::ledger::DocumentLedger;

    use super::*;

    fn signed_document() -> DocumentAsset {
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
        ledger
            .add_event(
                &doc.id,
                EventKind::Signature,
                ActorId::parse("ada.cooper@mail.example.com").unwrap(),
                ActorRole::Borrower,
                doc.current_hash,
                EventMetadata::new(),
            )
            .unwrap()
    }

    #[test]
    fn untampered_document_is_valid() {
        let report = StreamValidator::validate(&signed_document());
        assert!(report.is_valid(), "violations: {:?}", report.violations);
        assert_eq!(report.event_count, 2);
        assert!(report.hash_chain_valid);
        assert!(report.status_consistent);
        assert!(report.current_hash_consistent);
    }

    #[test]
    fn in_place_event_edit_is_detected() {
        let mut doc = signed_document();
        doc.events[1]
            .metadata
            .insert("note".into(), "inserted after the fact".into());

        let report = StreamValidator::validate(&doc);
        assert!(!report.is_valid());
        assert!(!report.hash_chain_valid);
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::HashMismatch));
    }

    #[test]
    fn reordered_events_break_the_chain() {
        let mut doc = signed_document();
        doc.events.swap(0, 1);

        let report = StreamValidator::validate(&doc);
        assert!(!report.hash_chain_valid);
        assert!(!report.sequence_dense);
    }

    #[test]
    fn dropped_event_is_detected() {
        let mut doc = signed_document();
        doc.events.remove(0);

        let report = StreamValidator::validate(&doc);
        assert!(!report.is_valid());
        assert!(!report.sequence_dense);
    }

    #[test]
    fn stored_status_must_match_replay() {
        let mut doc = signed_document();
        doc.status = DocumentStatus::Recorded;

        let report = StreamValidator::validate(&doc);
        assert!(!report.status_consistent);
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::StatusMismatch));
    }

    #[test]
    fn current_hash_must_follow_content_events() {
        let mut doc = signed_document();
        doc.current_hash = cdl_types::ContentHash::from_hash([9; 32]);

        let report = StreamValidator::validate(&doc);
        assert!(!report.current_hash_consistent);
    }

    #[test]
    fn timestamp_regression_is_reported() {
        let mut doc = signed_document();
        doc.events[1].timestamp = Timestamp::from_millis(1);

        let report = StreamValidator::validate(&doc);
        assert!(!report.timestamps_monotonic);
        // Editing the timestamp also breaks that event's hash.
        assert!(!report.hash_chain_valid);
    }
}
