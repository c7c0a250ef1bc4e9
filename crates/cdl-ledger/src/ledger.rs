use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use cdl_audit::{AuditEvent, AuditPublisher};
use cdl_crypto::{BlockIdGenerator, ChainVerifier, ContentHasher};
use cdl_store::LedgerStore;
use cdl_types::{
    ActorId, ActorRole, BlockchainEvent, ContentHash, DocumentAsset, DocumentId, DocumentStatus,
    EventId, EventKind, EventMetadata, NewTransaction, Timestamp, Transaction, TransactionId,
    TransactionStatus,
};

use crate::error::LedgerError;
use crate::machine::transition;

/// Outcome of verifying file bytes against the recorded event history.
///
/// A miss is data, not a fault: it means the bytes match no hash ever
/// recorded, which is the normal answer for tampered or unknown content.
/// It is distinct from [`LedgerError::DocumentNotFound`], which reports a
/// missing id on id-addressed operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub verified: bool,
    /// Owning transaction of the matched event, on success.
    pub transaction: Option<Transaction>,
    /// Owning document of the matched event, on success.
    pub document: Option<DocumentAsset>,
    /// The first event (in ledger order) whose hash matched.
    pub matched_event: Option<BlockchainEvent>,
}

impl VerificationResult {
    fn matched(
        transaction: Transaction,
        document: DocumentAsset,
        event: BlockchainEvent,
    ) -> Self {
        Self {
            verified: true,
            transaction: Some(transaction),
            document: Some(document),
            matched_event: Some(event),
        }
    }

    fn miss() -> Self {
        Self {
            verified: false,
            transaction: None,
            document: None,
            matched_event: None,
        }
    }
}

/// The document ledger: owns the entity model, enforces invariants,
/// applies the status state machine, appends events, and answers
/// verification queries.
///
/// Mutations serialize through a single append lock around the
/// read-current-state → append → write-back cycle, so the status
/// transition is always computed against the state as of the immediately
/// preceding append. Reads bypass the lock and see the store's consistent
/// snapshot. Audit notifications are published after the lock is
/// released; a slow sink never holds up an append.
pub struct DocumentLedger<S: LedgerStore> {
    store: Arc<S>,
    hasher: ContentHasher,
    block_ids: BlockIdGenerator,
    audit: Arc<AuditPublisher>,
    append_lock: Mutex<()>,
}

impl<S: LedgerStore> DocumentLedger<S> {
    pub fn new(store: Arc<S>, audit: Arc<AuditPublisher>) -> Self {
        Self {
            store,
            hasher: ContentHasher::DOCUMENT,
            block_ids: BlockIdGenerator::new(),
            audit,
            append_lock: Mutex::new(()),
        }
    }

    /// The storage port this ledger writes through.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Open a new transaction. Fails if the id is already on the ledger.
    pub fn create_transaction(&self, new: NewTransaction) -> Result<Transaction, LedgerError> {
        let transaction = {
            let _guard = self.append_guard();
            if self.store.contains(&new.id)? {
                return Err(LedgerError::TransactionExists { id: new.id });
            }
            let transaction = Transaction::open(new, Timestamp::now());
            self.store.upsert(transaction.clone())?;
            transaction
        };

        info!(transaction = %transaction.id, "transaction opened");
        Ok(transaction)
    }

    /// Create a document under a transaction from raw file bytes.
    ///
    /// Computes the content hash, mints a block id, and constructs the
    /// asset in DRAFT with a single UPLOAD event. Fails with
    /// `TransactionNotFound` before any mutation if the transaction id is
    /// unknown.
    pub fn create_document(
        &self,
        transaction_id: &TransactionId,
        content: &[u8],
        name: &str,
        doc_type: &str,
        actor: ActorId,
        role: ActorRole,
    ) -> Result<DocumentAsset, LedgerError> {
        let doc_hash = self.hasher.hash(content);

        let (document, event) = {
            let _guard = self.append_guard();
            let mut transaction =
                self.store
                    .get(transaction_id)?
                    .ok_or_else(|| LedgerError::TransactionNotFound {
                        id: transaction_id.clone(),
                    })?;

            let (document_id, created_at) = self.mint_document_id()?;
            let event = self.build_event(
                1,
                created_at,
                EventKind::Upload,
                actor,
                role,
                doc_hash,
                EventMetadata::new(),
                None,
            );

            let document = DocumentAsset {
                id: document_id,
                name: name.to_string(),
                doc_type: doc_type.to_string(),
                version: 1,
                current_hash: doc_hash,
                status: DocumentStatus::Draft,
                events: vec![event.clone()],
            };

            transaction.documents.push(document.clone());
            self.store.upsert(transaction)?;
            (document, event)
        };

        self.notify(transaction_id, &document.id, &event);
        info!(
            transaction = %transaction_id,
            document = %document.id,
            hash_prefix = %document.current_hash.short_hex(),
            "document created"
        );
        Ok(document)
    }

    /// Append an event to a document, located by flat id lookup across
    /// all transactions.
    ///
    /// The caller asserts the hash recorded with the event; the ledger
    /// records it verbatim and does not recompute it from content. A
    /// SIGNATURE or APPROVAL event therefore proves the actor acted while
    /// citing that hash, not that they saw byte-identical content. A
    /// stricter design would take the actual bytes here and compare.
    ///
    /// Applies the transition table to the status as of the immediately
    /// preceding append; a RECORDED event also marks the owning
    /// transaction RECORDED.
    pub fn add_event(
        &self,
        document_id: &DocumentId,
        kind: EventKind,
        actor: ActorId,
        role: ActorRole,
        asserted_hash: ContentHash,
        metadata: EventMetadata,
    ) -> Result<DocumentAsset, LedgerError> {
        let (transaction_id, document, event) = {
            let _guard = self.append_guard();
            let transaction_id = self
                .store
                .find_document(document_id)?
                .ok_or_else(|| LedgerError::DocumentNotFound {
                    id: document_id.clone(),
                })?;
            let mut transaction = self.store.get(&transaction_id)?.ok_or_else(|| {
                LedgerError::TransactionNotFound {
                    id: transaction_id.clone(),
                }
            })?;
            let document = transaction.document_mut(document_id).ok_or_else(|| {
                LedgerError::DocumentNotFound {
                    id: document_id.clone(),
                }
            })?;

            let (seq, timestamp, prev_hash) = match document.events.last() {
                Some(last) => (
                    last.seq + 1,
                    Timestamp::at_or_after(last.timestamp),
                    Some(last.event_hash),
                ),
                None => (1, Timestamp::now(), None),
            };

            let event = self.build_event(
                seq,
                timestamp,
                kind,
                actor,
                role,
                asserted_hash,
                metadata,
                prev_hash,
            );

            document.events.push(event.clone());
            document.status = transition(document.status, kind);
            if kind.carries_content() {
                document.current_hash = asserted_hash;
            }
            let snapshot = document.clone();

            if kind == EventKind::Recorded {
                transaction.status = TransactionStatus::Recorded;
            }
            self.store.upsert(transaction)?;
            (transaction_id, snapshot, event)
        };

        self.notify(&transaction_id, document_id, &event);
        info!(
            transaction = %transaction_id,
            document = %document_id,
            kind = %kind,
            status = %document.status,
            "event appended"
        );
        Ok(document)
    }

    /// Check file bytes against every recorded event hash, in ledger
    /// order.
    ///
    /// This is a membership check over full history, not just current
    /// hashes: an older, once-legitimately-recorded version still
    /// verifies. Linear in the total number of events.
    pub fn verify(&self, content: &[u8]) -> Result<VerificationResult, LedgerError> {
        let digest = self.hasher.hash(content);

        for transaction in self.store.list()? {
            for document in &transaction.documents {
                if let Some(event) = document.events.iter().find(|e| e.doc_hash == digest) {
                    debug!(
                        transaction = %transaction.id,
                        document = %document.id,
                        event = %event.id,
                        "verification matched recorded hash"
                    );
                    return Ok(VerificationResult::matched(
                        transaction.clone(),
                        document.clone(),
                        event.clone(),
                    ));
                }
            }
        }

        debug!(hash_prefix = %digest.short_hex(), "verification found no recorded hash");
        Ok(VerificationResult::miss())
    }

    /// Full append-order event sequence for a document; never reordered
    /// or filtered.
    pub fn document_history(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<BlockchainEvent>, LedgerError> {
        Ok(self.get_document(document_id)?.events)
    }

    /// Fetch a document by flat id lookup.
    pub fn get_document(&self, document_id: &DocumentId) -> Result<DocumentAsset, LedgerError> {
        let transaction_id = self
            .store
            .find_document(document_id)?
            .ok_or_else(|| LedgerError::DocumentNotFound {
                id: document_id.clone(),
            })?;
        let transaction =
            self.store
                .get(&transaction_id)?
                .ok_or_else(|| LedgerError::TransactionNotFound {
                    id: transaction_id.clone(),
                })?;
        transaction
            .document(document_id)
            .cloned()
            .ok_or_else(|| LedgerError::DocumentNotFound {
                id: document_id.clone(),
            })
    }

    /// All transactions, in ledger order.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.store.list()?)
    }

    /// Fetch a transaction by id.
    pub fn get_transaction(&self, id: &TransactionId) -> Result<Transaction, LedgerError> {
        self.store
            .get(id)?
            .ok_or_else(|| LedgerError::TransactionNotFound { id: id.clone() })
    }

    /// Validate a document's event stream: hash chain, sequence density,
    /// timestamp monotonicity, and status/current-hash consistency.
    pub fn validate_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<crate::validation::ValidationReport, LedgerError> {
        Ok(crate::validation::StreamValidator::validate(
            &self.get_document(document_id)?,
        ))
    }

    /// Project a document's audit trail for compliance display.
    pub fn audit_trail(
        &self,
        document_id: &DocumentId,
    ) -> Result<crate::projection::AuditTrailProjection, LedgerError> {
        let transaction_id = self
            .store
            .find_document(document_id)?
            .ok_or_else(|| LedgerError::DocumentNotFound {
                id: document_id.clone(),
            })?;
        let document = self.get_document(document_id)?;
        Ok(crate::projection::ProjectionBuilder::audit_trail(
            &transaction_id,
            &document,
        ))
    }

    fn append_guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guard carries no data; a poisoned lock leaves nothing
        // inconsistent to observe.
        self.append_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mint a document id from the current clock, bumping the millisecond
    /// component past collisions. Called under the append lock.
    fn mint_document_id(&self) -> Result<(DocumentId, Timestamp), LedgerError> {
        let mut created_at = Timestamp::now();
        let mut id = DocumentId::mint(created_at);
        while self.store.find_document(&id)?.is_some() {
            created_at = Timestamp::from_millis(created_at.as_millis() + 1);
            id = DocumentId::mint(created_at);
        }
        Ok((id, created_at))
    }

    #[allow(clippy::too_many_arguments)]
    fn build_event(
        &self,
        seq: u64,
        timestamp: Timestamp,
        kind: EventKind,
        actor: ActorId,
        role: ActorRole,
        doc_hash: ContentHash,
        metadata: EventMetadata,
        prev_hash: Option<[u8; 32]>,
    ) -> BlockchainEvent {
        let mut event = BlockchainEvent {
            id: EventId::new(),
            seq,
            timestamp,
            kind,
            actor,
            role,
            doc_hash,
            metadata,
            block_id: self.block_ids.next_id(),
            prev_hash,
            event_hash: [0; 32],
        };
        event.event_hash = ChainVerifier::compute_hash(&event.payload_bytes(), prev_hash);
        event
    }

    fn notify(
        &self,
        transaction_id: &TransactionId,
        document_id: &DocumentId,
        event: &BlockchainEvent,
    ) {
        self.audit.publish(&AuditEvent::new(
            event.kind,
            transaction_id.clone(),
            document_id.clone(),
            event.actor.clone(),
            event.role,
            &event.doc_hash,
            event.timestamp,
        ));
    }
}
