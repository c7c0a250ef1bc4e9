use std::path::Path;
use std::sync::Arc;

use tracing::info;

use cdl_audit::{AuditFilter, AuditPublisher, AuditStream};
use cdl_ledger::{DocumentLedger, ValidationReport, VerificationResult};
use cdl_store::InMemoryLedgerStore;
use cdl_types::{
    ActorId, ActorRole, BlockchainEvent, ContentHash, DocumentAsset, DocumentId, EventKind,
    EventMetadata, NewTransaction, Transaction, TransactionId,
};

use crate::error::SdkResult;
use crate::esign::SigningCompletion;
use crate::ingest;

/// Configuration for an embedded ledger instance.
#[derive(Clone, Debug)]
pub struct CdlConfig {
    /// Capacity of per-subscriber audit broadcast channels.
    pub audit_channel_capacity: usize,
}

impl Default for CdlConfig {
    fn default() -> Self {
        Self {
            audit_channel_capacity: 256,
        }
    }
}

/// Unified entry point for applications embedding CDL.
///
/// Wires an in-memory store, an audit publisher, and the document ledger
/// together, and adds the path-based conveniences the core deliberately
/// does not have.
pub struct Cdl {
    ledger: DocumentLedger<InMemoryLedgerStore>,
    audit: Arc<AuditPublisher>,
}

impl Cdl {
    /// Open an in-memory ledger with default configuration.
    pub fn open() -> Self {
        Self::with_config(CdlConfig::default())
    }

    pub fn with_config(config: CdlConfig) -> Self {
        let audit = Arc::new(AuditPublisher::new(config.audit_channel_capacity));
        let ledger = DocumentLedger::new(Arc::new(InMemoryLedgerStore::new()), Arc::clone(&audit));
        info!(
            audit_capacity = config.audit_channel_capacity,
            "ledger opened"
        );
        Self { ledger, audit }
    }

    /// The underlying document ledger, for operations the facade does not
    /// wrap.
    pub fn ledger(&self) -> &DocumentLedger<InMemoryLedgerStore> {
        &self.ledger
    }

    /// Subscribe to audit notifications matching `filter`.
    pub fn subscribe_audit(&self, filter: AuditFilter) -> AuditStream {
        self.audit.subscribe(filter)
    }

    /// Open a new closing transaction.
    pub fn create_transaction(&self, new: NewTransaction) -> SdkResult<Transaction> {
        Ok(self.ledger.create_transaction(new)?)
    }

    /// Upload a document file into a transaction.
    pub fn upload_document(
        &self,
        transaction_id: &TransactionId,
        path: impl AsRef<Path>,
        name: &str,
        doc_type: &str,
        actor: ActorId,
        role: ActorRole,
    ) -> SdkResult<DocumentAsset> {
        let bytes = ingest::read_all(path)?;
        Ok(self
            .ledger
            .create_document(transaction_id, &bytes, name, doc_type, actor, role)?)
    }

    /// Append an event to a document, citing `asserted_hash`.
    pub fn record_event(
        &self,
        document_id: &DocumentId,
        kind: EventKind,
        actor: ActorId,
        role: ActorRole,
        asserted_hash: ContentHash,
        metadata: EventMetadata,
    ) -> SdkResult<DocumentAsset> {
        Ok(self
            .ledger
            .add_event(document_id, kind, actor, role, asserted_hash, metadata)?)
    }

    /// Apply an e-signature provider's terminal notification as a
    /// SIGNATURE event citing the document's current hash.
    pub fn apply_signing_completion(
        &self,
        document_id: &DocumentId,
        completion: SigningCompletion,
        role: ActorRole,
    ) -> SdkResult<DocumentAsset> {
        let document = self.ledger.get_document(document_id)?;
        Ok(self.ledger.add_event(
            document_id,
            EventKind::Signature,
            completion.signer.clone(),
            role,
            document.current_hash,
            completion.to_metadata(),
        )?)
    }

    /// Verify a file on disk against the recorded event history.
    pub fn verify_file(&self, path: impl AsRef<Path>) -> SdkResult<VerificationResult> {
        let bytes = ingest::read_all(path)?;
        Ok(self.ledger.verify(&bytes)?)
    }

    /// Verify in-memory bytes against the recorded event history.
    pub fn verify_bytes(&self, bytes: &[u8]) -> SdkResult<VerificationResult> {
        Ok(self.ledger.verify(bytes)?)
    }

    /// Full append-order event history for a document.
    pub fn document_history(&self, document_id: &DocumentId) -> SdkResult<Vec<BlockchainEvent>> {
        Ok(self.ledger.document_history(document_id)?)
    }

    /// Validate a document's event stream integrity.
    pub fn validate_document(&self, document_id: &DocumentId) -> SdkResult<ValidationReport> {
        Ok(self.ledger.validate_document(document_id)?)
    }

    /// All transactions, in ledger order.
    pub fn transactions(&self) -> SdkResult<Vec<Transaction>> {
        Ok(self.ledger.list_transactions()?)
    }

    /// Fetch a transaction by id.
    pub fn transaction(&self, id: &TransactionId) -> SdkResult<Transaction> {
        Ok(self.ledger.get_transaction(id)?)
    }
}

impl Default for Cdl {
    fn default() -> Self {
        Self::open()
    }
}
