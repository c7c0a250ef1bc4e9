use cdl_store::StoreError;
use cdl_types::{DocumentId, TransactionId};

/// Errors produced by ledger operations.
///
/// Every "not found" condition is checked before any mutation: an
/// operation that fails leaves the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("transaction {id} not found on the ledger")]
    TransactionNotFound { id: TransactionId },

    #[error("document {id} not found on the ledger")]
    DocumentNotFound { id: DocumentId },

    #[error("transaction {id} already exists on the ledger")]
    TransactionExists { id: TransactionId },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
