use cdl_types::{DocumentId, Transaction, TransactionId};

use crate::error::StoreResult;

/// Read/write port over the collection of ledger transactions.
///
/// All implementations must satisfy these invariants:
/// - `upsert` replaces the stored transaction wholesale and refreshes the
///   document index entries for its documents in the same atomic step.
/// - `list` returns transactions in insertion (ledger) order.
/// - Readers observe a consistent snapshot; a transaction is never
///   visible with a partially-appended event.
/// - Nothing is ever deleted; the collection only grows.
pub trait LedgerStore: Send + Sync {
    /// Fetch a transaction by id. `Ok(None)` if unknown.
    fn get(&self, id: &TransactionId) -> StoreResult<Option<Transaction>>;

    /// All transactions, in insertion order.
    fn list(&self) -> StoreResult<Vec<Transaction>>;

    /// Insert or replace a transaction and refresh its document index
    /// entries.
    fn upsert(&self, transaction: Transaction) -> StoreResult<()>;

    /// Resolve a document id to its owning transaction via the flat
    /// secondary index. `Ok(None)` if the document exists nowhere.
    fn find_document(&self, id: &DocumentId) -> StoreResult<Option<TransactionId>>;

    /// Whether a transaction with this id exists.
    fn contains(&self, id: &TransactionId) -> StoreResult<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Number of stored transactions.
    fn count(&self) -> StoreResult<usize>;
}
