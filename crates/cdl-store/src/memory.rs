use std::collections::HashMap;
use std::sync::RwLock;

use cdl_types::{DocumentId, Transaction, TransactionId};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::LedgerStore;

/// In-memory ledger store for tests, local demos, and embedding.
///
/// Holds transactions in insertion order behind a single `RwLock`, with a
/// flat documentId → transactionId index refreshed under the same write
/// lock as each upsert. Process-lifetime only; durability is an embedding
/// concern.
pub struct InMemoryLedgerStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    /// Insertion order defines ledger order.
    transactions: Vec<Transaction>,
    /// TransactionId → position in `transactions`.
    positions: HashMap<TransactionId, usize>,
    /// DocumentId → owning transaction.
    document_index: HashMap<DocumentId, TransactionId>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreState::default()),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get(&self, id: &TransactionId) -> StoreResult<Option<Transaction>> {
        let state = self.read()?;
        Ok(state
            .positions
            .get(id)
            .and_then(|&pos| state.transactions.get(pos))
            .cloned())
    }

    fn list(&self) -> StoreResult<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    fn upsert(&self, transaction: Transaction) -> StoreResult<()> {
        let mut state = self.write()?;

        for document in &transaction.documents {
            state
                .document_index
                .insert(document.id.clone(), transaction.id.clone());
        }

        match state.positions.get(&transaction.id).copied() {
            Some(pos) => {
                state.transactions[pos] = transaction;
            }
            None => {
                debug!(transaction = %transaction.id, "storing new transaction");
                let pos = state.transactions.len();
                state.positions.insert(transaction.id.clone(), pos);
                state.transactions.push(transaction);
            }
        }

        Ok(())
    }

    fn find_document(&self, id: &DocumentId) -> StoreResult<Option<TransactionId>> {
        Ok(self.read()?.document_index.get(id).cloned())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.transactions.len())
    }
}
