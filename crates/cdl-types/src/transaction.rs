use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocumentAsset;
use crate::id::{DocumentId, TransactionId};
use crate::money::LoanAmount;
use crate::temporal::Timestamp;

/// Lifecycle status of a loan-closing transaction.
///
/// Derived, never set arbitrarily: the core produces OPEN at creation and
/// RECORDED as a side effect of a contained document reaching RECORDED.
/// CLOSING and COMPLETED exist for workflow layers above the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Open,
    Closing,
    Recorded,
    Completed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::Closing => "CLOSING",
            Self::Recorded => "RECORDED",
            Self::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}

/// Input for creating a transaction on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub property_address: String,
    pub loan_amount: LoanAmount,
    pub lender: String,
    pub borrower: String,
}

/// A loan-closing workflow instance.
///
/// Exclusively owns its document assets; mutated only by the ledger as
/// documents progress, never deleted within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub property_address: String,
    pub loan_amount: LoanAmount,
    pub lender: String,
    pub borrower: String,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
    /// Creation order.
    pub documents: Vec<DocumentAsset>,
}

impl Transaction {
    /// Open a new transaction with no documents.
    pub fn open(new: NewTransaction, created_at: Timestamp) -> Self {
        Self {
            id: new.id,
            property_address: new.property_address,
            loan_amount: new.loan_amount,
            lender: new.lender,
            borrower: new.borrower,
            status: TransactionStatus::Open,
            created_at,
            documents: Vec::new(),
        }
    }

    /// Look up an owned document by id.
    pub fn document(&self, id: &DocumentId) -> Option<&DocumentAsset> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Mutable lookup of an owned document by id.
    pub fn document_mut(&mut self, id: &DocumentId) -> Option<&mut DocumentAsset> {
        self.documents.iter_mut().find(|d| &d.id == id)
    }

    /// Number of owned documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
