//! High-level SDK for the Closing Document Ledger (CDL).
//!
//! Provides a unified API for applications embedding the ledger: file
//! ingestion, transaction and document lifecycle, verification, and the
//! e-signature completion boundary.

pub mod error;
pub mod esign;
pub mod ingest;
pub mod repository;

pub use error::{SdkError, SdkResult};
pub use esign::SigningCompletion;
pub use repository::{Cdl, CdlConfig};

// Re-export key types
pub use cdl_audit::{AuditEvent, AuditFilter, AuditStream};
pub use cdl_crypto::ContentHasher;
pub use cdl_ledger::{DocumentLedger, ValidationReport, VerificationResult};
pub use cdl_store::InMemoryLedgerStore;
pub use cdl_types::{
    ActorId, ActorRole, ContentHash, DocumentAsset, DocumentId, DocumentStatus, EventKind,
    LoanAmount, NewTransaction, Transaction, TransactionId, TransactionStatus,
};
