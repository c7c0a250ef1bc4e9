//! Foundation types for the Closing Document Ledger (CDL).
//!
//! This crate provides the identifier, actor, event, and entity types used
//! throughout the CDL system. Every other CDL crate depends on `cdl-types`.
//!
//! # Key Types
//!
//! - [`TransactionId`] — loan-closing workflow identifier (`TX-YYYY-NNNN`)
//! - [`DocumentId`] — ledger document identifier (`DOC-<epoch-millis>`)
//! - [`ContentHash`] — 256-bit content digest, rendered as 64 hex characters
//! - [`BlockId`] — opaque per-event block identifier (`0x` + 64 hex)
//! - [`BlockchainEvent`] — one immutable, hash-linked ledger entry
//! - [`DocumentAsset`] / [`Transaction`] — the owned entity hierarchy
//! - [`LoanAmount`] — positive monetary amount with two decimal places
//! - [`Timestamp`] — epoch-millisecond wall-clock time

pub mod actor;
pub mod document;
pub mod error;
pub mod event;
pub mod hash;
pub mod id;
pub mod money;
pub mod temporal;
pub mod transaction;

pub use actor::{ActorId, ActorRole};
pub use document::{DocumentAsset, DocumentStatus};
pub use error::TypeError;
pub use event::{BlockchainEvent, EventKind, EventMetadata};
pub use hash::ContentHash;
pub use id::{BlockId, DocumentId, EventId, TransactionId};
pub use money::LoanAmount;
pub use temporal::Timestamp;
pub use transaction::{NewTransaction, Transaction, TransactionStatus};
