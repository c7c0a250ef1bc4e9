//! Audit/compliance sink boundary for the Closing Document Ledger (CDL).
//!
//! The ledger notifies this boundary after every successful document
//! mutation; delivery is best-effort and never affects ledger
//! correctness. Subscribers attach filtered broadcast channels via
//! [`AuditPublisher::subscribe`]; a slow or departed subscriber is pruned
//! rather than waited on.

pub mod event;
pub mod publisher;

pub use event::AuditEvent;
pub use publisher::{AuditFilter, AuditPublisher, AuditStream};
