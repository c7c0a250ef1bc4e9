//! Cryptographic primitives for the Closing Document Ledger (CDL).
//!
//! - [`ContentHasher`] — domain-separated BLAKE3 content digests
//! - [`BlockIdGenerator`] — random 256-bit block identifiers
//! - [`ChainVerifier`] / [`ChainLink`] — per-document event hash chains

pub mod block_id;
pub mod chain;
pub mod hasher;

pub use block_id::BlockIdGenerator;
pub use chain::{ChainError, ChainLink, ChainVerifier};
pub use hasher::{ContentHasher, HasherError};
