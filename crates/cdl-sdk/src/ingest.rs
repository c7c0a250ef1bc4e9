//! File ingestion: the boundary where bytes enter the ledger.
//!
//! The ledger core operates on byte slices only; reading those bytes off
//! disk, and any I/O failure doing so, is this module's responsibility.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::SdkResult;

/// Read a file's full contents for hashing or verification.
pub fn read_all(path: impl AsRef<Path>) -> SdkResult<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), "read file for ledger");
    Ok(bytes)
}
