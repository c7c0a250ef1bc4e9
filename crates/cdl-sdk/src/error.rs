use thiserror::Error;

/// Errors surfaced by the SDK.
///
/// File I/O failures belong to this layer; the ledger core never touches
/// a filesystem and never sees an `Io` error.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Ledger(#[from] cdl_ledger::LedgerError),

    #[error(transparent)]
    Store(#[from] cdl_store::StoreError),

    #[error(transparent)]
    Type(#[from] cdl_types::TypeError),
}

/// Result alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
