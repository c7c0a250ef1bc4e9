use cdl_types::BlockchainEvent;

/// Trait for entries that participate in a per-document hash chain.
pub trait ChainLink {
    /// The entry's own chain hash.
    fn link_hash(&self) -> [u8; 32];
    /// The previous entry's hash (None for the first entry).
    fn prev_hash(&self) -> Option<[u8; 32]>;
    /// Canonical payload bytes for hash verification.
    fn payload_bytes(&self) -> Vec<u8>;
}

impl ChainLink for BlockchainEvent {
    fn link_hash(&self) -> [u8; 32] {
        self.event_hash
    }

    fn prev_hash(&self) -> Option<[u8; 32]> {
        self.prev_hash
    }

    fn payload_bytes(&self) -> Vec<u8> {
        BlockchainEvent::payload_bytes(self)
    }
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of entries forms a valid chain: each entry's
/// `prev_hash` matches the previous entry's hash, and each entry's hash is
/// correctly computed from its payload plus that link.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain of entries.
    ///
    /// Checks:
    /// 1. The first entry has no previous hash
    /// 2. Each subsequent entry's `prev_hash` matches its predecessor
    /// 3. Each entry's hash is correct for its payload
    pub fn verify_chain(entries: &[impl ChainLink]) -> Result<(), ChainError> {
        if entries.is_empty() {
            return Ok(());
        }

        if entries[0].prev_hash().is_some() {
            return Err(ChainError::GenesisHasPrevHash);
        }

        let computed = Self::compute_hash(&entries[0].payload_bytes(), None);
        if computed != entries[0].link_hash() {
            return Err(ChainError::HashMismatch { index: 0 });
        }

        for i in 1..entries.len() {
            let expected_prev = entries[i - 1].link_hash();
            match entries[i].prev_hash() {
                Some(prev) if prev == expected_prev => {}
                Some(_) => return Err(ChainError::BrokenLink { index: i }),
                None => return Err(ChainError::MissingPrevHash { index: i }),
            }

            let computed = Self::compute_hash(&entries[i].payload_bytes(), Some(expected_prev));
            if computed != entries[i].link_hash() {
                return Err(ChainError::HashMismatch { index: i });
            }
        }

        Ok(())
    }

    /// Compute the expected hash for a payload and optional previous hash.
    pub fn compute_hash(payload: &[u8], prev_hash: Option<[u8; 32]>) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"cdl-event-v1:");
        if let Some(prev) = prev_hash {
            hasher.update(&prev);
        }
        hasher.update(payload);
        *hasher.finalize().as_bytes()
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("first entry has a previous hash (should be None)")]
    GenesisHasPrevHash,

    #[error("broken link at index {index}: prev_hash does not match")]
    BrokenLink { index: usize },

    #[error("missing prev_hash at index {index} (should reference previous entry)")]
    MissingPrevHash { index: usize },

    #[error("hash mismatch at index {index}: computed hash differs from stored")]
    HashMismatch { index: usize },
}
