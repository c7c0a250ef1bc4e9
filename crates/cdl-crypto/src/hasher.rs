use cdl_types::ContentHash;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"cdl-document-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: document bytes and an event payload with identical bytes
/// will produce different digests.
///
/// Hashing is pure and deterministic; there is no error condition for
/// in-memory byte input. I/O errors reading a source file belong to the
/// caller, never to the hasher.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for document file content.
    pub const DOCUMENT: Self = Self {
        domain: "cdl-document-v1",
    };
    /// Hasher for ledger event payloads.
    pub const EVENT: Self = Self {
        domain: "cdl-event-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentHash::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as canonical JSON with domain separation.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<ContentHash, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &ContentHash) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"NOTE-V1";
        assert_eq!(ContentHasher::DOCUMENT.hash(data), ContentHasher::DOCUMENT.hash(data));
    }

    #[test]
    fn digest_renders_as_64_hex_chars() {
        let hex = ContentHasher::DOCUMENT.hash(b"deed of trust").to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        assert_ne!(
            ContentHasher::DOCUMENT.hash(data),
            ContentHasher::EVENT.hash(data)
        );
    }

    #[test]
    fn verify_correct_and_tampered_data() {
        let digest = ContentHasher::DOCUMENT.hash(b"NOTE-V1");
        assert!(ContentHasher::DOCUMENT.verify(b"NOTE-V1", &digest));
        assert!(!ContentHasher::DOCUMENT.verify(b"NOTE-V2", &digest));
    }

    #[test]
    fn hash_json_works() {
        let value = serde_json::json!({"doc": "note", "version": 1});
        let a = ContentHasher::EVENT.hash_json(&value).unwrap();
        let b = ContentHasher::EVENT.hash_json(&value).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_domain() {
        let hasher = ContentHasher::new("cdl-export-v1");
        assert_ne!(hasher.hash(b"data"), ContentHasher::DOCUMENT.hash(b"data"));
    }

    proptest! {
        #[test]
        fn hashing_is_invariant_across_calls(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(
                ContentHasher::DOCUMENT.hash(&data),
                ContentHasher::DOCUMENT.hash(&data)
            );
        }

        #[test]
        fn single_byte_mutation_changes_digest(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut mutated = data.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= flip;
            prop_assert_ne!(
                ContentHasher::DOCUMENT.hash(&data),
                ContentHasher::DOCUMENT.hash(&mutated)
            );
        }

        #[test]
        fn appending_bytes_changes_digest(
            data in proptest::collection::vec(any::<u8>(), 0..1024),
            tail in proptest::collection::vec(any::<u8>(), 1..64),
        ) {
            let mut extended = data.clone();
            extended.extend_from_slice(&tail);
            prop_assert_ne!(
                ContentHasher::DOCUMENT.hash(&data),
                ContentHasher::DOCUMENT.hash(&extended)
            );
        }
    }
}
