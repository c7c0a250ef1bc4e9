//! E-signature completion boundary.
//!
//! The signing ceremony itself (envelope creation, recipient routing,
//! reminders) is external state owned by the e-signature provider. Only
//! the terminal notification crosses into the ledger, where it becomes a
//! SIGNATURE event citing the document's current hash.

use cdl_types::{ActorId, EventMetadata, Timestamp};

/// Terminal notification from an external signing ceremony.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningCompletion {
    /// Who signed (email, as reported by the provider).
    pub signer: ActorId,
    /// When the provider recorded the signature.
    pub signed_at: Timestamp,
    /// Provider's envelope identifier, kept for cross-referencing.
    pub envelope_id: String,
}

impl SigningCompletion {
    /// Render the completion as event metadata.
    pub fn to_metadata(&self) -> EventMetadata {
        let mut metadata = EventMetadata::new();
        metadata.insert("envelope_id".into(), self.envelope_id.clone());
        metadata.insert("signed_at".into(), self.signed_at.to_rfc3339());
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_carries_envelope_and_time() {
        let completion = SigningCompletion {
            signer: ActorId::parse("ada.cooper@mail.example.com").unwrap(),
            signed_at: Timestamp::from_millis(0),
            envelope_id: "env-7f3a".into(),
        };

        let metadata = completion.to_metadata();
        assert_eq!(metadata.get("envelope_id").map(String::as_str), Some("env-7f3a"));
        assert!(metadata.get("signed_at").unwrap().starts_with("1970-01-01"));
    }
}
