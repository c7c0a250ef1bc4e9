use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::temporal::Timestamp;

fn all_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn all_lower_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Identifier of a loan-closing workflow instance.
///
/// Canonical format: `TX-YYYY-NNNN` (`TX-\d{4}-\d{4,}`), e.g.
/// `TX-2024-0001`. The year is the calendar year the transaction was
/// opened; the sequence is zero-padded to at least four digits.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Build an id from a year and a sequence number.
    pub fn new(year: i32, sequence: u64) -> Self {
        Self(format!("TX-{year:04}-{sequence:04}"))
    }

    /// Build an id for the current calendar year.
    pub fn mint(sequence: u64) -> Self {
        use chrono::Datelike;
        Self::new(chrono::Utc::now().year(), sequence)
    }

    /// Parse and validate a transaction id.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidId {
            kind: "transaction",
            value: s.to_string(),
        };
        let rest = s.strip_prefix("TX-").ok_or_else(invalid)?;
        let (year, seq) = rest.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || !all_ascii_digits(year) {
            return Err(invalid());
        }
        if seq.len() < 4 || !all_ascii_digits(seq) {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a document asset on the ledger.
///
/// Canonical format: `DOC-<creation-epoch-millis>` (`DOC-\d{13,}`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Build an id from a creation timestamp.
    pub fn mint(created_at: Timestamp) -> Self {
        Self(format!("DOC-{:013}", created_at.as_millis()))
    }

    /// Parse and validate a document id.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidId {
            kind: "document",
            value: s.to_string(),
        };
        let rest = s.strip_prefix("DOC-").ok_or_else(invalid)?;
        if rest.len() < 13 || !all_ascii_digits(rest) {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }

    /// Creation time encoded in the id, in epoch milliseconds.
    pub fn created_at_millis(&self) -> u64 {
        self.0[4..].parse().unwrap_or(0)
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ledger event (UUID v7 for time-ordering).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl EventId {
    /// Generate a new time-ordered event ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of the UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.short_id())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque block identifier minted for each recorded event.
///
/// Canonical format: `0x` followed by at least 64 lowercase hex characters
/// (`^0x[a-f0-9]{64,}$`). An identifier, not a security token.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Build a block id from 32 raw bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Parse and validate a block id.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidId {
            kind: "block",
            value: s.to_string(),
        };
        let rest = s.strip_prefix("0x").ok_or_else(invalid)?;
        if rest.len() < 64 || !all_lower_hex(rest) {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }

    /// Short representation (`0x` + first 8 hex characters).
    pub fn short_id(&self) -> String {
        self.0[..10].to_string()
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.short_id())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
