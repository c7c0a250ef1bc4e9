use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of the party performing a ledger action.
///
/// Actor ids are email-shaped strings, validated at the boundary: the
/// ledger itself assumes well-formed input and only checks existence.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Parse and validate an email-shaped actor id.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidEmail(s.to_string());
        let (local, domain) = s.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() {
            return Err(invalid());
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }
        if s.chars().any(char::is_whitespace) || domain.contains('@') {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }

    /// The validated email string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of the acting party in the closing workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Borrower,
    Lender,
    TitleCompany,
    Attorney,
    Notary,
    CountyClerk,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Borrower => "BORROWER",
            Self::Lender => "LENDER",
            Self::TitleCompany => "TITLE_COMPANY",
            Self::Attorney => "ATTORNEY",
            Self::Notary => "NOTARY",
            Self::CountyClerk => "COUNTY_CLERK",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_email_shaped_ids() {
        for ok in [
            "attorney@closings.example.com",
            "j.doe+loans@title.co",
            "clerk@county.gov.us",
        ] {
            ActorId::parse(ok).unwrap();
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in [
            "not-an-email",
            "@closings.example.com",
            "attorney@",
            "attorney@localhost",
            "attorney@.com",
            "two words@title.co",
            "a@b@title.co",
        ] {
            assert!(ActorId::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn role_display_matches_wire_names() {
        assert_eq!(ActorRole::TitleCompany.to_string(), "TITLE_COMPANY");
        assert_eq!(ActorRole::CountyClerk.to_string(), "COUNTY_CLERK");
    }

    #[test]
    fn role_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ActorRole::TitleCompany).unwrap();
        assert_eq!(json, "\"TITLE_COMPANY\"");
        let parsed: ActorRole = serde_json::from_str("\"COUNTY_CLERK\"").unwrap();
        assert_eq!(parsed, ActorRole::CountyClerk);
    }
}
