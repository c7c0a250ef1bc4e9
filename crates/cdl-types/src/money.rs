use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Loan amount in minor currency units (cents).
///
/// Always positive, always at most two decimal places. Stored in minor
/// units so arithmetic and serialization stay exact; parsing accepts the
/// decimal notation used on closing paperwork (`"325000"`, `"325000.5"`,
/// `"325000.50"`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoanAmount(u64);

impl LoanAmount {
    /// Create from minor units (cents). Must be positive.
    pub fn from_minor_units(minor: u64) -> Result<Self, TypeError> {
        if minor == 0 {
            return Err(TypeError::InvalidAmount("amount must be positive".into()));
        }
        Ok(Self(minor))
    }

    /// Parse a decimal amount with at most two fractional digits.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidAmount(s.to_string());
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let dollars: u64 = whole.parse().map_err(|_| invalid())?;
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        let minor = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(invalid)?;
        Self::from_minor_units(minor).map_err(|_| invalid())
    }

    /// The amount in minor units (cents).
    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(LoanAmount::parse("325000").unwrap().minor_units(), 32_500_000);
        assert_eq!(LoanAmount::parse("325000.5").unwrap().minor_units(), 32_500_050);
        assert_eq!(LoanAmount::parse("325000.50").unwrap().minor_units(), 32_500_050);
        assert_eq!(LoanAmount::parse("0.01").unwrap().minor_units(), 1);
    }

    #[test]
    fn rejects_invalid_amounts() {
        for bad in ["", "0", "0.00", "-100", "100.123", "1,000", "12.", ".50", "abc"] {
            assert!(LoanAmount::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn zero_minor_units_is_rejected() {
        assert!(LoanAmount::from_minor_units(0).is_err());
    }

    #[test]
    fn display_always_shows_two_decimals() {
        assert_eq!(LoanAmount::parse("325000").unwrap().to_string(), "325000.00");
        assert_eq!(LoanAmount::parse("99.5").unwrap().to_string(), "99.50");
    }

    #[test]
    fn serde_roundtrip() {
        let amount = LoanAmount::parse("425000.25").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let parsed: LoanAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, parsed);
    }
}
