//! Value objects: equality by value, not identity.

use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attributes are
/// the same value. They are immutable: "changing" one means building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative amount of money in the store currency.
///
/// Stored as an integer number of cents. Parsed from and rendered as a
/// two-decimal string (`"12.50"`), which is also its serde representation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(quantity)).map(Money)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || DomainError::validation(format!("invalid amount: {s:?}"));

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Money)
            .ok_or_else(invalid)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!(" 0.99 ".parse::<Money>().unwrap(), Money::from_cents(99));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", "-1", "1.234", "abc", ".5", "1.x"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn line_arithmetic() {
        let price = Money::from_cents(199);
        assert_eq!(price.checked_mul(3), Some(Money::from_cents(597)));
        assert_eq!(Money::from_cents(u64::MAX).checked_add(price), None);
    }
}
