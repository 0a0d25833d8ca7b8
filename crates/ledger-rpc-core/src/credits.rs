//! Credit balance types.
//!
//! The `Credit` column is an unsigned 32-bit integer, so a valid balance is
//! anything in `0..=u32::MAX`. Callers hand the service loosely-typed input
//! ([`CreditInput`]); resolving it into a [`Credit`] applies the numeric,
//! negativity, and range checks in that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, ValidationError};

/// A non-negative account credit balance.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credit(u32);

impl Credit {
    /// Zero credit, the column default.
    pub const ZERO: Self = Self(0);

    /// Largest storable credit.
    pub const MAX: Self = Self(u32::MAX);

    /// Wrap a raw balance.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Return the raw balance.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Validate a signed value as a credit balance.
    ///
    /// # Errors
    ///
    /// - `LedgerError::NegativeCredit` if `value < 0`.
    /// - `ValidationError::CreditTooLarge` if `value > u32::MAX`.
    pub fn try_from_i64(value: i64) -> Result<Self, LedgerError> {
        if value < 0 {
            return Err(LedgerError::NegativeCredit { value });
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::CreditTooLarge { max: u32::MAX }.into())
    }
}

impl From<u32> for Credit {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Credit> for i64 {
    fn from(credit: Credit) -> Self {
        i64::from(credit.0)
    }
}

impl fmt::Debug for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credit({})", self.0)
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credit value as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditInput {
    /// An integer argument.
    Integer(i64),
    /// A textual argument that may hold an integer.
    Text(String),
    /// Any other argument type, rendered for diagnostics.
    Other(String),
}

impl CreditInput {
    /// Check that the input is an integer, without range checks.
    ///
    /// Text is trimmed and parsed as base-10. Integer text too wide for
    /// `i64` saturates so that the range checks still see its sign.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CreditNotNumber` if the input is not an integer.
    pub fn to_integer(&self) -> Result<i64, ValidationError> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Text(text) => parse_integer(text).ok_or_else(|| {
                ValidationError::CreditNotNumber {
                    value: text.clone(),
                }
            }),
            Self::Other(rendered) => Err(ValidationError::CreditNotNumber {
                value: rendered.clone(),
            }),
        }
    }

    /// Resolve into a storable credit balance.
    ///
    /// # Errors
    ///
    /// - `ValidationError::CreditNotNumber` if the input is not an integer.
    /// - `LedgerError::NegativeCredit` if it is negative.
    /// - `ValidationError::CreditTooLarge` if it exceeds [`Credit::MAX`].
    pub fn resolve(&self) -> Result<Credit, LedgerError> {
        Credit::try_from_i64(self.to_integer()?)
    }
}

impl From<i64> for CreditInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for CreditInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for CreditInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) | Self::Other(text) => write!(f, "{text}"),
        }
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
