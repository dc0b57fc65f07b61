//! Call record model
//!
//! Represents one completed call parsed from a call log line.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use validator::Validate;

use crate::error::BillError;
use crate::BillResult;

/// Raw number as it arrives from the call log, before validation
#[derive(Debug, Validate)]
struct PhoneNumberInput {
    #[validate(length(equal = 6, message = "Phone number must have exactly 6 digits"))]
    digits: String,
}

/// Validated 6-digit phone number
///
/// Keeps the original digit string (leading zeros included) for display
/// and exposes its numeric value for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and validate a phone number
    ///
    /// # Errors
    ///
    /// Returns `BillError::Validation` when the number is not exactly six
    /// characters long and `BillError::InvalidNumber` when it contains
    /// anything other than ASCII digits.
    pub fn parse(raw: impl Into<String>) -> BillResult<Self> {
        let input = PhoneNumberInput { digits: raw.into() };
        input.validate()?;

        if !input.digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BillError::InvalidNumber(input.digits));
        }

        Ok(Self(input.digits))
    }

    /// Digit string as written in the log
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the number
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = BillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Call record
///
/// A single completed call. Immutable once constructed; the constructor
/// guarantees `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    number: PhoneNumber,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl CallRecord {
    /// Create a new call record
    ///
    /// # Errors
    ///
    /// Returns `BillError::InvalidRecord` if the call starts after it ends,
    /// or a phone number error if `number` is not six digits.
    pub fn new(
        number: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BillResult<Self> {
        let number = PhoneNumber::parse(number)?;
        Self::with_number(number, start, end)
    }

    /// Create a new call record from an already validated number
    pub fn with_number(
        number: PhoneNumber,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BillResult<Self> {
        if start > end {
            return Err(BillError::InvalidRecord {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { number, start, end })
    }

    /// Called number
    #[inline]
    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }

    /// Call start timestamp
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Call end timestamp
    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whole minutes between start and end, truncating any partial minute
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }
}
