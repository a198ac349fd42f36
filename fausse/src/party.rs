//! Party size type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The number of guests in a reservation (at least one).
///
/// # Examples
///
/// ```
/// use fausse::PartySize;
///
/// let party = PartySize::try_from(4_i64).unwrap();
/// assert_eq!(party.value(), 4);
///
/// assert!(PartySize::try_from(0_i64).is_err());
/// assert!(PartySize::try_from(-2_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PartySize(u32);

impl PartySize {
    /// The smallest valid party.
    pub const MIN: u32 = 1;

    /// Returns the number of guests.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for PartySize {
    type Error = InvalidPartySizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(Self::MIN) {
            return Err(InvalidPartySizeError {
                value,
                reason: "party size must be a positive integer".into(),
            });
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| InvalidPartySizeError {
                value,
                reason: "party size is too large".into(),
            })
    }
}

impl TryFrom<u32> for PartySize {
    type Error = InvalidPartySizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<PartySize> for u32 {
    fn from(party: PartySize) -> Self {
        party.0
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid party sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPartySizeError {
    /// The rejected value.
    pub value: i64,
    /// The reason the value was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidPartySizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid party size {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidPartySizeError {}
