//! Bounded percentage value for formula items

use crate::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Share of a soil type within a formula, in whole percent.
///
/// Valid range is `[1, 100]`. The sum over a formula's items is not
/// constrained; compositions may intentionally over- or under-shoot 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Validate a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPercentage`] outside `[1, 100]`.
    pub fn new(value: i64) -> DomainResult<Self> {
        if !(1..=100).contains(&value) {
            return Err(DomainError::InvalidPercentage(value));
        }
        Ok(Self(value as u8))
    }

    /// Raw value in `[1, 100]`
    #[must_use]
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Percentage::new(value).map_err(serde::de::Error::custom)
    }
}
