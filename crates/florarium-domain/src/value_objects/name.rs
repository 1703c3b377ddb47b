//! Validated entity name with a trim-normalized uniqueness key

use crate::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum name length in characters, counted after trimming
pub const MAX_NAME_LEN: usize = 255;

/// Display name of any named catalog record.
///
/// The stored value is trimmed at construction. Uniqueness and name
/// filtering compare the case-insensitive normalized form, so `"Mix"` and
/// `"  MIX "` collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Validate and trim a raw name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyName`] when empty after trimming and
    /// [`DomainError::NameTooLong`] when over [`MAX_NAME_LEN`] characters.
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(DomainError::NameTooLong(len));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The display form, as entered minus surrounding whitespace
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for uniqueness checks and name filters
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EntityName::new(raw).map_err(serde::de::Error::custom)
    }
}
