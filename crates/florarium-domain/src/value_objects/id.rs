//! Generic integer-keyed Identifier Value Object
//!
//! Type-safe identifier using phantom types for compile-time differentiation.
//! Uses sealed trait pattern to prevent external marker implementations.
//!
//! Identifiers are positive integers assigned by the store; a zero or
//! negative raw value never becomes an `Id`.

use crate::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Sealed trait module preventing external implementations
mod private {
    pub trait Sealed {}
}

/// Marker trait for type-safe ID differentiation.
///
/// This trait is sealed - external crates cannot implement it.
/// Only marker types defined in this module are valid.
pub trait IdMarker: private::Sealed + Send + Sync + 'static {}

macro_rules! id_marker {
    ($(#[$doc:meta] $marker:ident => $alias:ident),+ $(,)?) => {
        $(
            #[$doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $marker;

            impl private::Sealed for $marker {}
            impl IdMarker for $marker {}

            #[$doc]
            pub type $alias = Id<$marker>;
        )+
    };
}

id_marker! {
    /// Plant identifiers
    PlantMarker => PlantId,
    /// Container identifiers
    ContainerMarker => ContainerId,
    /// Decoration identifiers
    DecorationMarker => DecorationId,
    /// Soil type identifiers
    SoilTypeMarker => SoilTypeId,
    /// Soil formula identifiers
    SoilFormulaMarker => SoilFormulaId,
    /// Project identifiers
    ProjectMarker => ProjectId,
}

/// Generic positive-integer identifier with phantom type safety.
///
/// The phantom type parameter `T` ensures that different ID kinds cannot be
/// accidentally mixed: a `SoilTypeId` is never comparable to a
/// `SoilFormulaId` even though both wrap an `i64`. `PhantomData<T>` is
/// zero-sized, so `Id<T>` has the same layout as a plain `i64`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id<T: IdMarker> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// Create an identifier from a raw store key.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidId`] if `value <= 0`.
    pub fn new(value: i64) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::InvalidId(value));
        }
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Get the raw key value
    #[must_use]
    pub fn get(&self) -> i64 {
        self.value
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(std::any::type_name::<Self>())
            .field(&self.value)
            .finish()
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: IdMarker> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Id::new(value).map_err(serde::de::Error::custom)
    }
}
