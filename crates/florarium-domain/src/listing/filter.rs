//! Composable filter predicates
//!
//! Every optional filter of a list request contributes one clause; clauses
//! compose with logical AND into a single [`Predicate`] value, keeping the
//! listing core free of any storage technology.

use crate::aggregates::SoilFormula;
use crate::entities::Project;
use crate::value_objects::{ContainerId, EntityName, SoilTypeId};
use crate::{DomainError, DomainResult};

/// Upper bound on multi-value filter entries
pub const MAX_FILTER_VALUES: usize = 10;

/// Conjunction of filter clauses over one entity type.
///
/// An empty predicate matches everything.
pub struct Predicate<T> {
    clauses: Vec<Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T> Predicate<T> {
    /// Predicate with no clauses, matching every entity
    #[must_use]
    pub fn all() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Add a clause; the result matches only where every clause matches
    #[must_use]
    pub fn and(mut self, clause: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.clauses.push(Box::new(clause));
        self
    }

    /// Evaluate all clauses against one entity
    pub fn test(&self, item: &T) -> bool {
        self.clauses.iter().all(|clause| clause(item))
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> std::fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("clauses", &self.clauses.len())
            .finish()
    }
}

/// Case-insensitive substring filter on entity names.
///
/// The filter string is trimmed and lowercased once at construction; a
/// missing or blank filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter(Option<String>);

impl NameFilter {
    /// Build from the raw query value
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(
            raw.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
        )
    }

    /// True when the name contains the filter string, or no filter is set
    pub fn matches(&self, name: &EntityName) -> bool {
        match &self.0 {
            Some(needle) => name.normalized().contains(needle),
            None => true,
        }
    }
}

/// Filters accepted by the soil formula listing.
///
/// The soil type filter has AND semantics: a formula matches only when its
/// item set covers every requested soil type, not just any of them.
#[derive(Debug, Clone, Default)]
pub struct SoilFormulaFilter {
    name: NameFilter,
    soil_type_ids: Vec<SoilTypeId>,
}

impl SoilFormulaFilter {
    /// Build from raw query values.
    ///
    /// # Errors
    ///
    /// [`DomainError::TooManyFilterValues`] for more than
    /// [`MAX_FILTER_VALUES`] soil type IDs and [`DomainError::InvalidId`]
    /// for any non-positive ID.
    pub fn new(name: Option<&str>, soil_type_ids: &[i64]) -> DomainResult<Self> {
        if soil_type_ids.len() > MAX_FILTER_VALUES {
            return Err(DomainError::TooManyFilterValues(soil_type_ids.len()));
        }
        let soil_type_ids = soil_type_ids
            .iter()
            .map(|&raw| SoilTypeId::new(raw))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self {
            name: NameFilter::new(name),
            soil_type_ids,
        })
    }

    /// Compose into a single predicate
    #[must_use]
    pub fn predicate(&self) -> Predicate<SoilFormula> {
        let name = self.name.clone();
        let mut predicate =
            Predicate::all().and(move |formula: &SoilFormula| name.matches(formula.name()));
        if !self.soil_type_ids.is_empty() {
            let required = self.soil_type_ids.clone();
            predicate = predicate.and(move |formula: &SoilFormula| formula.contains_all(&required));
        }
        predicate
    }
}

/// Filters accepted by the project listing
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    name: NameFilter,
    container_id: Option<ContainerId>,
}

impl ProjectFilter {
    /// Build from raw query values.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] for a non-positive container ID.
    pub fn new(name: Option<&str>, container_id: Option<i64>) -> DomainResult<Self> {
        Ok(Self {
            name: NameFilter::new(name),
            container_id: container_id.map(ContainerId::new).transpose()?,
        })
    }

    /// Compose into a single predicate
    #[must_use]
    pub fn predicate(&self) -> Predicate<Project> {
        let name = self.name.clone();
        let mut predicate =
            Predicate::all().and(move |project: &Project| name.matches(&project.name));
        if let Some(container_id) = self.container_id {
            predicate =
                predicate.and(move |project: &Project| project.container_id == Some(container_id));
        }
        predicate
    }
}
