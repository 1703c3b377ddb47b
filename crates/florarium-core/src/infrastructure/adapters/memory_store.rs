//! Thread-safe in-memory store
//!
//! One table per entity kind, each behind a `parking_lot::RwLock`. The
//! write lock is the commit boundary: it spans the uniqueness re-check and
//! the mutation, so the handler-level name pre-check stays a fast path and
//! a commit-time collision still surfaces as `DuplicateName`. Readers never
//! observe a half-replaced formula.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use florarium_domain::aggregates::{FormulaItem, SoilFormula};
use florarium_domain::entities::{Container, Decoration, Plant, Project, SoilType};
use florarium_domain::value_objects::{EntityName, SoilFormulaId};
use florarium_domain::{DomainError, DomainResult};
use parking_lot::RwLock;

use crate::ports::{CatalogEntry, CatalogRepository, SoilFormulaRepository};

/// Rows keyed by identifier plus the identifier sequence
#[derive(Debug)]
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    sequence: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }

    fn next_id(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    fn snapshot(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }
}

/// In-memory implementation of every repository port
#[derive(Debug)]
pub struct MemoryStore {
    plants: Table<Plant>,
    containers: Table<Container>,
    decorations: Table<Decoration>,
    soil_types: Table<SoilType>,
    projects: Table<Project>,
    formulas: Table<SoilFormula>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            plants: Table::new(),
            containers: Table::new(),
            decorations: Table::new(),
            soil_types: Table::new(),
            projects: Table::new(),
            formulas: Table::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a catalog entity type onto its table
trait HasTable<E: CatalogEntry> {
    fn table(&self) -> &Table<E>;
}

impl HasTable<Plant> for MemoryStore {
    fn table(&self) -> &Table<Plant> {
        &self.plants
    }
}

impl HasTable<Container> for MemoryStore {
    fn table(&self) -> &Table<Container> {
        &self.containers
    }
}

impl HasTable<Decoration> for MemoryStore {
    fn table(&self) -> &Table<Decoration> {
        &self.decorations
    }
}

impl HasTable<SoilType> for MemoryStore {
    fn table(&self) -> &Table<SoilType> {
        &self.soil_types
    }
}

impl HasTable<Project> for MemoryStore {
    fn table(&self) -> &Table<Project> {
        &self.projects
    }
}

#[async_trait]
impl<E> CatalogRepository<E> for MemoryStore
where
    E: CatalogEntry,
    Self: HasTable<E>,
{
    async fn find(&self, id: i64) -> DomainResult<Option<E>> {
        Ok(HasTable::<E>::table(self).get(id))
    }

    async fn list_all(&self) -> DomainResult<Vec<E>> {
        Ok(HasTable::<E>::table(self).snapshot())
    }

    async fn insert(&self, draft: E::Draft) -> DomainResult<E> {
        let table = HasTable::<E>::table(self);
        let mut rows = table.rows.write();

        let normalized = E::draft_name(&draft).normalized();
        if rows.values().any(|row| E::name(row).normalized() == normalized) {
            return Err(DomainError::DuplicateName(
                E::draft_name(&draft).as_str().to_string(),
            ));
        }

        let id = table.next_id();
        let entity = E::assemble(id, draft)?;
        rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: i64, draft: E::Draft) -> DomainResult<E> {
        let table = HasTable::<E>::table(self);
        let mut rows = table.rows.write();

        if !rows.contains_key(&id) {
            return Err(DomainError::not_found(E::KIND, id));
        }
        let normalized = E::draft_name(&draft).normalized();
        if rows
            .iter()
            .any(|(&row_id, row)| row_id != id && E::name(row).normalized() == normalized)
        {
            return Err(DomainError::DuplicateName(
                E::draft_name(&draft).as_str().to_string(),
            ));
        }

        let entity = E::assemble(id, draft)?;
        rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn remove(&self, id: i64) -> DomainResult<()> {
        match HasTable::<E>::table(self).rows.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(E::KIND, id)),
        }
    }

    async fn exists(&self, id: i64) -> DomainResult<bool> {
        Ok(HasTable::<E>::table(self).rows.read().contains_key(&id))
    }

    async fn find_id_by_name(
        &self,
        normalized: &str,
        exclude: Option<i64>,
    ) -> DomainResult<Option<i64>> {
        Ok(HasTable::<E>::table(self)
            .rows
            .read()
            .iter()
            .find(|&(&id, row)| Some(id) != exclude && E::name(row).normalized() == normalized)
            .map(|(&id, _)| id))
    }
}

#[async_trait]
impl SoilFormulaRepository for MemoryStore {
    async fn find_formula(&self, id: i64) -> DomainResult<Option<SoilFormula>> {
        Ok(self.formulas.get(id))
    }

    async fn list_formulas(&self) -> DomainResult<Vec<SoilFormula>> {
        Ok(self.formulas.snapshot())
    }

    async fn insert_formula(
        &self,
        name: EntityName,
        items: Vec<FormulaItem>,
    ) -> DomainResult<SoilFormula> {
        let mut rows = self.formulas.rows.write();

        let normalized = name.normalized();
        if rows
            .values()
            .any(|formula| formula.name().normalized() == normalized)
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()));
        }

        let id = self.formulas.next_id();
        let formula = SoilFormula::new(SoilFormulaId::new(id)?, name, items)?;
        rows.insert(id, formula.clone());
        Ok(formula)
    }

    async fn replace_formula(
        &self,
        id: i64,
        name: EntityName,
        items: Vec<FormulaItem>,
    ) -> DomainResult<SoilFormula> {
        let mut rows = self.formulas.rows.write();

        if !rows.contains_key(&id) {
            return Err(DomainError::not_found("soil formula", id));
        }
        let normalized = name.normalized();
        if rows
            .iter()
            .any(|(&fid, formula)| fid != id && formula.name().normalized() == normalized)
        {
            return Err(DomainError::DuplicateName(name.as_str().to_string()));
        }

        // contains_key above guarantees the entry
        match rows.get_mut(&id) {
            Some(formula) => {
                formula.replace(name, items)?;
                Ok(formula.clone())
            }
            None => Err(DomainError::not_found("soil formula", id)),
        }
    }

    async fn remove_formula(&self, id: i64) -> DomainResult<()> {
        match self.formulas.rows.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("soil formula", id)),
        }
    }

    async fn formula_id_by_name(
        &self,
        normalized: &str,
        exclude: Option<i64>,
    ) -> DomainResult<Option<i64>> {
        Ok(self
            .formulas
            .rows
            .read()
            .iter()
            .find(|&(&id, formula)| {
                Some(id) != exclude && formula.name().normalized() == normalized
            })
            .map(|(&id, _)| id))
    }
}
