//! Aggregates - consistency units created, updated and deleted as one

pub mod soil_formula;

pub use soil_formula::{FormulaItem, SoilFormula, SoilFormulaSortField};
